//! HTTP protocol layer module
//!
//! Response building, MIME detection, and the fixed header set, decoupled
//! from file resolution.

pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_file_response, build_options_response,
};
