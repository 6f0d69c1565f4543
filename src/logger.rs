use crate::config::Config;
use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;
use std::path::Path;

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    println!("======================================");
    println!("Portfolio server started successfully");
    println!("Serving files from: {}", root.display());
    println!("Listening on: http://{addr}");
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("CORS enabled for browser API calls");
    println!("Press Ctrl+C to stop");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[Request] {method} {uri} {version:?}");
}

/// Common-Log-Format style access line, one per completed response
pub fn log_access(peer_addr: &SocketAddr, method: &Method, path: &str, status: u16, bytes: usize) {
    println!(
        "{} - - [{}] \"{} {}\" {} {}",
        peer_addr.ip(),
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        method,
        path,
        status,
        bytes
    );
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_shutdown() {
    println!("\n[Shutdown] Stop signal received, draining connections...");
}

pub fn log_shutdown_complete() {
    println!("[Shutdown] Server stopped cleanly");
}
