use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(rename = "static")]
    pub static_files: StaticConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Static root directory; defaults to the executable's directory
    pub root: Option<String>,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    pub index_files: Vec<String>,
}

impl Config {
    /// Load configuration from an optional `folio.toml` over built-in defaults.
    ///
    /// The `PORT` environment variable overrides `server.port`; a non-integer
    /// value is a startup error.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("folio")
    }

    /// Load configuration from the given file path (without extension).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.access_log", true)?
            .set_default(
                "static.index_files",
                vec!["index.html".to_string(), "index.htm".to_string()],
            )?;

        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Resolve the static root directory.
    ///
    /// Uses `server.root` when configured, otherwise the directory containing
    /// the executable, so relative assets resolve regardless of where the
    /// server was launched from. The directory must exist.
    pub fn resolve_root(&self) -> std::io::Result<PathBuf> {
        let root = match &self.server.root {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_exe()?
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "executable has no parent directory",
                    )
                })?,
        };
        root.canonicalize()
    }
}

/// Shared per-server state, immutable after startup.
pub struct AppState {
    pub config: Config,
    /// Canonical static root, checked against resolved paths per request
    pub root: PathBuf,
}

impl AppState {
    pub fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}
