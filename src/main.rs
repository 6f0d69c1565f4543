use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let root = cfg
        .resolve_root()
        .map_err(|e| format!("Failed to resolve static root: {e}"))?;

    // Relative assets resolve the same way no matter where the server was
    // launched from
    std::env::set_current_dir(&root)?;

    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    logger::log_server_start(&addr, &root, &cfg);

    let state = Arc::new(config::AppState::new(cfg, root));

    let shutdown = Arc::new(server::ShutdownSignal::new());
    server::shutdown::install(Arc::clone(&shutdown));

    server::run(listener, state, shutdown).await
}
