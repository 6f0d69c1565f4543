//! Server loop module
//!
//! Accept loop, per-connection tasks, and graceful drain on shutdown.

pub mod listener;
pub mod shutdown;

pub use listener::create_listener;
pub use shutdown::ShutdownSignal;

use crate::config::AppState;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};

/// How long shutdown waits for in-flight connections before giving up
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Run the accept loop until shutdown is requested.
///
/// Each accepted connection is served in its own task; requests are
/// stateless, so connections never coordinate. On shutdown the listener is
/// dropped first (no new connections), then in-flight connections get a
/// bounded drain window.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<ShutdownSignal>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        if state.config.logging.access_log {
                            logger::log_connection_accepted(&peer_addr);
                        }
                        handle_connection(
                            stream,
                            peer_addr,
                            Arc::clone(&state),
                            Arc::clone(&active_connections),
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    // Stop accepting, then let in-flight responses complete
    drop(listener);
    drain(&active_connections).await;
    logger::log_shutdown_complete();

    Ok(())
}

/// Serve a single connection in a spawned task, tracking it in the
/// active-connection counter for the shutdown drain.
fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
) {
    active_connections.fetch_add(1, Ordering::SeqCst);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(
                io,
                service_fn(move |req| {
                    let state = Arc::clone(&state);
                    async move { handler::handle_request(req, state, peer_addr).await }
                }),
            );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }

        active_connections.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Wait for active connections to finish, up to `DRAIN_TIMEOUT`.
///
/// Keep-alive connections can idle indefinitely, so the window is bounded;
/// anything still open afterwards is dropped with the runtime.
async fn drain(active_connections: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + DRAIN_TIMEOUT;

    while active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Drain timeout: {} connection(s) still open",
                active_connections.load(Ordering::SeqCst)
            ));
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
