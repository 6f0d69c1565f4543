//! Shutdown signal handling module
//!
//! SIGINT (Ctrl+C) and SIGTERM both trigger graceful shutdown: the accept
//! loop stops, in-flight responses complete, and the process exits 0.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// Shared shutdown state between the signal task and the accept loop
pub struct ShutdownSignal {
    notify: Notify,
    requested: AtomicBool,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            notify: Notify::new(),
            requested: AtomicBool::new(false),
        }
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    pub async fn notified(&self) {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a request() landing in
        // between cannot be missed
        notified.as_mut().enable();
        if self.is_requested() {
            return;
        }
        notified.await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the signal listener task (Unix: SIGINT + SIGTERM)
#[cfg(unix)]
pub fn install(shutdown: std::sync::Arc<ShutdownSignal>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
            crate::logger::log_error("Failed to register SIGTERM handler");
            return;
        };
        let Ok(mut sigint) = signal(SignalKind::interrupt()) else {
            crate::logger::log_error("Failed to register SIGINT handler");
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
        shutdown.request();
    });
}

/// Non-Unix fallback: only Ctrl+C is supported
#[cfg(not(unix))]
pub fn install(shutdown: std::sync::Arc<ShutdownSignal>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            shutdown.request();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_wakes_waiter() {
        let shutdown = std::sync::Arc::new(ShutdownSignal::new());
        assert!(!shutdown.is_requested());

        let waiter = {
            let shutdown = std::sync::Arc::clone(&shutdown);
            tokio::spawn(async move { shutdown.notified().await })
        };

        shutdown.request();
        waiter.await.unwrap();
        assert!(shutdown.is_requested());
    }

    #[tokio::test]
    async fn test_notified_after_request_returns_immediately() {
        let shutdown = ShutdownSignal::new();
        shutdown.request();
        shutdown.notified().await;
    }
}
