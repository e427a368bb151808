//! Server module
//!
//! Binds the listener and runs the accept loop until shutdown.

pub mod connection;
pub mod listener;
pub mod signal;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::logger;

pub use listener::create_listener;
pub use signal::shutdown_signal;

/// HTTP server serving PNG images from a root directory
pub struct ImageServer {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl ImageServer {
    /// Resolve the root directory and bind the configured address
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(config: Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let addr = config.get_socket_addr()?;
        let state = AppState::new(config).map_err(|e| format!("Invalid root directory: {e}"))?;
        let listener = create_listener(addr).map_err(|e| format!("Failed to bind {addr}: {e}"))?;

        Ok(Self {
            listener,
            state: Arc::new(state),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn serve(self) -> std::io::Result<()> {
        self.serve_until(shutdown_signal()).await
    }

    /// Accept connections until `shutdown` resolves
    ///
    /// Connections already accepted keep running in their own tasks.
    pub async fn serve_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        logger::log_server_start(&addr, &self.state.root, &self.state.config);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            connection::spawn_connection(stream, peer_addr, Arc::clone(&self.state));
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                () = &mut shutdown => {
                    logger::log_shutdown();
                    return Ok(());
                }
            }
        }
    }
}
