//! Local preview server.
//!
//! Serves the site directory over plain HTTP, one request at a time, and
//! replaces not-found responses with the site's own `404.html`.

pub mod files;
pub mod reply;

pub use files::StaticFiles;
pub use reply::{Body, Reply};

use crate::config::ServeConfig;
use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tiny_http::{Request, Server};
use tracing::{debug, info, warn};

/// A bound preview server.
pub struct PreviewServer {
    server: Arc<Server>,
    files: StaticFiles,
    stopping: Arc<AtomicBool>,
}

/// Stops a running [`PreviewServer`] from another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<Server>,
    stopping: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Ask the serve loop to exit after the current request.
    pub fn shutdown(&self) {
        self.stopping.store(true, Ordering::SeqCst);
        self.server.unblock();
    }
}

impl PreviewServer {
    /// Bind the listening socket.
    pub fn bind(config: &ServeConfig) -> Result<Self> {
        let addr = SocketAddr::new(config.bind, config.port);

        let server = Server::http(addr).map_err(|e| anyhow!("Failed to bind {}: {}", addr, e))?;
        info!("Listening on {}, serving {}", addr, config.root.display());

        Ok(Self {
            server: Arc::new(server),
            files: StaticFiles::new(config.root.clone(), config.fallback_path()),
            stopping: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The address actually bound (useful with port 0).
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Handle for stopping the serve loop.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
            stopping: Arc::clone(&self.stopping),
        }
    }

    /// Serve requests until [`ShutdownHandle::shutdown`] is called.
    pub fn run(&self) {
        loop {
            match self.server.recv() {
                Ok(request) => self.handle(request),
                Err(e) => {
                    if self.stopping.load(Ordering::SeqCst) {
                        debug!("Serve loop stopped");
                        break;
                    }
                    warn!("Failed to accept request: {}", e);
                }
            }
        }
    }

    fn handle(&self, request: Request) {
        let reply = self
            .files
            .resolve(request.method(), request.url(), request.headers());

        let peer = request
            .remote_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "-".to_string());
        info!(
            "{} \"{} {}\" {}",
            peer,
            request.method(),
            request.url(),
            reply.status
        );

        if let Err(e) = request.respond(reply.into_response()) {
            warn!("Failed to send response to {}: {}", peer, e);
        }
    }
}
