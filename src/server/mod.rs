//! REST service over the referral store.
//!
//! ```text
//! GET    /referrals?status=&limit=&offset=   list (newest first)
//! POST   /referrals                          create
//! GET    /referrals/{id}                     fetch one
//! PATCH  /referrals/{id}                     partial update
//! DELETE /referrals/{id}                     delete
//! ```

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod shutdown;
pub mod state;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::db::ReferralRepository;

pub use error::{ApiError, ErrorBody};
pub use router::build_router;
pub use shutdown::ShutdownManager;
pub use state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

pub struct ReferralServer {
    /// The bound listener, held until `run` so the port cannot be taken in between.
    listener: TcpListener,
    addr: SocketAddr,
    state: AppState,
    shutdown: Arc<ShutdownManager>,
}

impl ReferralServer {
    /// Bind `addr` (port 0 picks a free port) and prepare to serve `repository`.
    pub async fn bind(
        addr: SocketAddr,
        repository: ReferralRepository,
        api_token: &str,
    ) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let addr = listener.local_addr()?;
        tracing::info!("Referral service bound to {}", addr);

        Ok(Self {
            listener,
            addr,
            state: AppState::new(Arc::new(repository), api_token),
            shutdown: Arc::new(ShutdownManager::new()),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until a shutdown signal arrives.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = self.router();
        let shutdown = self.shutdown.clone();
        tracing::info!("Referral service listening on {}", self.addr);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    tracing::error!(error = %e, "Failed to install signal handlers");
                }
            })
            .into_future()
            .await?;

        tracing::info!("Referral service stopped");
        Ok(())
    }
}

/// Cloneable handle that stops a running [`ReferralServer`].
#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
