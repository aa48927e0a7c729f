use std::sync::Arc;

use super::error::ApiError;
use crate::db::{DatabaseError, ReferralRepository};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    repository: Arc<ReferralRepository>,
    api_token: Arc<str>,
}

impl AppState {
    pub fn new(repository: Arc<ReferralRepository>, api_token: impl Into<Arc<str>>) -> Self {
        Self {
            repository,
            api_token: api_token.into(),
        }
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Run a repository call on the blocking pool.
    ///
    /// SQLite calls hold the connection mutex for their whole duration, so
    /// they stay off the async workers. `message` is the client-facing text
    /// for any storage or worker failure.
    pub async fn with_repository<T, F>(&self, message: &'static str, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&ReferralRepository) -> Result<T, DatabaseError> + Send + 'static,
        T: Send + 'static,
    {
        let repository = Arc::clone(&self.repository);
        tokio::task::spawn_blocking(move || f(&repository))
            .await
            .map_err(|source| ApiError::Worker { message, source })?
            .map_err(ApiError::storage(message))
    }
}
