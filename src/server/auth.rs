//! Static bearer-token check applied to every route, including the fallback.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::error::ApiError;
use super::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

pub async fn require_bearer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    check_authorization(
        req.headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
        state.api_token(),
    )?;
    Ok(next.run(req).await)
}

/// Validate an `Authorization` header value against the expected token.
pub fn check_authorization(header: Option<&str>, expected: &str) -> Result<(), ApiError> {
    let token = header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(ApiError::MissingToken)?
        .trim();

    if token.is_empty() || token != expected {
        tracing::warn!("Rejected request with invalid bearer token");
        return Err(ApiError::InvalidToken);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_or_prefix() {
        assert!(matches!(
            check_authorization(None, "secret"),
            Err(ApiError::MissingToken)
        ));
        assert!(matches!(
            check_authorization(Some("Basic abc"), "secret"),
            Err(ApiError::MissingToken)
        ));
    }

    #[test]
    fn wrong_or_blank_token() {
        assert!(matches!(
            check_authorization(Some("Bearer nope"), "secret"),
            Err(ApiError::InvalidToken)
        ));
        assert!(matches!(
            check_authorization(Some("Bearer    "), "secret"),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn accepts_matching_token_with_padding() {
        assert!(check_authorization(Some("Bearer secret "), "secret").is_ok());
    }
}
