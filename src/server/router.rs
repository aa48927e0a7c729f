use axum::extract::Request;
use axum::middleware::{from_fn, from_fn_with_state, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tracing::Instrument;
use uuid::Uuid;

use super::auth::require_bearer;
use super::handlers;
use super::state::AppState;

/// Build the referral service router.
///
/// Layers, outermost first: request span, bearer auth, handler. Auth wraps
/// the fallbacks too, so unknown routes still require a token.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/referrals",
            get(handlers::list_referrals).post(handlers::create_referral),
        )
        .route(
            "/referrals/{id}",
            get(handlers::get_referral)
                .patch(handlers::update_referral)
                .delete(handlers::delete_referral),
        )
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(trace_request))
                .layer(from_fn_with_state(state.clone(), require_bearer)),
        )
        .with_state(state)
}

/// Run the request inside a span tagged with a fresh request id.
async fn trace_request(req: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "request",
        id = %Uuid::new_v4(),
        method = %req.method(),
        uri = %req.uri(),
    );

    async move {
        let response = next.run(req).await;
        tracing::info!(status = response.status().as_u16(), "finished");
        response
    }
    .instrument(span)
    .await
}
