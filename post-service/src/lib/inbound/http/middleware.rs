use auth::bearer_token;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that authorizes the bearer token and adds the
/// [`auth::Principal`] to request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let principal = state.authorizer.authorize(&token).await.map_err(|e| {
        tracing::warn!(error = %e, "Request authorization failed");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

// Owned so the request body is not borrowed across the authorize await.
fn extract_token_from_header(req: &Request) -> Result<String, ApiError> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}
