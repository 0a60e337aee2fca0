use auth::Principal;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::post::models::PostId;
use crate::inbound::http::router::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!(account_id = %principal.id, post_id, "Deleting post");

    state
        .post_service
        .delete_post(PostId(post_id))
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
