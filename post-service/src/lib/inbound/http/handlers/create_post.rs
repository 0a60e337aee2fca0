use auth::Principal;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_post::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::CreatePostCommand;
use crate::inbound::http::router::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    tracing::debug!(account_id = %principal.id, "Creating post");

    state
        .post_service
        .create_post(CreatePostCommand::new(body.title, body.content))
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

/// HTTP request body for creating a post (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequest {
    title: String,
    content: String,
}
