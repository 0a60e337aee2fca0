use auth::Principal;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_post::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a post (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for UpdatePostCommand {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(post_id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    tracing::debug!(account_id = %principal.id, post_id, "Updating post");

    state
        .post_service
        .update_post(PostId(post_id), req.into())
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
