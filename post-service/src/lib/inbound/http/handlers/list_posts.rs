use axum::extract::State;
use axum::http::StatusCode;

use super::get_post::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    state
        .post_service
        .list_posts()
        .await
        .map_err(ApiError::from)
        .map(|posts| ApiSuccess::new(StatusCode::OK, posts.iter().map(PostData::from).collect()))
}
