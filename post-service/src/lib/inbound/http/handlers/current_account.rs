use auth::Principal;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;

pub async fn current_account(
    Extension(principal): Extension<Principal>,
) -> ApiSuccess<CurrentAccountResponseData> {
    ApiSuccess::new(StatusCode::OK, (&principal).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentAccountResponseData {
    pub id: i64,
    pub username: String,
    pub is_active: bool,
}

impl From<&Principal> for CurrentAccountResponseData {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.0,
            username: principal.username.clone(),
            is_active: principal.is_active,
        }
    }
}
