use auth::AccountSummary;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

const MAX_USERNAME_LENGTH: usize = 64;
const MAX_PASSWORD_LENGTH: usize = 1024;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    body.validate()?;

    state
        .authenticator
        .signup(&body.username, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|ref summary| ApiSuccess::new(StatusCode::CREATED, summary.into()))
}

/// HTTP request body for signing up (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Password too long: maximum {max} bytes")]
    PasswordTooLong { max: usize },
}

impl SignupRequest {
    fn validate(&self) -> Result<(), ParseSignupRequestError> {
        let username_length = self.username.chars().count();

        if self.username.trim().is_empty() {
            Err(ParseSignupRequestError::EmptyUsername)
        } else if username_length > MAX_USERNAME_LENGTH {
            Err(ParseSignupRequestError::UsernameTooLong {
                max: MAX_USERNAME_LENGTH,
                actual: username_length,
            })
        } else if self.password.is_empty() {
            Err(ParseSignupRequestError::EmptyPassword)
        } else if self.password.len() > MAX_PASSWORD_LENGTH {
            Err(ParseSignupRequestError::PasswordTooLong {
                max: MAX_PASSWORD_LENGTH,
            })
        } else {
            Ok(())
        }
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub id: i64,
    pub username: String,
    pub is_active: bool,
}

impl From<&AccountSummary> for SignupResponseData {
    fn from(summary: &AccountSummary) -> Self {
        Self {
            id: summary.id.0,
            username: summary.username.clone(),
            is_active: summary.is_active,
        }
    }
}
