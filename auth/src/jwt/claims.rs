use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried inside an access token.
///
/// `sub` and `exp` are required for a token to be well-formed. `iat` is always
/// written on issue but tolerated as absent on decode, so tokens minted by
/// other HS256 issuers sharing the secret still parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued at (Unix timestamp, seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create claims for `subject` expiring `ttl` from now.
    ///
    /// Returns `None` when `now + ttl` falls outside the representable date
    /// range.
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Option<Self> {
        let now = Utc::now();
        let exp = now.checked_add_signed(ttl)?;

        Some(Self {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: Some(now.timestamp()),
        })
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is only valid while `exp` is strictly in the future, so a token
    /// expiring exactly now is already expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
