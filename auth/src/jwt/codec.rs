use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Lifetime of a token issued without an explicit TTL.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Signs and verifies access tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a single process-wide secret. Changing
/// the secret invalidates every token issued under the previous one.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from a signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration or a secret store, never from code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            default_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    /// Override the TTL used by [`TokenCodec::issue`].
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `subject` with the default TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, self.default_ttl)
    }

    /// Issue a token for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed, or `ttl` puts the expiry out of range
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims::for_subject(subject, ttl).ok_or_else(|| {
            TokenError::EncodingFailed(format!("token lifetime out of range: {}", ttl))
        })?;

        self.encode(&claims)
    }

    /// Sign an arbitrary claims set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify and decode a token.
    ///
    /// The signature is checked before the claims are parsed, so a tampered
    /// token is reported as `InvalidSignature` whatever its payload holds.
    /// Expiry is checked last and is strict: `exp` must lie after the current
    /// second.
    ///
    /// # Errors
    /// * `Malformed` - Not a JWT, wrong algorithm, or `sub`/`exp` missing
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `Expired` - Signature is valid but `exp` is not in the future
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // The library treats `exp == now` as valid and adds leeway; expiry is
        // checked after decoding instead.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}
