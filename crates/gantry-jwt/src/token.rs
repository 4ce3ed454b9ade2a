//! Token verification and issuance.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{Claims, Role};
use crate::error::TokenError;

/// Verifies (and mints) HMAC-signed bearer tokens.
///
/// Holds the derived keys for a fixed shared secret. Verification checks
/// the signature and the `exp` claim with zero leeway; everything else is
/// left to the caller (the authentication interceptor decides what to do
/// with the role claim).
pub struct TokenValidator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Decode and verify a token, returning its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }

    /// Whether the token is structurally valid, correctly signed, and
    /// unexpired.
    pub fn validate(&self, token: &str) -> bool {
        match self.decode(token) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(error = %err, "token rejected");
                false
            }
        }
    }

    /// Claims of a valid token; `None` when validation fails.
    pub fn claims(&self, token: &str) -> Option<Claims> {
        self.decode(token).ok()
    }

    /// Mint a token for the given subject and role, valid for `ttl_secs`.
    pub fn issue(&self, subject: &str, role: Role, ttl_secs: u64) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            role: role.as_str().to_string(),
            iat: now,
            exp: now + ttl_secs as i64,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::CreationFailed(e.to_string()))
    }
}
