//! Admin session state

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::AdminUser;
use crate::error::Error;

/// Name of the cookie carrying the session token
pub const AUTH_COOKIE: &str = "auth-token";

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs() as i64
}

/// Read the `exp` claim of a session token.
///
/// The signature is not checked; the gateway does that on every admin request.
pub fn token_expiry(token: &str) -> Result<Option<i64>, Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims.exp)
}

/// An active admin session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// The user the session belongs to
    pub user: AdminUser,

    /// The session token, when the cookie was visible to the client
    pub token: Option<String>,

    /// The expiry timestamp
    pub expires_at: Option<i64>,
}

impl AdminSession {
    /// Create a session for a user.
    ///
    /// The expiry comes from the token's `exp` claim, or failing that from the cookie's max-age.
    pub fn new(user: AdminUser, token: Option<String>, max_age: Option<Duration>) -> Self {
        let from_token = token.as_deref().and_then(|token| match token_expiry(token) {
            Ok(exp) => exp,
            Err(e) => {
                tracing::debug!(error = %e, "session token is not a readable JWT");
                None
            }
        });
        let expires_at = from_token.or_else(|| max_age.map(|age| now() + age.as_secs() as i64));

        Self {
            user,
            token,
            expires_at,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => now() >= expires_at,
            None => false,
        }
    }

    /// Seconds left, if the expiry is known
    pub fn expires_in(&self) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - now()).max(0))
    }
}
