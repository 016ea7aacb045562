//! Verified token claims.
//!
//! The claim set produced by a successful verification. The subject
//! identifier is what downstream code uses as the record owner for every
//! store operation.
//!
//! Expected token shape:
//!
//! ```json
//! {
//!   "iss": "https://auth.example.com/",
//!   "sub": "auth0|5f7c8ec7c33c6c004bbafe82",
//!   "aud": "https://api.example.com/tasks",
//!   "iat": 1664996000,
//!   "exp": 1664999600
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Decoded payload of a verified token.
///
/// Only produced by [`TokenVerifier::verify`](crate::TokenVerifier::verify)
/// — holding a `Claims` value implies the signature and validity window
/// checks have passed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer - the identity provider that signed the token.
    pub iss: String,
    /// Subject - identifier of the authenticated user.
    pub sub: String,
    /// Expiration time (seconds since epoch).
    pub exp: u64,
    /// Issued at (optional, seconds since epoch).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    /// Audience (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl Claims {
    /// Require the subject identifier, returning an error if empty.
    ///
    /// Use this when the subject is about to become an owner identity for
    /// a write or a listing query.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingClaim` if the `sub` claim is empty.
    pub fn require_subject(&self) -> Result<&str, AuthError> {
        if self.sub.is_empty() {
            return Err(AuthError::missing_claim("sub"));
        }
        Ok(&self.sub)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn sample_claims() -> Claims {
        Claims {
            iss: "https://auth.example.com/".into(),
            sub: "auth0|user-1".into(),
            exp: 2_000_000_000,
            iat: Some(1_000_000_000),
            aud: None,
        }
    }

    #[test]
    fn test_require_subject_present() {
        let claims = sample_claims();
        assert_eq!(claims.require_subject().unwrap(), "auth0|user-1");
    }

    #[test]
    fn test_require_subject_empty() {
        let mut claims = sample_claims();
        claims.sub = String::new();
        assert!(claims.require_subject().is_err());
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let mut claims = sample_claims();
        claims.iat = None;

        let json = serde_json::to_value(&claims).expect("serialize");
        assert!(json.get("iat").is_none());
        assert!(json.get("aud").is_none());
        assert!(json.get("iss").is_some());
        assert!(json.get("sub").is_some());
        assert!(json.get("exp").is_some());
    }

    #[test]
    fn test_claims_round_trip() {
        let claims = sample_claims();
        let json = serde_json::to_string(&claims).expect("serialize");
        let back: Claims = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, claims);
    }
}
