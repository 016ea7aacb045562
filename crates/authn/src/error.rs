//! Authentication error types.
//!
//! This module defines errors that can occur during bearer extraction and
//! token verification. Every variant collapses to a uniform denial at the
//! authorization boundary; the distinctions exist for internal logging
//! only and are never exposed to an unauthenticated caller.

use thiserror::Error;

/// Authentication errors.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// No authorization header was supplied.
    #[error("No authentication header")]
    MissingHeader,

    /// The header does not follow the `Bearer <token>` convention.
    #[error("Invalid authentication header")]
    MalformedHeader,

    /// Malformed JWT - cannot be decoded.
    #[error("Invalid token format: {0}")]
    InvalidTokenFormat(String),

    /// Token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token not yet valid (nbf claim in future).
    #[error("Token not yet valid")]
    TokenNotYetValid,

    /// Signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Algorithm not in the fixed allow-list.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Issuer doesn't match the configured value.
    #[error("Invalid issuer: {0}")]
    InvalidIssuer(String),

    /// Required claim is missing or empty.
    #[error("Missing claim: {0}")]
    MissingClaim(String),

    /// Configured verification key or certificate could not be used.
    #[error("Invalid trust material: {0}")]
    InvalidTrustMaterial(String),

    /// Verifier configuration is missing or invalid.
    #[error("Invalid auth configuration: {0}")]
    Config(String),
}

impl AuthError {
    /// Creates a new `MissingHeader` error.
    #[must_use]
    pub fn missing_header() -> Self {
        Self::MissingHeader
    }

    /// Creates a new `MalformedHeader` error.
    #[must_use]
    pub fn malformed_header() -> Self {
        Self::MalformedHeader
    }

    /// Creates a new `InvalidTokenFormat` error with the given message.
    #[must_use]
    pub fn invalid_token_format(message: impl Into<String>) -> Self {
        Self::InvalidTokenFormat(message.into())
    }

    /// Creates a new `TokenExpired` error.
    #[must_use]
    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    /// Creates a new `TokenNotYetValid` error.
    #[must_use]
    pub fn token_not_yet_valid() -> Self {
        Self::TokenNotYetValid
    }

    /// Creates a new `InvalidSignature` error.
    #[must_use]
    pub fn invalid_signature() -> Self {
        Self::InvalidSignature
    }

    /// Creates a new `UnsupportedAlgorithm` error with the given message.
    #[must_use]
    pub fn unsupported_algorithm(message: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(message.into())
    }

    /// Creates a new `InvalidIssuer` error with the given message.
    #[must_use]
    pub fn invalid_issuer(message: impl Into<String>) -> Self {
        Self::InvalidIssuer(message.into())
    }

    /// Creates a new `MissingClaim` error for the given claim name.
    #[must_use]
    pub fn missing_claim(claim: impl Into<String>) -> Self {
        Self::MissingClaim(claim.into())
    }

    /// Creates a new `InvalidTrustMaterial` error with the given message.
    #[must_use]
    pub fn invalid_trust_material(message: impl Into<String>) -> Self {
        Self::InvalidTrustMaterial(message.into())
    }

    /// Creates a new `Config` error with the given message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidToken => {
                AuthError::InvalidTokenFormat("Invalid JWT structure".into())
            },
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
            ErrorKind::InvalidIssuer => AuthError::InvalidIssuer("Issuer validation failed".into()),
            ErrorKind::InvalidAlgorithm => {
                AuthError::UnsupportedAlgorithm("Algorithm not supported".into())
            },
            _ => AuthError::InvalidTokenFormat(format!("JWT error: {}", err)),
        }
    }
}

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;
