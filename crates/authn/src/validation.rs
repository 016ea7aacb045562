//! JWT algorithm validation.
//!
//! This module provides security checks for JWT algorithms, ensuring only
//! the approved asymmetric algorithm is accepted.
//!
//! # Security
//!
//! These validators implement security best practices:
//! - Strict algorithm checks to prevent algorithm substitution attacks
//! - The accepted set is a fixed allow-list, never inferred from the token
//! - Symmetric algorithms and "none" are always rejected

use crate::error::AuthError;

/// Forbidden JWT algorithms that are never accepted for security reasons.
///
/// These algorithms are blocked because:
/// - `none`: No signature verification (trivially bypassable)
/// - `HS256`, `HS384`, `HS512`: Symmetric algorithms (shared secret vulnerability)
pub const FORBIDDEN_ALGORITHMS: &[&str] = &["none", "HS256", "HS384", "HS512"];

/// Accepted JWT algorithms.
///
/// Exactly RS256: the identity provider signs tokens with an RSA key and
/// the verifier holds the matching public key. Per RFC 8725 Section 3.1,
/// validators must reject algorithms they do not fully implement, so this
/// list stays pinned to what the verification pipeline supports.
pub const ACCEPTED_ALGORITHMS: &[&str] = &["RS256"];

/// Validate JWT algorithm against security policies.
///
/// This function enforces strict algorithm security per RFC 8725:
/// - ALWAYS rejects symmetric algorithms (HS256, HS384, HS512)
/// - ALWAYS rejects "none" algorithm
/// - Only accepts RS256
///
/// # Arguments
///
/// * `alg` - The algorithm from the JWT header
///
/// # Errors
///
/// Returns [`AuthError::UnsupportedAlgorithm`] if:
/// - Algorithm is symmetric (HS256, HS384, HS512)
/// - Algorithm is "none"
/// - Algorithm is not in [`ACCEPTED_ALGORITHMS`]
///
/// # Examples
///
/// ```
/// use taskvault_authn::validation::validate_algorithm;
///
/// // RS256 is accepted
/// assert!(validate_algorithm("RS256").is_ok());
///
/// // Symmetric algorithm rejected
/// assert!(validate_algorithm("HS256").is_err());
///
/// // Asymmetric but unsupported algorithm rejected
/// assert!(validate_algorithm("EdDSA").is_err());
/// ```
pub fn validate_algorithm(alg: &str) -> Result<(), AuthError> {
    // Check against forbidden algorithms
    if FORBIDDEN_ALGORITHMS.contains(&alg) {
        return Err(AuthError::unsupported_algorithm(format!(
            "Algorithm '{}' is not allowed for security reasons",
            alg
        )));
    }

    // Check if in accepted list
    if !ACCEPTED_ALGORITHMS.contains(&alg) {
        return Err(AuthError::unsupported_algorithm(format!(
            "Algorithm '{}' is not in accepted list (only RS256 is supported)",
            alg
        )));
    }

    Ok(())
}
