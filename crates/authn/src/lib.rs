//! # TaskVault Authentication
//!
//! Bearer token extraction and verification for the TaskVault backend.
//!
//! This crate provides:
//! - **Bearer extraction**: `Authorization: Bearer <token>` parsing
//! - **JWT verification**: RS256 signature check against configured trust material
//! - **Algorithm validation**: fixed allow-list, algorithm-confusion resistant
//!
//! ## Design
//!
//! - The verification key is configuration, loaded at process start — no network call happens at
//!   verification time
//! - Only RS256 is accepted; symmetric algorithms and `none` are always rejected
//! - At the authorization boundary every failure collapses to a uniform denial; the specific
//!   reason is logged internally and never exposed to the caller
//!
//! ## Example
//!
//! ```no_run
//! use taskvault_authn::{AuthConfig, TokenVerifier, Verdict};
//!
//! # fn example(header: Option<&str>) -> Result<(), taskvault_authn::AuthError> {
//! // Load trust material once at process start
//! let config = AuthConfig::from_env()?;
//! let verifier = TokenVerifier::from_config(&config)?;
//!
//! // Per request: extract, verify, decode
//! match verifier.authorize(header) {
//!     Verdict::Authorized(claims) => println!("subject: {}", claims.sub),
//!     Verdict::Denied => println!("access denied"),
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Verified token claims.
pub mod claims;
/// Verifier configuration.
pub mod config;
/// Authentication error types.
pub mod error;
/// Bearer credential extraction.
pub mod header;
/// Shared test utilities (feature-gated).
#[cfg(any(test, feature = "testutil"))]
#[allow(clippy::expect_used)]
pub mod testutil;
/// Algorithm validation.
pub mod validation;
/// Token verification.
pub mod verifier;

// Re-export key types for convenience
pub use claims::Claims;
pub use config::{AuthConfig, ENV_ISSUER, ENV_PUBLIC_KEY_PEM};
pub use error::{AuthError, Result};
pub use header::extract_token;
pub use validation::{ACCEPTED_ALGORITHMS, FORBIDDEN_ALGORITHMS, validate_algorithm};
pub use verifier::{TokenVerifier, Verdict};
