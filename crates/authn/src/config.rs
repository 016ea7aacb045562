//! Configuration for the token verifier.
//!
//! Trust material is externally supplied configuration, loaded at process
//! start and rotatable without a code change. It is never fetched at
//! request time.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Environment variable carrying the PEM-encoded verification key or
/// certificate.
pub const ENV_PUBLIC_KEY_PEM: &str = "AUTH_PUBLIC_KEY_PEM";

/// Environment variable carrying the expected token issuer (optional).
pub const ENV_ISSUER: &str = "AUTH_ISSUER";

/// Configuration for [`TokenVerifier`](crate::TokenVerifier).
///
/// # Example
///
/// ```
/// use taskvault_authn::AuthConfig;
///
/// let config = AuthConfig::builder()
///     .public_key_pem("-----BEGIN PUBLIC KEY-----\n...\n-----END PUBLIC KEY-----\n")
///     .issuer("https://auth.example.com/")
///     .build()?;
/// # Ok::<(), taskvault_authn::AuthError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// PEM-encoded RSA public key or X.509 certificate.
    pub(crate) public_key_pem: String,

    /// Expected `iss` claim. When unset, any issuer is accepted.
    #[serde(default)]
    pub(crate) issuer: Option<String>,
}

#[bon::bon]
impl AuthConfig {
    /// Creates a new configuration, validating the trust material shape.
    ///
    /// Full parsing of the PEM happens when the verifier is constructed;
    /// this only rejects obviously empty or non-PEM input early.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if `public_key_pem` is empty or does
    /// not look like PEM.
    #[builder]
    pub fn new(
        #[builder(into)] public_key_pem: String,
        #[builder(into)] issuer: Option<String>,
    ) -> Result<Self, AuthError> {
        if public_key_pem.is_empty() {
            return Err(AuthError::config("public_key_pem cannot be empty"));
        }

        if !public_key_pem.contains("-----BEGIN ") {
            return Err(AuthError::config("public_key_pem is not PEM-encoded"));
        }

        Ok(Self { public_key_pem, issuer })
    }

    /// Loads the configuration from the process environment.
    ///
    /// Reads [`ENV_PUBLIC_KEY_PEM`] (required) and [`ENV_ISSUER`]
    /// (optional).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if the key variable is unset or not
    /// PEM-shaped.
    pub fn from_env() -> Result<Self, AuthError> {
        let public_key_pem = std::env::var(ENV_PUBLIC_KEY_PEM)
            .map_err(|_| AuthError::config(format!("{ENV_PUBLIC_KEY_PEM} must be set")))?;
        let issuer = std::env::var(ENV_ISSUER).ok();

        Self::builder().public_key_pem(public_key_pem).maybe_issuer(issuer).build()
    }

    /// Returns the PEM-encoded trust material.
    #[must_use]
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    /// Returns the expected issuer if configured.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::testutil::{TEST_ISSUER, TEST_PUBLIC_KEY_PEM};

    #[test]
    fn test_valid_config() {
        let config = AuthConfig::builder()
            .public_key_pem(TEST_PUBLIC_KEY_PEM)
            .issuer(TEST_ISSUER)
            .build()
            .unwrap();

        assert_eq!(config.public_key_pem(), TEST_PUBLIC_KEY_PEM);
        assert_eq!(config.issuer(), Some(TEST_ISSUER));
    }

    #[test]
    fn test_issuer_is_optional() {
        let config = AuthConfig::builder().public_key_pem(TEST_PUBLIC_KEY_PEM).build().unwrap();

        assert!(config.issuer().is_none());
    }

    #[test]
    fn test_validation_empty_pem() {
        let result = AuthConfig::builder().public_key_pem("").build();

        assert!(result.is_err());
    }

    #[test]
    fn test_validation_non_pem_input() {
        let result = AuthConfig::builder().public_key_pem("definitely not a key").build();

        assert!(result.is_err());
    }

    #[test]
    fn test_verifier_from_config() {
        use crate::{TokenVerifier, testutil::sign_jwt};

        let config = AuthConfig::builder()
            .public_key_pem(TEST_PUBLIC_KEY_PEM)
            .issuer(TEST_ISSUER)
            .build()
            .unwrap();
        let verifier = TokenVerifier::from_config(&config).expect("verifier");

        let claims = verifier.verify(&sign_jwt("auth0|user-1")).expect("verify");
        assert_eq!(claims.sub, "auth0|user-1");
    }
}
