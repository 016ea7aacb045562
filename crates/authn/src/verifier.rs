//! Token verification against configured trust material.
//!
//! This module provides [`TokenVerifier`], which checks a bearer token's
//! cryptographic signature against a fixed RSA public key and yields the
//! decoded claims or a failure. No network call happens at verification
//! time: the key is embedded in configuration ahead of time, never fetched
//! per request.
//!
//! # Verification pipeline
//!
//! 1. **Extract** — [`extract_token`] produces the raw token from the header value
//! 2. **Verify** — the declared algorithm is checked against the fixed allow-list, then the
//!    signature and validity window are verified with the configured key
//! 3. **Decode** — the claim set (subject, expiry, issuer) is produced
//!
//! [`authorize`](TokenVerifier::authorize) runs all three stages and
//! collapses every failure to [`Verdict::Denied`]: which check failed is
//! logged internally and never exposed to the unauthenticated caller.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use x509_parser::oid_registry::OID_PKCS1_RSAENCRYPTION;

use crate::{
    claims::Claims,
    config::AuthConfig,
    error::AuthError,
    header::extract_token,
    validation::validate_algorithm,
};

/// Terminal outcome of an authorization attempt.
///
/// The caller maps `Authorized` to an allow decision and `Denied` to a
/// deny decision. `Denied` deliberately carries no detail — the reason
/// (missing header vs. bad signature vs. expired token) is internal
/// logging material only.
#[derive(Debug, Clone)]
pub enum Verdict {
    /// The credential verified; the claim set is trustworthy.
    Authorized(Claims),
    /// The credential was absent or failed verification.
    Denied,
}

impl Verdict {
    /// Returns `true` when the attempt was authorized.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Verdict::Authorized(_))
    }

    /// Returns the claims when authorized.
    #[must_use]
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Verdict::Authorized(claims) => Some(claims),
            Verdict::Denied => None,
        }
    }
}

/// Builds a decoding key from PEM-encoded trust material.
///
/// Accepts either an RSA public key PEM (`BEGIN PUBLIC KEY` /
/// `BEGIN RSA PUBLIC KEY`) or an X.509 certificate PEM, from which the
/// subject public key is extracted.
fn decoding_key_from_pem(pem: &[u8]) -> Result<DecodingKey, AuthError> {
    let text = std::str::from_utf8(pem)
        .map_err(|_| AuthError::invalid_trust_material("trust material is not valid UTF-8"))?;

    if text.contains("-----BEGIN CERTIFICATE-----") {
        let (_, parsed) = x509_parser::pem::parse_x509_pem(pem).map_err(|e| {
            AuthError::invalid_trust_material(format!("failed to parse certificate PEM: {e}"))
        })?;
        let cert = parsed.parse_x509().map_err(|e| {
            AuthError::invalid_trust_material(format!("failed to parse certificate: {e}"))
        })?;

        let spki = cert.public_key();
        if spki.algorithm.algorithm != OID_PKCS1_RSAENCRYPTION {
            return Err(AuthError::invalid_trust_material(
                "certificate does not carry an RSA public key",
            ));
        }

        Ok(DecodingKey::from_rsa_der(spki.subject_public_key.data.as_ref()))
    } else {
        DecodingKey::from_rsa_pem(pem).map_err(|e| {
            AuthError::invalid_trust_material(format!("failed to parse RSA public key PEM: {e}"))
        })
    }
}

/// Verifies bearer tokens against a fixed RSA public key.
///
/// Construct once at process start from configuration and reuse for every
/// invocation. Verification is a local CPU-bound signature check; the
/// verifier holds no mutable state and is `Send + Sync`.
///
/// # Example
///
/// ```no_run
/// use taskvault_authn::TokenVerifier;
///
/// # fn example(pem: &[u8], header: Option<&str>) -> Result<(), taskvault_authn::AuthError> {
/// let verifier = TokenVerifier::from_pem(pem)?;
///
/// let verdict = verifier.authorize(header);
/// if let Some(claims) = verdict.claims() {
///     println!("authorized subject: {}", claims.sub);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    issuer: Option<String>,
}

impl TokenVerifier {
    /// Creates a verifier from PEM-encoded trust material.
    ///
    /// Accepts an RSA public key PEM or an X.509 certificate PEM. The
    /// material is parsed once here; rotation is a configuration change
    /// followed by a process restart, never a code change.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidTrustMaterial`] when the PEM cannot be
    /// parsed or does not carry an RSA public key.
    pub fn from_pem(pem: &[u8]) -> Result<Self, AuthError> {
        Ok(Self { decoding_key: decoding_key_from_pem(pem)?, issuer: None })
    }

    /// Creates a verifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidTrustMaterial`] when the configured PEM
    /// is unusable.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let mut verifier = Self::from_pem(config.public_key_pem().as_bytes())?;
        verifier.issuer = config.issuer().map(String::from);
        Ok(verifier)
    }

    /// Additionally requires the token's `iss` claim to equal `issuer`.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Verifies a token's signature and validity window, producing the
    /// claim set.
    ///
    /// The declared algorithm is checked against the fixed allow-list
    /// before any cryptography runs, and the verification itself is pinned
    /// to RS256 — the accepted algorithm is never inferred from the token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidTokenFormat`] — the token cannot be decoded
    /// - [`AuthError::UnsupportedAlgorithm`] — declared algorithm outside the allow-list
    /// - [`AuthError::InvalidSignature`] — signature does not match the configured key
    /// - [`AuthError::TokenExpired`] / [`AuthError::TokenNotYetValid`] — validity window elapsed or not started
    /// - [`AuthError::InvalidIssuer`] — issuer differs from the configured value
    /// - [`AuthError::MissingClaim`] — a required claim is empty
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        // 1. Decode header and validate the declared algorithm
        let header = decode_header(token).map_err(|e| {
            AuthError::invalid_token_format(format!("Failed to decode JWT header: {}", e))
        })?;

        let alg = format!("{:?}", header.alg);
        validate_algorithm(&alg)?;

        // 2. Verify signature and expiry with the configured key
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        let claims = token_data.claims;

        // 3. Required claims and issuer policy
        claims.require_subject()?;
        if claims.iss.is_empty() {
            return Err(AuthError::missing_claim("iss"));
        }
        if let Some(expected) = &self.issuer
            && claims.iss != *expected
        {
            return Err(AuthError::invalid_issuer(format!(
                "expected '{}', got '{}'",
                expected, claims.iss
            )));
        }

        Ok(claims)
    }

    /// Runs the full extract → verify → decode pipeline on a raw header
    /// value and collapses the outcome to a [`Verdict`].
    ///
    /// Every failure mode becomes [`Verdict::Denied`]; the specific reason
    /// is logged at `warn` and never returned. This is a deliberate
    /// information-hiding policy, not an oversight.
    pub fn authorize(&self, header: Option<&str>) -> Verdict {
        let token = match extract_token(header) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "credential extraction failed");
                return Verdict::Denied;
            },
        };

        match self.verify(token) {
            Ok(claims) => {
                tracing::debug!(sub = %claims.sub, "request authorized");
                Verdict::Authorized(claims)
            },
            Err(e) => {
                tracing::warn!(error = %e, "token verification failed");
                Verdict::Denied
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        assert_auth_error,
        testutil::{
            OTHER_SIGNING_KEY_PEM, TEST_CERTIFICATE_PEM, TEST_ISSUER, TEST_PUBLIC_KEY_PEM,
            craft_raw_jwt, sign_jwt, sign_jwt_with_exp, test_verifier,
        },
    };

    #[test]
    fn test_valid_token_yields_matching_subject() {
        let verifier = test_verifier();
        let token = sign_jwt("auth0|user-1");

        let claims = verifier.verify(&token).expect("verification should succeed");

        assert_eq!(claims.sub, "auth0|user-1");
        assert_eq!(claims.iss, TEST_ISSUER);
    }

    #[test]
    fn test_certificate_trust_material_verifies_same_tokens() {
        let verifier = TokenVerifier::from_pem(TEST_CERTIFICATE_PEM.as_bytes())
            .expect("certificate should parse");
        let token = sign_jwt("auth0|user-1");

        let claims = verifier.verify(&token).expect("verification should succeed");

        assert_eq!(claims.sub, "auth0|user-1");
    }

    #[test]
    fn test_token_signed_with_different_key_rejected() {
        let verifier = test_verifier();
        let token = crate::testutil::sign_jwt_with_key("auth0|user-1", OTHER_SIGNING_KEY_PEM);

        let result = verifier.verify(&token);

        assert_auth_error!(result, InvalidSignature);
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = test_verifier();
        let now = chrono::Utc::now().timestamp() as u64;
        let token = sign_jwt_with_exp("auth0|user-1", now - 7200);

        let result = verifier.verify(&token);

        assert_auth_error!(result, TokenExpired);
    }

    #[test]
    fn test_alg_none_rejected() {
        let verifier = test_verifier();
        // "none" is not a decodable algorithm; rejection happens at header
        // decode, before any signature work.
        let token = craft_raw_jwt(
            &json!({"alg": "none", "typ": "JWT"}),
            &json!({"iss": TEST_ISSUER, "sub": "x", "exp": 9999999999u64}),
        );

        let result = verifier.verify(&token);

        assert_auth_error!(result, InvalidTokenFormat);
    }

    #[test]
    fn test_declared_asymmetric_algorithm_outside_allow_list_rejected() {
        let verifier = test_verifier();
        // EdDSA decodes as a known algorithm but is not in the allow-list;
        // it must be rejected before signature verification is attempted.
        let token = craft_raw_jwt(
            &json!({"alg": "EdDSA", "typ": "JWT"}),
            &json!({"iss": TEST_ISSUER, "sub": "x", "exp": 9999999999u64}),
        );

        let result = verifier.verify(&token);

        assert_auth_error!(result, UnsupportedAlgorithm);
    }

    #[test]
    fn test_declared_symmetric_algorithm_rejected() {
        let verifier = test_verifier();
        let token = craft_raw_jwt(
            &json!({"alg": "HS256", "typ": "JWT"}),
            &json!({"iss": TEST_ISSUER, "sub": "x", "exp": 9999999999u64}),
        );

        let result = verifier.verify(&token);

        assert_auth_error!(result, UnsupportedAlgorithm);
    }

    #[test]
    fn test_issuer_mismatch_rejected() {
        let verifier = test_verifier().with_issuer("https://other-issuer.example.com/");
        let token = sign_jwt("auth0|user-1");

        let result = verifier.verify(&token);

        assert_auth_error!(result, InvalidIssuer);
    }

    #[test]
    fn test_issuer_match_accepted() {
        let verifier = test_verifier().with_issuer(TEST_ISSUER);
        let token = sign_jwt("auth0|user-1");

        assert!(verifier.verify(&token).is_ok());
    }

    #[test]
    fn test_garbage_trust_material_rejected() {
        let result = TokenVerifier::from_pem(b"not a pem at all");
        assert_auth_error!(result, InvalidTrustMaterial);

        let result = TokenVerifier::from_pem(b"-----BEGIN CERTIFICATE-----\ngarbage\n-----END CERTIFICATE-----\n");
        assert_auth_error!(result, InvalidTrustMaterial);
    }

    #[test]
    fn test_public_key_pem_and_certificate_agree() {
        // Both forms of trust material must accept and reject the same
        // tokens.
        let from_key = TokenVerifier::from_pem(TEST_PUBLIC_KEY_PEM.as_bytes()).expect("key");
        let from_cert = TokenVerifier::from_pem(TEST_CERTIFICATE_PEM.as_bytes()).expect("cert");

        let good = sign_jwt("auth0|user-1");
        assert!(from_key.verify(&good).is_ok());
        assert!(from_cert.verify(&good).is_ok());

        let forged = crate::testutil::sign_jwt_with_key("auth0|user-1", OTHER_SIGNING_KEY_PEM);
        assert!(from_key.verify(&forged).is_err());
        assert!(from_cert.verify(&forged).is_err());
    }

    // ===== Authorization pipeline =====

    #[test]
    fn test_authorize_valid_header() {
        let verifier = test_verifier();
        let header = format!("Bearer {}", sign_jwt("auth0|user-1"));

        let verdict = verifier.authorize(Some(&header));

        assert!(verdict.is_authorized());
        assert_eq!(verdict.claims().expect("claims").sub, "auth0|user-1");
    }

    #[test]
    fn test_authorize_collapses_every_failure_to_denied() {
        let verifier = test_verifier();
        let now = chrono::Utc::now().timestamp() as u64;

        let cases: Vec<Option<String>> = vec![
            // Missing header
            None,
            // Wrong scheme
            Some("basic xyz".into()),
            // Bare token without scheme
            Some(sign_jwt("auth0|user-1")),
            // Expired token
            Some(format!("Bearer {}", sign_jwt_with_exp("auth0|user-1", now - 7200))),
            // Wrong signing key
            Some(format!(
                "Bearer {}",
                crate::testutil::sign_jwt_with_key("auth0|user-1", OTHER_SIGNING_KEY_PEM)
            )),
            // Not a JWT at all
            Some("Bearer not.a.jwt".into()),
        ];

        for header in cases {
            let verdict = verifier.authorize(header.as_deref());
            assert!(
                !verdict.is_authorized(),
                "expected denial for header: {header:?}"
            );
            assert!(verdict.claims().is_none());
        }
    }

    /// Regression tests from known-bad token shapes: verification must
    /// reject, never panic.
    mod malformed_inputs {
        use super::*;

        fn exercise(token: &str) -> bool {
            test_verifier().verify(token).is_ok()
        }

        #[test]
        fn empty_input_no_panic() {
            assert!(!exercise(""));
        }

        #[test]
        fn dots_only_no_panic() {
            assert!(!exercise("."));
            assert!(!exercise(".."));
            assert!(!exercise("..."));
        }

        #[test]
        fn plain_string_no_panic() {
            assert!(!exercise("not-a-jwt"));
        }

        #[test]
        fn invalid_base64_segments_no_panic() {
            assert!(!exercise("!!!.!!!.!!!"));
        }

        #[test]
        fn truncated_real_token_no_panic() {
            let token = sign_jwt("auth0|user-1");
            let truncated = &token[..token.len() / 2];
            assert!(!exercise(truncated));
        }

        #[test]
        fn valid_header_with_json_garbage_payload_no_panic() {
            use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
            let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"RS256\"}");
            let payload = URL_SAFE_NO_PAD.encode(b"not-json");
            assert!(!exercise(&format!("{header}.{payload}.sig")));
        }

        #[test]
        fn extreme_timestamps_no_panic() {
            use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
            let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"RS256\"}");
            let payload = URL_SAFE_NO_PAD.encode(
                b"{\"iss\":\"x\",\"sub\":\"x\",\"exp\":18446744073709551615}",
            );
            assert!(!exercise(&format!("{header}.{payload}.")));
        }

        #[test]
        fn newlines_in_token_no_panic() {
            assert!(!exercise("eyJhbGciOiJSUzI1NiJ9\n.eyJpc3MiOiJ0ZXN0In0\n."));
        }
    }
}
