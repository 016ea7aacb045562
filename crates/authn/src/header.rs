//! Bearer credential extraction.
//!
//! First stage of the verification state machine: given a raw
//! `Authorization` header value, produce the token string or fail before
//! any cryptographic work is attempted.

use crate::error::AuthError;

/// Extracts the bearer token from an `Authorization` header value.
///
/// The header must follow the `Bearer <token>` convention. The scheme
/// match is case-insensitive (`bearer`, `BEARER`, ... all accepted); the
/// token is everything after the first space and must be non-empty.
///
/// # Errors
///
/// - [`AuthError::MissingHeader`] when the header is absent or empty
/// - [`AuthError::MalformedHeader`] when it does not follow the `Bearer <token>` convention
///
/// # Examples
///
/// ```
/// use taskvault_authn::extract_token;
///
/// assert_eq!(extract_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
/// assert_eq!(extract_token(Some("bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
/// assert!(extract_token(Some("basic xyz")).is_err());
/// assert!(extract_token(None).is_err());
/// ```
pub fn extract_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::missing_header()),
    };

    let (scheme, token) =
        header.split_once(' ').ok_or_else(AuthError::malformed_header)?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::malformed_header());
    }

    if token.is_empty() {
        return Err(AuthError::malformed_header());
    }

    Ok(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::assert_auth_error;

    #[test]
    fn test_extracts_token_from_bearer_header() {
        let token = extract_token(Some("Bearer eyJhbGciOiJSUzI1NiJ9.x.y")).expect("extract");
        assert_eq!(token, "eyJhbGciOiJSUzI1NiJ9.x.y");
    }

    #[test]
    fn test_scheme_match_is_case_insensitive() {
        assert_eq!(extract_token(Some("bearer tok")).unwrap(), "tok");
        assert_eq!(extract_token(Some("BEARER tok")).unwrap(), "tok");
        assert_eq!(extract_token(Some("BeArEr tok")).unwrap(), "tok");
    }

    #[test]
    fn test_missing_header() {
        assert_auth_error!(extract_token(None), MissingHeader);
    }

    #[test]
    fn test_empty_header_counts_as_missing() {
        assert_auth_error!(extract_token(Some("")), MissingHeader);
    }

    #[test]
    fn test_wrong_scheme_is_malformed() {
        assert_auth_error!(extract_token(Some("basic xyz")), MalformedHeader);
        assert_auth_error!(extract_token(Some("Digest abc")), MalformedHeader);
    }

    #[test]
    fn test_bare_token_without_scheme_is_malformed() {
        assert_auth_error!(extract_token(Some("eyJhbGciOiJSUzI1NiJ9.x.y")), MalformedHeader);
    }

    #[test]
    fn test_scheme_without_token_is_malformed() {
        assert_auth_error!(extract_token(Some("Bearer ")), MalformedHeader);
        assert_auth_error!(extract_token(Some("Bearer")), MalformedHeader);
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Any well-formed `Bearer <token>` header yields exactly the
            /// token, regardless of scheme casing.
            #[test]
            fn bearer_headers_round_trip(token in "[!-~]{1,64}") {
                let header = format!("Bearer {token}");
                prop_assert_eq!(extract_token(Some(&header)).unwrap(), token.as_str());
            }

            /// Headers whose scheme is not `Bearer` never extract — they
            /// fail before any cryptographic check could run.
            #[test]
            fn non_bearer_schemes_fail(scheme in "[A-Za-z]{1,12}", token in "[!-~]{1,32}") {
                prop_assume!(!scheme.eq_ignore_ascii_case("Bearer"));
                let header = format!("{scheme} {token}");
                prop_assert!(extract_token(Some(&header)).is_err());
            }

            /// Arbitrary header strings either extract a token or fail
            /// cleanly; extraction never panics.
            #[test]
            fn extraction_never_panics(header in ".{0,128}") {
                let _ = extract_token(Some(&header));
            }
        }
    }
}
