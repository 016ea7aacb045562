//! Gateway authorizer decision.
//!
//! The hosting gateway invokes this once per request with the raw
//! `Authorization` value and expects an IAM-style policy decision back.
//! `Authorized` and `Denied` produce structurally identical documents
//! differing only in `Effect` and `principalId` — a denial carries the
//! placeholder principal and no hint of which check failed.

use serde::{Deserialize, Serialize};
use taskvault_authn::{TokenVerifier, Verdict};

/// Policy document version understood by the gateway.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The single action these policies govern.
pub const ACTION_INVOKE: &str = "execute-api:Invoke";

/// Principal reported on denials, revealing nothing about the caller.
const DENIED_PRINCIPAL: &str = "user";

/// Authorizer invocation payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequest {
    /// Raw `Authorization` header value, if the caller sent one.
    pub authorization_token: Option<String>,
    /// ARN of the method being invoked.
    pub method_arn: String,
}

/// Authorizer decision returned to the gateway.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    /// Authenticated subject on allow; a fixed placeholder on deny.
    pub principal_id: String,
    /// The IAM-style policy document.
    pub policy_document: PolicyDocument,
}

/// IAM-style policy document.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyDocument {
    /// Policy language version.
    #[serde(rename = "Version")]
    pub version: String,
    /// Policy statements.
    #[serde(rename = "Statement")]
    pub statement: Vec<Statement>,
}

/// A single policy statement.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    /// Governed action.
    #[serde(rename = "Action")]
    pub action: String,
    /// Allow or Deny.
    #[serde(rename = "Effect")]
    pub effect: Effect,
    /// Resource the statement applies to.
    #[serde(rename = "Resource")]
    pub resource: String,
}

/// Access decision effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    /// Grant the invocation.
    Allow,
    /// Refuse the invocation.
    Deny,
}

/// Builds a single-statement policy for the invoke action.
fn build_policy(effect: Effect, resource: &str) -> PolicyDocument {
    PolicyDocument {
        version: POLICY_VERSION.to_owned(),
        statement: vec![Statement {
            action: ACTION_INVOKE.to_owned(),
            effect,
            resource: resource.to_owned(),
        }],
    }
}

/// Runs token verification and maps the verdict to a policy decision.
///
/// Every verification failure produces the same deny document; the reason
/// stays in the logs.
pub fn authorize(verifier: &TokenVerifier, request: &AuthorizerRequest) -> AuthorizerResponse {
    match verifier.authorize(request.authorization_token.as_deref()) {
        Verdict::Authorized(claims) => AuthorizerResponse {
            principal_id: claims.sub,
            policy_document: build_policy(Effect::Allow, "*"),
        },
        Verdict::Denied => AuthorizerResponse {
            principal_id: DENIED_PRINCIPAL.to_owned(),
            policy_document: build_policy(Effect::Deny, "*"),
        },
    }
}
