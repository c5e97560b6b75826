//! Requests handed to the bridge by the embedding framework.
//!
//! Requests arrive as JSON text produced by a relying-party server. The bridge
//! only needs to split them into the challenge sequences that the security-key
//! capability expects; the challenges themselves are carried as opaque
//! [`ChallengeRecord`]s and never inspected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// An opaque challenge produced by the relying party and consumed only by the
/// security-key capability.
///
/// The wrapped JSON value round-trips exactly, including object key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeRecord(Value);

impl ChallengeRecord {
    /// Borrow the raw JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwrap into the raw JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ChallengeRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A request to register a new security key.
///
/// `authenticate_requests` describes keys that are already registered, so the
/// capability can refuse to register the same authenticator twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    register_requests: Vec<ChallengeRecord>,
    authenticate_requests: Vec<ChallengeRecord>,
}

impl RegistrationRequest {
    /// Build a request from its two challenge sequences.
    pub fn new(
        register_requests: Vec<ChallengeRecord>,
        authenticate_requests: Vec<ChallengeRecord>,
    ) -> Self {
        Self {
            register_requests,
            authenticate_requests,
        }
    }

    /// Challenges for the key being registered.
    pub fn register_requests(&self) -> &[ChallengeRecord] {
        &self.register_requests
    }

    /// Challenges for keys that are already registered.
    pub fn authenticate_requests(&self) -> &[ChallengeRecord] {
        &self.authenticate_requests
    }
}

impl FromStr for RegistrationRequest {
    type Err = serde_json::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(text)
    }
}

/// A request to sign a challenge with a registered security key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationRequest {
    authenticate_requests: Vec<ChallengeRecord>,
}

impl AuthenticationRequest {
    /// Build a request from its challenge sequence.
    pub fn new(authenticate_requests: Vec<ChallengeRecord>) -> Self {
        Self {
            authenticate_requests,
        }
    }

    /// Challenges, one per registered key.
    pub fn authenticate_requests(&self) -> &[ChallengeRecord] {
        &self.authenticate_requests
    }
}

impl FromStr for AuthenticationRequest {
    type Err = serde_json::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    use wasm_bindgen_test::wasm_bindgen_test;

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_parses_a_registration_request() {
        let request: RegistrationRequest = r#"{
            "registerRequests": [{"version": "U2F_V2", "challenge": "abc", "appId": "https://example.com"}],
            "authenticateRequests": [{"keyHandle": "k1"}, {"keyHandle": "k2"}]
        }"#
        .parse()
        .unwrap();

        assert_eq!(request.register_requests().len(), 1);
        assert_eq!(
            request.register_requests()[0].as_value(),
            &json!({"version": "U2F_V2", "challenge": "abc", "appId": "https://example.com"})
        );
        assert_eq!(
            request
                .authenticate_requests()
                .iter()
                .map(|record| record.as_value().clone())
                .collect::<Vec<_>>(),
            vec![json!({"keyHandle": "k1"}), json!({"keyHandle": "k2"})]
        );
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_ignores_unknown_fields() {
        let request: AuthenticationRequest =
            r#"{"authenticateRequests": [], "requestId": "r-1"}"#.parse().unwrap();
        assert!(request.authenticate_requests().is_empty());
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_requires_both_challenge_sequences_for_registration() {
        assert!("{\"registerRequests\": []}".parse::<RegistrationRequest>().is_err());
        assert!("{\"authenticateRequests\": []}".parse::<RegistrationRequest>().is_err());
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_rejects_text_that_is_not_json() {
        assert!("not json".parse::<AuthenticationRequest>().is_err());
        assert!("not json".parse::<RegistrationRequest>().is_err());
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_keeps_challenge_key_order() {
        let text = r#"{"z":1,"a":2,"m":{"y":true,"b":null}}"#;
        let record: ChallengeRecord = serde_json::from_str(text).unwrap();
        assert_eq!(serde_json::to_string(&record).unwrap(), text);
    }
}
