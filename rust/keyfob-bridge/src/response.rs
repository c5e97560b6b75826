//! Responses produced by the security-key capability.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The name of the status field inside a [`CredentialResponse`].
pub const ERROR_CODE_FIELD: &str = "errorCode";

/// Status reported by the security-key capability.
///
/// Zero means success. The named constants are the codes defined by the U2F
/// JavaScript API; any other value is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(i64);

impl ErrorCode {
    /// Success.
    pub const OK: Self = Self(0);
    /// An unspecified failure.
    pub const OTHER_ERROR: Self = Self(1);
    /// The request could not be processed.
    pub const BAD_REQUEST: Self = Self(2);
    /// The client configuration is not supported.
    pub const CONFIGURATION_UNSUPPORTED: Self = Self(3);
    /// The presented device is not eligible, e.g. it is already registered.
    pub const DEVICE_INELIGIBLE: Self = Self(4);
    /// The user did not interact with the device in time.
    pub const TIMEOUT: Self = Self(5);

    /// Wrap a raw status value.
    pub const fn new(code: i64) -> Self {
        Self(code)
    }

    /// The raw status value.
    pub const fn code(self) -> i64 {
        self.0
    }

    /// Whether this code denotes success.
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// The U2F name of this code, if it is one of the known codes.
    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("OK"),
            1 => Some("OTHER_ERROR"),
            2 => Some("BAD_REQUEST"),
            3 => Some("CONFIGURATION_UNSUPPORTED"),
            4 => Some("DEVICE_INELIGIBLE"),
            5 => Some("TIMEOUT"),
            _ => None,
        }
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

impl From<ErrorCode> for i64 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({name})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

/// The result of a registration or signing call, as produced by the
/// capability.
///
/// Besides the optional `errorCode` status the object carries signed data
/// whose shape only the relying party cares about. A response parsed from
/// text keeps that text, so [`CredentialResponse::to_json`] relays exactly
/// what the capability produced (number formatting included).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct CredentialResponse {
    fields: Map<String, Value>,
    text: String,
}

impl CredentialResponse {
    /// A response that carries nothing but a status.
    pub fn from_error(code: ErrorCode) -> Self {
        let mut fields = Map::new();
        fields.insert(ERROR_CODE_FIELD.into(), Value::from(code.code()));
        Self::from(fields)
    }

    /// The `errorCode` field exactly as the capability reported it.
    ///
    /// `None` only when the field is absent. This is what gets relayed to a
    /// [`CredentialListener`](crate::CredentialListener).
    pub fn raw_error_code(&self) -> Option<&Value> {
        self.fields.get(ERROR_CODE_FIELD)
    }

    /// The reported status as a typed code.
    ///
    /// `None` when the field is absent or is not an integer in `i64` range
    /// (`null`, a string, a fraction). Use [`Self::is_success`] to tell
    /// success from failure.
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.raw_error_code()
            .and_then(Value::as_i64)
            .map(ErrorCode::new)
    }

    /// Whether the capability reported success: the status is absent,
    /// `null` or the integer zero. Any other value is a failure.
    pub fn is_success(&self) -> bool {
        match self.raw_error_code() {
            None | Some(Value::Null) => true,
            Some(code) => code.as_i64() == Some(0),
        }
    }

    /// Look up a field of the response.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Borrow all fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The response as JSON text.
    ///
    /// This is the text the response was parsed from. Responses built from
    /// fields are serialized compactly in field order.
    pub fn to_json(&self) -> String {
        self.text.clone()
    }
}

impl Default for CredentialResponse {
    fn default() -> Self {
        Self::from(Map::new())
    }
}

impl PartialEq for CredentialResponse {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl From<Map<String, Value>> for CredentialResponse {
    fn from(fields: Map<String, Value>) -> Self {
        let text = Value::Object(fields.clone()).to_string();
        Self { fields, text }
    }
}

impl From<CredentialResponse> for Map<String, Value> {
    fn from(response: CredentialResponse) -> Self {
        response.fields
    }
}

impl FromStr for CredentialResponse {
    type Err = serde_json::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let fields = serde_json::from_str(text)?;
        Ok(Self {
            fields,
            text: text.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    use wasm_bindgen_test::wasm_bindgen_test;

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_reads_the_error_code() {
        let ok: CredentialResponse = r#"{"errorCode":0,"x":"y"}"#.parse().unwrap();
        assert_eq!(ok.error_code(), Some(ErrorCode::OK));
        assert!(ok.is_success());

        let timeout: CredentialResponse = r#"{"errorCode":5}"#.parse().unwrap();
        assert_eq!(timeout.error_code(), Some(ErrorCode::TIMEOUT));
        assert!(!timeout.is_success());
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_treats_missing_or_null_codes_as_success() {
        let absent: CredentialResponse = r#"{"registrationData":"abc"}"#.parse().unwrap();
        assert_eq!(absent.error_code(), None);
        assert!(absent.is_success());

        let null: CredentialResponse = r#"{"errorCode":null}"#.parse().unwrap();
        assert_eq!(null.error_code(), None);
        assert_eq!(null.raw_error_code(), Some(&Value::Null));
        assert!(null.is_success());
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_treats_non_integer_codes_as_failures() {
        for (text, raw) in [
            (r#"{"errorCode":"2"}"#, Value::from("2")),
            (r#"{"errorCode":2.5}"#, Value::from(2.5)),
            (r#"{"errorCode":18446744073709551615}"#, Value::from(u64::MAX)),
            (r#"{"errorCode":"0"}"#, Value::from("0")),
        ] {
            let response: CredentialResponse = text.parse().unwrap();
            assert_eq!(response.error_code(), None, "{text}");
            assert_eq!(response.raw_error_code(), Some(&raw), "{text}");
            assert!(!response.is_success(), "{text}");
        }
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_passes_unknown_codes_through() {
        let response: CredentialResponse = r#"{"errorCode":117}"#.parse().unwrap();
        let code = response.error_code().unwrap();
        assert_eq!(code.code(), 117);
        assert_eq!(code.name(), None);
        assert_eq!(code.to_string(), "117");
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_serializes_in_capability_order() {
        let text = r#"{"keyHandle":"kh","clientData":"cd","signatureData":"sd","errorCode":0}"#;
        let response: CredentialResponse = text.parse().unwrap();
        assert_eq!(response.to_json(), text);
        assert_eq!(serde_json::to_string(&response).unwrap(), text);
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_keeps_the_capability_text_verbatim() {
        let text = r#"{"n":1e+300,"m":1.0,"errorCode":0}"#;
        let response: CredentialResponse = text.parse().unwrap();
        assert_eq!(response.to_json(), text);
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"n":1e300,"m":1.0,"errorCode":0}"#
        );

        let reparsed: CredentialResponse = serde_json::to_string(&response)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(reparsed, response);
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_builds_status_only_responses() {
        let response = CredentialResponse::from_error(ErrorCode::OTHER_ERROR);
        assert_eq!(response.to_json(), r#"{"errorCode":1}"#);
        assert_eq!(ErrorCode::OTHER_ERROR.to_string(), "1 (OTHER_ERROR)");
    }
}
