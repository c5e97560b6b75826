//! Settings for the browser bindings.
//!
//! Everything has a default that matches the markup and globals a typical
//! page provides, so an embedding framework only passes settings when its
//! page differs.

use crate::SettingsError;
use serde::{Deserialize, Serialize};

/// Identifiers of the login form elements read by
/// [`LoginFieldReader`](crate::LoginFieldReader).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginFormSettings {
    /// Id of the username input.
    pub username_field: String,
    /// Id of the password input.
    pub password_field: String,
    /// Id of the login form.
    pub form: String,
}

impl Default for LoginFormSettings {
    fn default() -> Self {
        Self {
            username_field: "username".into(),
            password_field: "password".into(),
            form: "loginForm".into(),
        }
    }
}

impl LoginFormSettings {
    /// Parse settings from JSON text. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// How to reach the browser's U2F API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct U2fApiSettings {
    /// Name of the global object exposing `register` and `sign`.
    pub namespace: String,
    /// Forwarded to the API as its optional timeout argument. When unset the
    /// API applies its own default.
    pub timeout_seconds: Option<u32>,
}

impl Default for U2fApiSettings {
    fn default() -> Self {
        Self {
            namespace: "u2f".into(),
            timeout_seconds: None,
        }
    }
}

impl U2fApiSettings {
    /// Parse settings from JSON text. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
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
    fn it_fills_missing_fields_with_defaults() {
        let settings = LoginFormSettings::from_json(r#"{"form": "signIn"}"#).unwrap();
        assert_eq!(
            settings,
            LoginFormSettings {
                form: "signIn".into(),
                ..LoginFormSettings::default()
            }
        );

        let settings = U2fApiSettings::from_json(r#"{"timeoutSeconds": 30}"#).unwrap();
        assert_eq!(settings.namespace, "u2f");
        assert_eq!(settings.timeout_seconds, Some(30));
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_rejects_malformed_settings() {
        assert!(U2fApiSettings::from_json(r#"{"timeoutSeconds": "soon"}"#).is_err());
        assert!(LoginFormSettings::from_json("42").is_err());
    }
}
