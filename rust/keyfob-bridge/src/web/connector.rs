//! The JavaScript-facing connectors.
//!
//! The embedding framework constructs one connector per page and passes in
//! an object implementing the callback methods (`onRegisterResponse`,
//! `onAuthenticateResponse`, `onCredentials`, `onSave`). Requests that cannot
//! be parsed throw; everything else is answered through those callbacks.

use super::interop::js_call;
use super::{DomLoginForm, U2fApi};
use crate::{
    CredentialBridge, CredentialListener, LoginFieldReader, LoginFormSettings, LoginListener,
    U2fApiSettings,
};
use js_sys::Array;
use serde_json::Value;
use tracing::warn;
use wasm_bindgen::prelude::*;

/// Invokes callback methods on a JS object supplied by the embedding
/// framework.
#[derive(Debug, Clone)]
pub struct JsConnector {
    target: JsValue,
}

impl JsConnector {
    /// Wrap the framework's connector object.
    pub fn new(target: JsValue) -> Self {
        Self { target }
    }

    fn notify(&self, method: &str, arguments: &Array) {
        if let Err(error) = js_call(&self.target, method, arguments) {
            warn!(method, %error, "Connector callback failed");
        }
    }
}

/// The `errorCode` value as the capability produced it. An absent code is
/// passed as `undefined`.
fn error_code_to_js(error_code: Option<Value>) -> JsValue {
    match error_code {
        None => JsValue::UNDEFINED,
        Some(Value::Null) => JsValue::NULL,
        Some(Value::String(code)) => JsValue::from_str(&code),
        Some(code) => {
            let text = code.to_string();
            js_sys::JSON::parse(&text).unwrap_or_else(|_| JsValue::from_str(&text))
        }
    }
}

impl CredentialListener for JsConnector {
    fn on_register_response(&self, response: String, error_code: Option<Value>) {
        self.notify(
            "onRegisterResponse",
            &Array::of2(&JsValue::from_str(&response), &error_code_to_js(error_code)),
        );
    }

    fn on_authenticate_response(&self, response: String, error_code: Option<Value>) {
        self.notify(
            "onAuthenticateResponse",
            &Array::of2(&JsValue::from_str(&response), &error_code_to_js(error_code)),
        );
    }
}

impl LoginListener for JsConnector {
    fn on_credentials(&self, username: String, password: String) {
        self.notify(
            "onCredentials",
            &Array::of2(&JsValue::from_str(&username), &JsValue::from_str(&password)),
        );
    }

    fn on_save(&self) {
        self.notify("onSave", &Array::new());
    }
}

/// Security-key connector exported to JavaScript.
#[wasm_bindgen]
pub struct U2fConnector {
    bridge: CredentialBridge<U2fApi, JsConnector>,
}

impl U2fConnector {
    fn build(connector: JsValue, settings: U2fApiSettings) -> U2fConnector {
        console_error_panic_hook::set_once();
        U2fConnector {
            bridge: CredentialBridge::new(U2fApi::new(settings), JsConnector::new(connector)),
        }
    }
}

#[wasm_bindgen]
impl U2fConnector {
    /// Connect to the page's `u2f` global.
    #[wasm_bindgen(constructor)]
    pub fn new(connector: JsValue) -> U2fConnector {
        Self::build(connector, U2fApiSettings::default())
    }

    /// Connect using JSON-encoded [`U2fApiSettings`].
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(connector: JsValue, settings: &str) -> Result<U2fConnector, JsError> {
        Ok(Self::build(connector, U2fApiSettings::from_json(settings)?))
    }

    /// Register a security key. The result arrives via
    /// `onRegisterResponse(responseJson, errorCode)`.
    pub fn register(&self, request: &str) -> Result<(), JsError> {
        Ok(self.bridge.register(request)?)
    }

    /// Sign with a registered security key. The result arrives via
    /// `onAuthenticateResponse(responseJson, errorCode)`.
    pub fn authenticate(&self, request: &str) -> Result<(), JsError> {
        Ok(self.bridge.authenticate(request)?)
    }
}

/// Login form connector exported to JavaScript.
#[wasm_bindgen]
pub struct LoginConnector {
    reader: LoginFieldReader<DomLoginForm, JsConnector>,
}

impl LoginConnector {
    fn build(connector: JsValue, settings: LoginFormSettings) -> LoginConnector {
        console_error_panic_hook::set_once();
        LoginConnector {
            reader: LoginFieldReader::with_settings(
                DomLoginForm,
                JsConnector::new(connector),
                settings,
            ),
        }
    }
}

#[wasm_bindgen]
impl LoginConnector {
    /// Read the default `username` / `password` inputs and `loginForm` form.
    #[wasm_bindgen(constructor)]
    pub fn new(connector: JsValue) -> LoginConnector {
        Self::build(connector, LoginFormSettings::default())
    }

    /// Use JSON-encoded [`LoginFormSettings`] for the element ids.
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(connector: JsValue, settings: &str) -> Result<LoginConnector, JsError> {
        Ok(Self::build(connector, LoginFormSettings::from_json(settings)?))
    }

    /// Relay the login inputs via `onCredentials(username, password)`.
    #[wasm_bindgen(js_name = getCredentials)]
    pub fn get_credentials(&self) -> Result<(), JsError> {
        Ok(self.reader.get_credentials()?)
    }

    /// Submit the login form, then call `onSave()`.
    #[wasm_bindgen(js_name = saveCredentials)]
    pub fn save_credentials(&self) -> Result<(), JsError> {
        Ok(self.reader.save_credentials()?)
    }
}
