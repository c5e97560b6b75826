//! [`SecurityKey`] backed by the page's U2F JavaScript API.
//!
//! The API is callback based: `u2f.register(registerRequests,
//! authenticateRequests, callback[, timeoutSeconds])` and
//! `u2f.sign(authenticateRequests, callback[, timeoutSeconds])` each invoke
//! `callback` once with a response object. The callback is bridged to a
//! future through a oneshot channel.

use super::interop::{is_missing, js_call, js_get};
use crate::{ChallengeRecord, CredentialResponse, ErrorCode, SecurityKey, U2fApiSettings};
use js_sys::Array;
use tokio::sync::oneshot;
use tracing::warn;
use wasm_bindgen::prelude::*;

/// Errors from driving the U2F JavaScript API.
///
/// These never reach the embedding framework directly: [`U2fApi`] turns them
/// into an `OTHER_ERROR` response.
#[derive(Debug, Clone, thiserror::Error)]
pub enum U2fApiError {
    /// The API global is missing from the page.
    #[error("U2F API not available: {0}")]
    NotAvailable(String),

    /// The API could not be invoked.
    #[error("JS error: {0}")]
    JsError(String),

    /// The callback received something other than a response object.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// The U2F JavaScript API exposed on the page's global object.
#[derive(Debug, Clone, Default)]
pub struct U2fApi {
    settings: U2fApiSettings,
}

impl U2fApi {
    /// Drive the API found under the configured global name.
    pub fn new(settings: U2fApiSettings) -> Self {
        Self { settings }
    }

    /// The settings in use.
    pub fn settings(&self) -> &U2fApiSettings {
        &self.settings
    }

    async fn invoke(&self, operation: &'static str, arguments: Array) -> CredentialResponse {
        match self.try_invoke(operation, arguments).await {
            Ok(response) => response,
            Err(error) => {
                warn!(operation, %error, "U2F call failed, reporting OTHER_ERROR");
                CredentialResponse::from_error(ErrorCode::OTHER_ERROR)
            }
        }
    }

    async fn try_invoke(
        &self,
        operation: &'static str,
        arguments: Array,
    ) -> Result<CredentialResponse, U2fApiError> {
        let namespace = js_get(&js_sys::global(), &self.settings.namespace)
            .map_err(U2fApiError::NotAvailable)?;
        if is_missing(&namespace) {
            return Err(U2fApiError::NotAvailable(format!(
                "'{}' is undefined",
                self.settings.namespace
            )));
        }

        let (tx, rx) = oneshot::channel::<JsValue>();
        let callback: Closure<dyn FnMut(JsValue)> = Closure::once(move |data: JsValue| {
            let _ = tx.send(data);
        });
        arguments.push(callback.as_ref());
        if let Some(timeout) = self.settings.timeout_seconds {
            arguments.push(&JsValue::from_f64(f64::from(timeout)));
        }

        js_call(&namespace, operation, &arguments).map_err(U2fApiError::JsError)?;

        // `callback` owns `tx` and is held across the await, so the channel
        // only resolves through an invocation. An API that never calls back
        // leaves this call pending.
        let data = rx
            .await
            .map_err(|_| U2fApiError::InvalidResponse("callback released".into()))?;
        drop(callback);

        to_response(&data)
    }
}

impl SecurityKey for U2fApi {
    async fn register(
        &self,
        register_requests: &[ChallengeRecord],
        authenticate_requests: &[ChallengeRecord],
    ) -> CredentialResponse {
        let arguments = match (to_js(register_requests), to_js(authenticate_requests)) {
            (Ok(register), Ok(authenticate)) => Array::of2(&register, &authenticate),
            (Err(error), _) | (_, Err(error)) => {
                warn!(%error, "Unable to pass challenges to U2F register");
                return CredentialResponse::from_error(ErrorCode::OTHER_ERROR);
            }
        };
        self.invoke("register", arguments).await
    }

    async fn sign(&self, authenticate_requests: &[ChallengeRecord]) -> CredentialResponse {
        let arguments = match to_js(authenticate_requests) {
            Ok(authenticate) => Array::of1(&authenticate),
            Err(error) => {
                warn!(%error, "Unable to pass challenges to U2F sign");
                return CredentialResponse::from_error(ErrorCode::OTHER_ERROR);
            }
        };
        self.invoke("sign", arguments).await
    }
}

/// Convert challenges into a JS array of plain objects.
fn to_js(records: &[ChallengeRecord]) -> Result<JsValue, U2fApiError> {
    let json =
        serde_json::to_string(records).map_err(|e| U2fApiError::JsError(e.to_string()))?;
    js_sys::JSON::parse(&json).map_err(|e| U2fApiError::JsError(format!("{e:?}")))
}

/// Read a response object handed to the callback.
fn to_response(data: &JsValue) -> Result<CredentialResponse, U2fApiError> {
    if !data.is_object() {
        return Err(U2fApiError::InvalidResponse(format!("{data:?}")));
    }
    let json: String = js_sys::JSON::stringify(data)
        .map_err(|e| U2fApiError::InvalidResponse(format!("{e:?}")))?
        .into();
    json.parse()
        .map_err(|e: serde_json::Error| U2fApiError::InvalidResponse(e.to_string()))
}
