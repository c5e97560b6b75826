//! The credential bridge between an embedding UI framework and a
//! security-key capability.
//!
//! ```text
//!  framework ── register(json) ──▸ CredentialBridge ── SecurityKey::register ──▸ authenticator
//!      ▲                                 │
//!      └── on_register_response(json, errorCode) ◂── CredentialResponse ◂──────────┘
//! ```
//!
//! The bridge parses the request text, hands the parsed challenges to the
//! [`SecurityKey`] and returns at once. When the capability completes, the
//! response text is relayed to the [`CredentialListener`] together with its
//! `errorCode` field, unchanged. Exactly one notification follows each
//! accepted call.
//!
//! Overlapping calls are not queued: each runs as an independent task and
//! their responses may be relayed in any order.

use crate::{
    AuthenticationRequest, BridgeError, ChallengeRecord, CredentialResponse, RegistrationRequest,
};
use keyfob_common::{ConditionalSend, ConditionalSync, spawn};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// A security-key capability able to register authenticators and sign
/// challenges.
///
/// Implementations own any user interaction and timeout. Failures are
/// reported inside the returned [`CredentialResponse`] as a non-zero error
/// code, never by withholding a response.
pub trait SecurityKey: ConditionalSync {
    /// Register a new authenticator.
    fn register(
        &self,
        register_requests: &[ChallengeRecord],
        authenticate_requests: &[ChallengeRecord],
    ) -> impl Future<Output = CredentialResponse> + ConditionalSend;

    /// Sign one of the given challenges with a registered authenticator.
    fn sign(
        &self,
        authenticate_requests: &[ChallengeRecord],
    ) -> impl Future<Output = CredentialResponse> + ConditionalSend;
}

/// Receives the results relayed by a [`CredentialBridge`].
///
/// `response` is the [`CredentialResponse`] text. `error_code` is its
/// `errorCode` field as reported, whatever its JSON type, and `None` only
/// when the field is absent. Use [`CredentialResponse::error_code`] for a
/// typed reading.
pub trait CredentialListener: ConditionalSync {
    /// A registration finished.
    fn on_register_response(&self, response: String, error_code: Option<Value>);

    /// A signing request finished.
    fn on_authenticate_response(&self, response: String, error_code: Option<Value>);
}

/// Forwards registration and authentication requests to a [`SecurityKey`]
/// and relays the outcome to a [`CredentialListener`].
///
/// The bridge keeps no state between calls; one instance serves a page (or
/// session) for as long as the embedding framework keeps it.
pub struct CredentialBridge<K, L> {
    key: Arc<K>,
    listener: Arc<L>,
}

impl<K, L> Clone for CredentialBridge<K, L> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            listener: self.listener.clone(),
        }
    }
}

impl<K, L> CredentialBridge<K, L>
where
    K: SecurityKey + 'static,
    L: CredentialListener + 'static,
{
    /// Create a bridge over the given capability and listener.
    pub fn new(key: K, listener: L) -> Self {
        Self {
            key: Arc::new(key),
            listener: Arc::new(listener),
        }
    }

    /// The capability this bridge delegates to.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The listener this bridge relays to.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Start registering a security key.
    ///
    /// `request_text` must be a JSON [`RegistrationRequest`]. Returns once the
    /// request is scheduled; the outcome arrives through
    /// [`CredentialListener::on_register_response`].
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidRequest`] if the text does not
    /// deserialize, in which case the capability is not invoked and no
    /// notification follows. Returns [`BridgeError::Spawn`] if there is no
    /// executor to run the request on.
    pub fn register(&self, request_text: &str) -> Result<(), BridgeError> {
        let request: RegistrationRequest = request_text.parse()?;
        debug!(
            register_requests = request.register_requests().len(),
            authenticate_requests = request.authenticate_requests().len(),
            "Accepted registration request"
        );

        let key = self.key.clone();
        let listener = self.listener.clone();
        spawn(async move {
            let response = key
                .register(request.register_requests(), request.authenticate_requests())
                .await;
            let error_code = response.raw_error_code().cloned();
            debug!(
                error_code = ?error_code,
                success = response.is_success(),
                "Relaying registration response"
            );
            listener.on_register_response(response.to_json(), error_code);
        })?;

        Ok(())
    }

    /// Start signing with a registered security key.
    ///
    /// `request_text` must be a JSON [`AuthenticationRequest`]. Returns once
    /// the request is scheduled; the outcome arrives through
    /// [`CredentialListener::on_authenticate_response`].
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidRequest`] if the text does not
    /// deserialize, in which case the capability is not invoked and no
    /// notification follows. Returns [`BridgeError::Spawn`] if there is no
    /// executor to run the request on.
    pub fn authenticate(&self, request_text: &str) -> Result<(), BridgeError> {
        let request: AuthenticationRequest = request_text.parse()?;
        debug!(
            authenticate_requests = request.authenticate_requests().len(),
            "Accepted authentication request"
        );

        let key = self.key.clone();
        let listener = self.listener.clone();
        spawn(async move {
            let response = key.sign(request.authenticate_requests()).await;
            let error_code = response.raw_error_code().cloned();
            debug!(
                error_code = ?error_code,
                success = response.is_success(),
                "Relaying authentication response"
            );
            listener.on_authenticate_response(response.to_json(), error_code);
        })?;

        Ok(())
    }
}
