//! Thread-safety bounds that only apply where threads exist.
//!
//! Traits implemented by browser bindings hold `JsValue`s, which are neither
//! `Send` nor `Sync`, while the same traits implemented natively are shared
//! with Tokio worker threads. Bounding on [`ConditionalSend`] /
//! [`ConditionalSync`] instead of `Send` / `Sync` lets one trait definition
//! serve both: natively they require `Send` (and `Sync`), on `wasm32` they
//! are implemented for every type.

/// `Send` on native targets, no bound on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait ConditionalSend: Send {}

#[cfg(not(target_arch = "wasm32"))]
impl<S> ConditionalSend for S where S: Send {}

/// `Send + Sync` on native targets, no bound on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait ConditionalSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<S> ConditionalSync for S where S: Send + Sync {}

/// `Send` on native targets, no bound on `wasm32`.
#[cfg(target_arch = "wasm32")]
pub trait ConditionalSend {}

#[cfg(target_arch = "wasm32")]
impl<S> ConditionalSend for S {}

/// `Send + Sync` on native targets, no bound on `wasm32`.
#[cfg(target_arch = "wasm32")]
pub trait ConditionalSync {}

#[cfg(target_arch = "wasm32")]
impl<S> ConditionalSync for S {}
