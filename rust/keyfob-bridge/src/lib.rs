#![warn(missing_docs)]

//! Bridges a server-driven web UI and two browser facilities: security keys
//! (U2F) and the login form.
//!
//! The embedding framework sends requests as JSON text and receives results
//! through callbacks. This crate keeps that contract but expresses both ends
//! as traits, so the forwarding logic is independent of the browser:
//!
//! - **[`CredentialBridge`]** parses [`RegistrationRequest`]s and
//!   [`AuthenticationRequest`]s, forwards their challenges to a
//!   [`SecurityKey`] and relays each [`CredentialResponse`] to a
//!   [`CredentialListener`].
//! - **[`LoginFieldReader`]** reads the login inputs from a [`LoginForm`] and
//!   relays them to a [`LoginListener`].
//!
//! On `wasm32-unknown-unknown` the `web` module binds these traits to the
//! page and exports `U2fConnector` and `LoginConnector` to JavaScript.
//!
//! Verifying responses is the relying party's job and out of scope here.

mod bridge;
mod error;
mod login;
mod request;
mod response;
mod settings;

pub use bridge::*;
pub use error::*;
pub use login::*;
pub use request::*;
pub use response::*;
pub use settings::*;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod web;
