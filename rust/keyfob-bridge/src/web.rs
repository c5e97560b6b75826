//! Browser bindings.
//!
//! Binds the bridge traits to the page: [`U2fApi`] drives the global U2F
//! JavaScript API, [`DomLoginForm`] reads the login inputs from the document,
//! and [`JsConnector`] invokes the callback methods of the object the
//! embedding framework hands in. [`U2fConnector`] and [`LoginConnector`] tie
//! these together and are exported to JavaScript:
//!
//! ```js
//! const u2f = new U2fConnector(connector);
//! u2f.register(requestJson);        // later: connector.onRegisterResponse(json, code)
//! u2f.authenticate(requestJson);    // later: connector.onAuthenticateResponse(json, code)
//!
//! const login = new LoginConnector(connector);
//! login.getCredentials();           // connector.onCredentials(username, password)
//! login.saveCredentials();          // connector.onSave()
//! ```

mod connector;
mod dom;
mod interop;
mod u2f;

pub use connector::{JsConnector, LoginConnector, U2fConnector};
pub use dom::DomLoginForm;
pub use u2f::{U2fApi, U2fApiError};
