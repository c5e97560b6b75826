//! Reads the login form on behalf of the embedding framework.
//!
//! The framework cannot see what the browser autofilled into the login
//! inputs, so it asks the page for the current values. It also asks the page
//! to submit the form, which lets the browser's password manager offer to
//! remember the credentials.

use crate::{LoginFormError, LoginFormSettings};
use keyfob_common::ConditionalSync;
use tracing::debug;

/// Access to the page's login form.
pub trait LoginForm: ConditionalSync {
    /// The current value of the input with the given id.
    fn field_value(&self, id: &str) -> Result<String, LoginFormError>;

    /// Submit the form with the given id.
    fn submit(&self, form_id: &str) -> Result<(), LoginFormError>;
}

/// Receives the results relayed by a [`LoginFieldReader`].
pub trait LoginListener: ConditionalSync {
    /// The login fields were read.
    fn on_credentials(&self, username: String, password: String);

    /// The login form was submitted.
    fn on_save(&self);
}

/// Username and password as currently entered in the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    /// The username field value.
    pub username: String,
    /// The password field value.
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Relays login form contents to a [`LoginListener`].
pub struct LoginFieldReader<F, L> {
    form: F,
    listener: L,
    settings: LoginFormSettings,
}

impl<F, L> LoginFieldReader<F, L>
where
    F: LoginForm,
    L: LoginListener,
{
    /// Create a reader for the default element ids.
    pub fn new(form: F, listener: L) -> Self {
        Self::with_settings(form, listener, LoginFormSettings::default())
    }

    /// Create a reader for custom element ids.
    pub fn with_settings(form: F, listener: L, settings: LoginFormSettings) -> Self {
        Self {
            form,
            listener,
            settings,
        }
    }

    /// The element ids in use.
    pub fn settings(&self) -> &LoginFormSettings {
        &self.settings
    }

    /// The listener this reader relays to.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Read both login fields as they are right now, untrimmed.
    pub fn read(&self) -> Result<LoginCredentials, LoginFormError> {
        Ok(LoginCredentials {
            username: self.form.field_value(&self.settings.username_field)?,
            password: self.form.field_value(&self.settings.password_field)?,
        })
    }

    /// Read both login fields and relay them through
    /// [`LoginListener::on_credentials`].
    ///
    /// Nothing is relayed if either field cannot be read.
    pub fn get_credentials(&self) -> Result<(), LoginFormError> {
        let LoginCredentials { username, password } = self.read()?;
        debug!("Relaying login credentials");
        self.listener.on_credentials(username, password);
        Ok(())
    }

    /// Submit the login form, then notify [`LoginListener::on_save`].
    ///
    /// Nothing is relayed if the form cannot be submitted.
    pub fn save_credentials(&self) -> Result<(), LoginFormError> {
        self.form.submit(&self.settings.form)?;
        debug!(form = %self.settings.form, "Submitted login form");
        self.listener.on_save();
        Ok(())
    }
}
