//! [`LoginForm`] over the current document.

use crate::{LoginForm, LoginFormError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement};

/// The login form of the page this module runs in.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomLoginForm;

impl DomLoginForm {
    fn document() -> Result<Document, LoginFormError> {
        web_sys::window()
            .ok_or_else(|| LoginFormError::NotAvailable("window is undefined".into()))?
            .document()
            .ok_or_else(|| LoginFormError::NotAvailable("document is undefined".into()))
    }

    fn element(id: &str) -> Result<Element, LoginFormError> {
        Self::document()?
            .get_element_by_id(id)
            .ok_or_else(|| LoginFormError::MissingElement(id.into()))
    }
}

impl LoginForm for DomLoginForm {
    fn field_value(&self, id: &str) -> Result<String, LoginFormError> {
        let input = Self::element(id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| LoginFormError::UnexpectedElement {
                id: id.into(),
                expected: "input",
            })?;
        Ok(input.value())
    }

    fn submit(&self, form_id: &str) -> Result<(), LoginFormError> {
        let form = Self::element(form_id)?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| LoginFormError::UnexpectedElement {
                id: form_id.into(),
                expected: "form",
            })?;
        form.submit()
            .map_err(|e| LoginFormError::SubmitFailed(format!("{e:?}")))
    }
}
