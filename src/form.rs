//! Contact form submission.
//!
//! Intercepts the native submit, POSTs the fields URL-encoded through the
//! injected [`Transport`], and reflects progress in three places: the
//! `data-form-state` attribute on the form, the `.form-status` message, and
//! the submit button's `disabled` flag (set only while loading).
//!
//! ERROR HANDLING
//! ==============
//! Any failure (non-2xx status, transport error) ends in
//! [`FormState::Error`] with one generic message. The cause is logged, never
//! shown, and the user's input is kept so they can resubmit. There is no
//! retry and no cancellation; a second submit while loading (only possible
//! when the disabled button is bypassed) issues an independent request.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::config::ContactFormConfig;
use crate::dom::{DocumentContext, DomEvent, EventKind, ListenOptions, Target};
use crate::subscription::Teardown;
use crate::transport::{Response, Transport, TransportError};

/// Why a submission ended in [`FormState::Error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The endpoint answered with a non-2xx status.
    #[error("endpoint responded with status {0}")]
    Status(u16),
}

/// Submission lifecycle of the contact form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl FormState {
    /// Value written to the form's state attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Classify a completed request.
///
/// # Errors
///
/// Returns [`SubmissionError`] for transport failures and non-2xx statuses.
pub fn check_response(outcome: Result<Response, TransportError>) -> Result<Response, SubmissionError> {
    let response = outcome?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(SubmissionError::Status(response.status))
    }
}

/// URL-encode form fields the way `URLSearchParams` does.
#[must_use]
pub fn encode_fields(fields: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new()).extend_pairs(fields).finish()
}

/// The tracked contact form.
pub struct ContactForm<D: DocumentContext, T: ?Sized> {
    doc: Rc<D>,
    transport: Rc<T>,
    config: ContactFormConfig,
    form: D::Element,
    status: Option<D::Element>,
    submit_button: Option<D::Element>,
    state: Cell<FormState>,
}

impl<D, T> ContactForm<D, T>
where
    D: DocumentContext + 'static,
    T: Transport + ?Sized + 'static,
{
    /// `None` when the page has no contact form. The status element and
    /// submit button are optional.
    pub fn attach(doc: &Rc<D>, transport: &Rc<T>, config: &ContactFormConfig) -> Option<Rc<Self>> {
        let form = doc.query(&config.form_selector)?;
        let status = doc.query_within(&form, &config.status_selector);
        let submit_button = doc.query_within(&form, &config.submit_selector);
        Some(Rc::new(Self {
            doc: Rc::clone(doc),
            transport: Rc::clone(transport),
            config: config.clone(),
            form,
            status,
            submit_button,
            state: Cell::new(FormState::Idle),
        }))
    }

    #[must_use]
    pub fn state(&self) -> FormState {
        self.state.get()
    }

    /// Where the form posts: its `action` attribute, or the current path.
    #[must_use]
    pub fn target_url(&self) -> String {
        match self.doc.attribute(&self.form, "action") {
            Some(action) if !action.trim().is_empty() => action,
            _ => self.doc.location_path(),
        }
    }

    /// Start a submission. The request runs on the page's task queue; the
    /// form moves to `Success` or `Error` when it completes.
    pub fn submit(self: &Rc<Self>) {
        self.set_state(FormState::Loading);

        let body = encode_fields(&self.doc.form_fields(&self.form));
        let url = self.target_url();
        log::debug!("submitting contact form to {url}");
        let request = self.transport.post_form(&url, body);

        let this = Rc::clone(self);
        self.doc.spawn_local(Box::pin(async move {
            this.finish(check_response(request.await));
        }));
    }

    /// Apply the outcome of a submission.
    pub fn finish(&self, outcome: Result<Response, SubmissionError>) {
        match outcome {
            Ok(_) => {
                self.set_state(FormState::Success);
                self.doc.reset_form(&self.form);
            }
            Err(err) => {
                log::warn!("contact form submission failed: {err}");
                self.set_state(FormState::Error);
            }
        }
    }

    pub fn listen(self: &Rc<Self>) -> Teardown {
        let this = Rc::clone(self);
        let submit = self.doc.listen(
            Target::Element(&self.form),
            EventKind::Submit,
            ListenOptions::default(),
            Box::new(move |event: &DomEvent| {
                event.prevent_default();
                this.submit();
            }),
        );
        std::iter::once(submit).collect()
    }

    fn set_state(&self, state: FormState) {
        self.state.set(state);
        self.doc.set_attribute(&self.form, &self.config.state_attribute, state.as_str());
        if let Some(status) = &self.status {
            self.doc.set_text_content(status, self.message(state));
        }
        if let Some(button) = &self.submit_button {
            self.doc.set_disabled(button, state == FormState::Loading);
        }
    }

    fn message(&self, state: FormState) -> &str {
        match state {
            FormState::Idle => "",
            FormState::Loading => &self.config.sending_message,
            FormState::Success => &self.config.success_message,
            FormState::Error => &self.config.error_message,
        }
    }
}

pub fn mount_contact_form<D, T>(doc: &Rc<D>, transport: &Rc<T>, config: &ContactFormConfig) -> Teardown
where
    D: DocumentContext + 'static,
    T: Transport + ?Sized + 'static,
{
    ContactForm::attach(doc, transport, config).map_or_else(Teardown::inert, |form| form.listen())
}
