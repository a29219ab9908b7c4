//! # survey-form
//!
//! A two-step survey form: basic info, then lifestyle preferences, then a
//! single submission to a remote collection endpoint.
//!
//! The crate is presentation-agnostic. A host implements [`FormView`] and
//! forwards its events to the handler methods of [`SurveyForm`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_form::{FormConfig, HttpTransport, SubmissionClient, SurveyForm};
//!
//! let config = FormConfig::default().with_endpoint("https://example.com/collect");
//! let client = SubmissionClient::new(HttpTransport::new(), config);
//! let mut form = SurveyForm::new(client);
//!
//! form.mount(&mut view);
//! form.basic_mut().set("name", "Alice");
//! // ...
//! form.on_next(&mut view)?;
//! form.lifestyle_mut().check("food", "sushi");
//! // ...
//! form.on_submit(&mut view).await;
//! ```
//!
//! ## Components
//!
//! - [`PageController`] - which step is visible, plus the progress indicator
//! - [`FormValidator`] - required fields on step 1, one-per-group on step 2
//! - [`SubmissionClient`] - serialization, timeout and reply interpretation
//!
//! ## Transport policies
//!
//! Some endpoints cannot be read back by the caller. [`TransportPolicy::Opaque`]
//! treats a dispatched request as success; [`TransportPolicy::Readable`]
//! parses `{ "success": bool, "message": string }` and only accepts `true`.

pub use survey_form_types::*;

mod config;
pub use config::{ConfigError, DEFAULT_ENDPOINT, FormConfig, TransportPolicy};

mod validator;
pub use validator::FormValidator;

mod controller;
pub use controller::PageController;

mod transport;
pub use transport::{Delivery, HttpTransport, SubmitRequest, Transport, TransportError};

mod submission;
pub use submission::{DEFAULT_REJECTION, ServerReply, SubmissionClient};

mod form;
pub use form::SurveyForm;

// Test doubles for running the form without a terminal or a network
mod test_view;
pub use test_view::{ScriptedTransport, TestView, ViewEvent};
