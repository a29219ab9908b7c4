//! # survey-form-dialoguer
//!
//! Dialoguer host for survey-form.
//!
//! This crate renders the two-step survey as command-line prompts using the
//! `dialoguer` library and drives the form's handlers from a single-threaded
//! event loop. Submissions run on a tokio current-thread runtime.
//!
//! ## Example
//!
//! ```rust,ignore
//! use survey_form::{FormConfig, HttpTransport, SubmissionClient, SurveyForm};
//! use survey_form_dialoguer::{DialoguerHost, current_thread_runtime};
//!
//! fn main() -> anyhow::Result<()> {
//!     let runtime = current_thread_runtime()?;
//!     let client = SubmissionClient::new(HttpTransport::new(), FormConfig::default());
//!     let mut form = SurveyForm::new(client);
//!     DialoguerHost::new().run(&mut form, &runtime)?;
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{DialoguerHost, HostError, current_thread_runtime, progress_bar};
