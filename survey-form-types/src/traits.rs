use std::time::Duration;

use crate::{Step, SubmissionOutcome, ValidationError};

/// A transient message that the view dismisses on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,

    /// How long the notice stays up before it is removed.
    pub dismiss_after: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            message: message.into(),
            dismiss_after,
        }
    }
}

/// Presentation surface of the form.
///
/// The core never touches widgets directly; it drives a `FormView` and the
/// host decides how steps, progress and notices look. All methods are called
/// from the host's event loop thread.
pub trait FormView {
    /// Show `step` and hide every other step.
    fn show_step(&mut self, step: Step);

    /// Set the progress indicator to `fraction` (`0.0..=1.0`).
    fn set_progress(&mut self, fraction: f64);

    /// Display the messages for fields that block navigation.
    fn report_validity(&mut self, error: &ValidationError);

    /// Enable or disable the submit control.
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Replace the submit control's label.
    fn set_submit_label(&mut self, label: &str);

    /// Current label of the submit control.
    fn submit_label(&self) -> String;

    /// Show a transient error notice.
    fn show_notice(&mut self, notice: &Notice);

    /// Follow the state of the current submission attempt.
    fn show_outcome(&mut self, _outcome: &SubmissionOutcome) {}
}
