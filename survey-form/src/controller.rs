use survey_form_types::{BasicInfoForm, FormView, Step, ValidationError};
use tracing::debug;

use crate::FormValidator;

/// Owns the current step and keeps the view in sync with it.
///
/// The step only moves forward, except for the explicit way back from
/// [`Step::Lifestyle`] to [`Step::Basic`].
#[derive(Debug, Clone, Default)]
pub struct PageController {
    step: Step,
}

impl PageController {
    /// Start on step 1.
    pub fn new() -> Self {
        Self { step: Step::Basic }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Move from step 1 to step 2 if the basic info is complete.
    ///
    /// On failure the view is asked to report the missing fields and the step
    /// is left unchanged. Does nothing on any other step.
    pub fn advance(
        &mut self,
        basic: &BasicInfoForm,
        view: &mut impl FormView,
    ) -> Result<Step, ValidationError> {
        if self.step != Step::Basic {
            return Ok(self.step);
        }

        match FormValidator::validate_basic(basic) {
            Ok(()) => {
                self.go_to(Step::Lifestyle, view);
                Ok(self.step)
            }
            Err(err) => {
                debug!(%err, "basic info incomplete, staying on step 1");
                view.report_validity(&err);
                Err(err)
            }
        }
    }

    /// Go back from step 2 to step 1. A no-op everywhere else.
    pub fn retreat(&mut self, view: &mut impl FormView) -> Step {
        if self.step == Step::Lifestyle {
            self.go_to(Step::Basic, view);
        }
        self.step
    }

    /// Enter the terminal success step after a submission went through.
    pub fn complete(&mut self, view: &mut impl FormView) -> Step {
        if self.step == Step::Lifestyle {
            self.go_to(Step::Success, view);
        }
        self.step
    }

    /// Show the current step and hide the others.
    pub fn render(&self, view: &mut impl FormView) {
        view.show_step(self.step);
    }

    pub fn update_progress(&self, view: &mut impl FormView) {
        view.set_progress(self.step.progress());
    }

    fn go_to(&mut self, step: Step, view: &mut impl FormView) {
        debug!(from = ?self.step, to = ?step, "changing step");
        self.step = step;
        self.render(view);
        self.update_progress(view);
    }
}
