use survey_form_types::{
    BasicInfoForm, FormView, LifestyleForm, Notice, Step, SubmissionOutcome, SubmitError,
    SurveyRecord, ValidationError,
};
use tracing::{debug, info, warn};

use crate::{FormValidator, PageController, SubmissionClient, Transport};

/// The whole form: both steps, navigation and submission.
///
/// Hosts forward their UI events to [`on_next`](Self::on_next),
/// [`on_back`](Self::on_back) and [`on_submit`](Self::on_submit) from a single
/// event loop thread.
#[derive(Debug)]
pub struct SurveyForm<T> {
    basic: BasicInfoForm,
    lifestyle: LifestyleForm,
    controller: PageController,
    client: SubmissionClient<T>,
    submit_enabled: bool,
    outcome: Option<SubmissionOutcome>,
}

impl<T: Transport> SurveyForm<T> {
    /// Create a form with the standard questionnaire.
    pub fn new(client: SubmissionClient<T>) -> Self {
        Self::with_forms(BasicInfoForm::standard(), LifestyleForm::standard(), client)
    }

    pub fn with_forms(
        basic: BasicInfoForm,
        lifestyle: LifestyleForm,
        client: SubmissionClient<T>,
    ) -> Self {
        Self {
            basic,
            lifestyle,
            controller: PageController::new(),
            client,
            submit_enabled: true,
            outcome: None,
        }
    }

    /// Bring the view in line with the initial state.
    pub fn mount(&mut self, view: &mut impl FormView) {
        self.controller.render(view);
        self.controller.update_progress(view);
        view.set_submit_enabled(self.submit_enabled);
    }

    pub fn basic(&self) -> &BasicInfoForm {
        &self.basic
    }

    pub fn basic_mut(&mut self) -> &mut BasicInfoForm {
        &mut self.basic
    }

    pub fn lifestyle(&self) -> &LifestyleForm {
        &self.lifestyle
    }

    pub fn lifestyle_mut(&mut self) -> &mut LifestyleForm {
        &mut self.lifestyle
    }

    pub fn step(&self) -> Step {
        self.controller.step()
    }

    /// Result of the latest submission attempt, if any.
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    pub fn client(&self) -> &SubmissionClient<T> {
        &self.client
    }

    /// "Next" on step 1.
    pub fn on_next(&mut self, view: &mut impl FormView) -> Result<Step, ValidationError> {
        self.controller.advance(&self.basic, view)
    }

    /// "Back" on step 2.
    pub fn on_back(&mut self, view: &mut impl FormView) -> Step {
        self.controller.retreat(view)
    }

    /// "Submit" on step 2.
    ///
    /// Returns `None` when the submit control is not live (wrong step, a request
    /// in flight, or already submitted). Otherwise returns the result of the
    /// attempt, after the view has been updated: success moves to the terminal
    /// step with the control left disabled; failure shows a notice and restores
    /// the control.
    pub async fn on_submit(
        &mut self,
        view: &mut impl FormView,
    ) -> Option<Result<(), SubmitError>> {
        if self.step() != Step::Lifestyle || !self.submit_enabled {
            debug!(step = ?self.step(), "submit ignored");
            return None;
        }

        if let Err(err) = FormValidator::validate_lifestyle(&self.lifestyle) {
            let err = SubmitError::from(err);
            self.notify(view, &err);
            self.set_outcome(view, SubmissionOutcome::Failed(err.to_string()));
            return Some(Err(err));
        }

        let record = SurveyRecord::collect(&self.basic, &self.lifestyle);

        let original_label = view.submit_label();
        self.set_submit_enabled(view, false);
        view.set_submit_label(&self.client.config().submitting_label);
        self.set_outcome(view, SubmissionOutcome::Pending);

        let result = self.client.submit(&record).await;

        match &result {
            Ok(()) => {
                info!("survey submitted, showing confirmation");
                self.set_outcome(view, SubmissionOutcome::Succeeded);
                self.controller.complete(view);
            }
            Err(err) => {
                warn!(%err, "survey submission failed, form can be resubmitted");
                self.notify(view, err);
                self.set_submit_enabled(view, true);
                view.set_submit_label(&original_label);
                self.set_outcome(view, SubmissionOutcome::Failed(err.to_string()));
            }
        }

        Some(result)
    }

    fn set_submit_enabled(&mut self, view: &mut impl FormView, enabled: bool) {
        self.submit_enabled = enabled;
        view.set_submit_enabled(enabled);
    }

    fn set_outcome(&mut self, view: &mut impl FormView, outcome: SubmissionOutcome) {
        view.show_outcome(&outcome);
        self.outcome = Some(outcome);
    }

    fn notify(&self, view: &mut impl FormView, err: &SubmitError) {
        let notice = Notice::new(err.user_message(), self.client.config().notice_duration());
        view.show_notice(&notice);
    }
}
