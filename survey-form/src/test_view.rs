//! Test doubles for running a form without a terminal or a network.
//!
//! `TestView` records everything the core asks the view to do, and
//! `ScriptedTransport` answers every send with a fixed behaviour while
//! counting the sends.
//!
//! # Example
//!
//! ```rust,ignore
//! use survey_form::{FormConfig, ScriptedTransport, Step, SubmissionClient, SurveyForm, TestView};
//!
//! let transport = ScriptedTransport::dispatched();
//! let mut form = SurveyForm::new(SubmissionClient::new(&transport, FormConfig::default()));
//! let mut view = TestView::new();
//!
//! form.mount(&mut view);
//! assert_eq!(view.visible_steps(), vec![Step::Basic]);
//! ```

use std::cell::RefCell;

use async_trait::async_trait;
use survey_form_types::{FormView, Notice, Step, SubmissionOutcome, ValidationError};

use crate::{Delivery, SubmitRequest, Transport, TransportError};

/// One call made on a [`TestView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    ShowStep(Step),
    Progress(f64),
    ReportValidity(ValidationError),
    SubmitEnabled(bool),
    SubmitLabel(String),
    Notice(Notice),
    Outcome(SubmissionOutcome),
}

/// A view that keeps state in memory and records every call.
#[derive(Debug, Clone)]
pub struct TestView {
    visible: [bool; 3],
    progress: f64,
    submit_enabled: bool,
    submit_label: String,
    events: Vec<ViewEvent>,
}

impl Default for TestView {
    fn default() -> Self {
        Self::new()
    }
}

impl TestView {
    /// Create a view with nothing visible and an enabled "Submit" control.
    pub fn new() -> Self {
        Self {
            visible: [false; 3],
            progress: 0.0,
            submit_enabled: true,
            submit_label: "Submit".to_string(),
            events: Vec::new(),
        }
    }

    /// Steps currently marked visible.
    pub fn visible_steps(&self) -> Vec<Step> {
        Step::ALL
            .into_iter()
            .zip(self.visible)
            .filter_map(|(step, visible)| visible.then_some(step))
            .collect()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Every notice shown so far.
    pub fn notices(&self) -> Vec<&Notice> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    /// Every validation report shown so far.
    pub fn validity_reports(&self) -> Vec<&ValidationError> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::ReportValidity(err) => Some(err),
                _ => None,
            })
            .collect()
    }

    /// Every submission state the view was told about, in order.
    pub fn outcomes(&self) -> Vec<&SubmissionOutcome> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Outcome(outcome) => Some(outcome),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

fn step_slot(step: Step) -> usize {
    match step {
        Step::Basic => 0,
        Step::Lifestyle => 1,
        Step::Success => 2,
    }
}

impl FormView for TestView {
    fn show_step(&mut self, step: Step) {
        self.visible = [false; 3];
        self.visible[step_slot(step)] = true;
        self.events.push(ViewEvent::ShowStep(step));
    }

    fn set_progress(&mut self, fraction: f64) {
        self.progress = fraction;
        self.events.push(ViewEvent::Progress(fraction));
    }

    fn report_validity(&mut self, error: &ValidationError) {
        self.events.push(ViewEvent::ReportValidity(error.clone()));
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
        self.events.push(ViewEvent::SubmitEnabled(enabled));
    }

    fn set_submit_label(&mut self, label: &str) {
        self.submit_label = label.to_string();
        self.events.push(ViewEvent::SubmitLabel(label.to_string()));
    }

    fn submit_label(&self) -> String {
        self.submit_label.clone()
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.events.push(ViewEvent::Notice(notice.clone()));
    }

    fn show_outcome(&mut self, outcome: &SubmissionOutcome) {
        self.events.push(ViewEvent::Outcome(outcome.clone()));
    }
}

#[derive(Debug, Clone)]
enum Script {
    Reply(Result<Delivery, TransportError>),
    NeverSettle,
}

/// A transport that answers every send the same way and records the requests.
#[derive(Debug)]
pub struct ScriptedTransport {
    script: Script,
    requests: RefCell<Vec<SubmitRequest>>,
}

impl ScriptedTransport {
    fn new(script: Script) -> Self {
        Self {
            script,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Every send succeeds without a readable reply.
    pub fn dispatched() -> Self {
        Self::new(Script::Reply(Ok(Delivery::Dispatched)))
    }

    /// Every send gets the given status and body back.
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self::new(Script::Reply(Ok(Delivery::Replied {
            status,
            body: body.into(),
        })))
    }

    /// Every send fails with `error`.
    pub fn failing(error: TransportError) -> Self {
        Self::new(Script::Reply(Err(error)))
    }

    /// Every send stays pending forever.
    pub fn never_settling() -> Self {
        Self::new(Script::NeverSettle)
    }

    /// Number of sends attempted so far.
    pub fn send_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<SubmitRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<SubmitRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &SubmitRequest) -> Result<Delivery, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        match &self.script {
            Script::Reply(reply) => reply.clone(),
            Script::NeverSettle => std::future::pending().await,
        }
    }
}
