//! Dialoguer host implementation for the FormView trait.

use std::time::Instant;

use console::style;
use dialoguer::{Input, MultiSelect, Select, theme::ColorfulTheme};
use survey_form::{
    BasicInfoForm, FormView, LifestyleForm, Notice, Step, SurveyForm, TOTAL_STEPS, Transport,
    ValidationError,
};
use thiserror::Error;
use tokio::runtime::Runtime;
use tracing::debug;

/// Width of the progress bar in characters.
const BAR_WIDTH: usize = 20;

/// Error type for the Dialoguer host.
#[derive(Debug, Error)]
pub enum HostError {
    /// User cancelled the survey (e.g., pressed Ctrl+C or Escape).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> HostError {
    if is_cancelled(&err) {
        HostError::Cancelled
    } else {
        HostError::Dialoguer(err)
    }
}

/// Build the single-threaded runtime the host submits on.
pub fn current_thread_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Render `fraction` as `[#####---------------]  25%`.
pub fn progress_bar(fraction: f64) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        (fraction * 100.0).round() as u32
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LifestyleAction {
    Submit,
    Back,
}

/// Dialoguer host for the two-step survey.
///
/// Each step is a sequence of prompts followed by a navigation choice. The
/// host is also the form's view: it prints step headers, the progress bar,
/// validation messages and error notices.
#[derive(Debug, Clone)]
pub struct DialoguerHost {
    /// Use colorful theme for prompts.
    colorful: bool,
    step: Option<Step>,
    progress: f64,
    submit_enabled: bool,
    submit_label: String,
    /// Latest notice and the moment it stops being shown.
    notice: Option<(String, Instant)>,
}

impl Default for DialoguerHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerHost {
    /// Create a new host with the colorful theme.
    pub fn new() -> Self {
        Self {
            colorful: true,
            step: None,
            progress: 0.0,
            submit_enabled: true,
            submit_label: "Submit".to_string(),
            notice: None,
        }
    }

    /// Create a host with plain (no color) theme.
    pub fn plain() -> Self {
        Self {
            colorful: false,
            ..Self::new()
        }
    }

    /// Set the initial label of the submit action.
    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// The step currently shown, if the form has been mounted.
    pub fn step(&self) -> Option<Step> {
        self.step
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The latest notice, while it has not been dismissed yet.
    pub fn active_notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|(_, until)| Instant::now() < *until)
            .map(|(message, _)| message.as_str())
    }

    /// Run the form until it reaches the success step or the user cancels.
    pub fn run<T: Transport>(
        &mut self,
        form: &mut SurveyForm<T>,
        runtime: &Runtime,
    ) -> Result<Step, HostError> {
        form.mount(self);

        loop {
            match form.step() {
                Step::Basic => {
                    self.ask_basic(form.basic_mut())?;
                    if let Err(err) = form.on_next(self) {
                        debug!(%err, "basic info rejected");
                    }
                }
                Step::Lifestyle => {
                    self.ask_lifestyle(form.lifestyle_mut())?;
                    match self.ask_lifestyle_action()? {
                        LifestyleAction::Submit => {
                            if let Some(Err(err)) = runtime.block_on(form.on_submit(self)) {
                                debug!(%err, "submission failed");
                            }
                        }
                        LifestyleAction::Back => {
                            form.on_back(self);
                        }
                    }
                }
                Step::Success => return Ok(Step::Success),
            }
        }
    }

    fn ask_basic(&self, form: &mut BasicInfoForm) -> Result<(), HostError> {
        let fields: Vec<(String, String, String, bool)> = form
            .fields()
            .iter()
            .map(|field| {
                (
                    field.name().to_string(),
                    field.label().to_string(),
                    field.value().to_string(),
                    field.is_required(),
                )
            })
            .collect();

        for (name, label, current, required) in fields {
            let prompt = if required { format!("{label} *") } else { label };
            let value = self.ask_text(&prompt, &current)?;
            form.set(&name, value);
        }

        let choice = form.choice();
        let label = format!("{} *", choice.label());
        let options = choice.options().to_vec();
        let selected = self.ask_select(&label, &options, choice.selected_index())?;
        form.choice_mut().select_index(selected);

        Ok(())
    }

    fn ask_lifestyle(&self, form: &mut LifestyleForm) -> Result<(), HostError> {
        let groups: Vec<(String, Vec<String>, Vec<bool>)> = form
            .groups()
            .into_iter()
            .map(|(name, members)| {
                (
                    name.to_string(),
                    members.iter().map(|checkbox| checkbox.value.clone()).collect(),
                    members.iter().map(|checkbox| checkbox.checked).collect(),
                )
            })
            .collect();

        for (group, values, checked) in groups {
            let prompt = format!("{group} (space to toggle, pick at least one)");
            let picked = self.ask_multi(&prompt, &values, &checked)?;
            let picked: Vec<&str> = picked
                .into_iter()
                .filter_map(|idx| values.get(idx))
                .map(String::as_str)
                .collect();
            form.select_only(&group, &picked);
        }

        Ok(())
    }

    fn ask_lifestyle_action(&self) -> Result<LifestyleAction, HostError> {
        let prompt = match self.active_notice() {
            Some(message) => format!("{} What next?", style(message).red()),
            None => "What next?".to_string(),
        };

        let mut items = Vec::new();
        let mut actions = Vec::new();
        if self.submit_enabled {
            items.push(self.submit_label.clone());
            actions.push(LifestyleAction::Submit);
        }
        items.push("Back".to_string());
        actions.push(LifestyleAction::Back);

        let idx = self.ask_select(&prompt, &items, Some(0))?;
        Ok(actions[idx])
    }

    fn ask_text(&self, prompt: &str, initial: &str) -> Result<String, HostError> {
        let mut _theme;
        let mut builder: Input<String>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        // Blank answers are allowed here; the form reports them on "Next".
        builder = builder.with_prompt(prompt).allow_empty(true);
        if !initial.is_empty() {
            builder = builder.with_initial_text(initial);
        }

        builder.interact_text().map_err(prompt_error)
    }

    fn ask_select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<usize, HostError> {
        let mut _theme;
        let mut builder: Select;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Select::with_theme(&_theme);
        } else {
            builder = Select::new();
        }

        builder = builder
            .with_prompt(prompt)
            .items(items)
            .default(default.unwrap_or(0));

        match builder.interact_opt() {
            Ok(Some(idx)) => Ok(idx),
            Ok(None) => Err(HostError::Cancelled),
            Err(e) => Err(prompt_error(e)),
        }
    }

    fn ask_multi(
        &self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Vec<usize>, HostError> {
        let mut _theme;
        let mut builder: MultiSelect;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = MultiSelect::with_theme(&_theme);
        } else {
            builder = MultiSelect::new();
        }

        builder = builder.with_prompt(prompt).items(items).defaults(checked);

        match builder.interact_opt() {
            Ok(Some(picked)) => Ok(picked),
            Ok(None) => Err(HostError::Cancelled),
            Err(e) => Err(prompt_error(e)),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.colorful {
            style(text).cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl FormView for DialoguerHost {
    fn show_step(&mut self, step: Step) {
        self.step = Some(step);
        let title = match step {
            Step::Basic => format!("Step 1 of {TOTAL_STEPS}: Basic information"),
            Step::Lifestyle => format!("Step 2 of {TOTAL_STEPS}: Lifestyle preferences"),
            Step::Success => "Thank you! Your answers have been recorded.".to_string(),
        };
        println!();
        println!("{}", self.heading(&title));
    }

    fn set_progress(&mut self, fraction: f64) {
        self.progress = fraction;
        println!("{}", progress_bar(fraction));
    }

    fn report_validity(&mut self, error: &ValidationError) {
        for item in error.missing() {
            if self.colorful {
                println!("{} {item}", style("!").red().bold());
            } else {
                println!("! {item}");
            }
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_submit_label(&mut self, label: &str) {
        self.submit_label = label.to_string();
        if !self.submit_enabled {
            println!("{label}");
        }
    }

    fn submit_label(&self) -> String {
        self.submit_label.clone()
    }

    fn show_notice(&mut self, notice: &Notice) {
        if self.colorful {
            eprintln!("{}", style(&notice.message).white().on_red());
        } else {
            eprintln!("Error: {}", notice.message);
        }
        self.notice = Some((notice.message.clone(), Instant::now() + notice.dismiss_after));
    }
}
