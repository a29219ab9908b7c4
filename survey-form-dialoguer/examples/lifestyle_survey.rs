//! Run the two-step lifestyle survey in the terminal.
//!
//! Reads `survey-form.toml` from the working directory when present, e.g.
//!
//! ```toml
//! endpoint = "https://example.com/collect"
//! transport = "readable"
//! ```
//!
//! Set `RUST_LOG=survey_form=debug` to see what the submission client does.

use std::path::Path;

use survey_form::{FormConfig, HttpTransport, SubmissionClient, SurveyForm};
use survey_form_dialoguer::{DialoguerHost, HostError, current_thread_runtime};
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "survey-form.toml";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = if Path::new(CONFIG_FILE).exists() {
        FormConfig::load(CONFIG_FILE)?
    } else {
        FormConfig::default()
    };
    tracing::info!(endpoint = %config.endpoint, policy = ?config.transport, "starting survey");

    let runtime = current_thread_runtime()?;
    let client = SubmissionClient::new(HttpTransport::new(), config);
    let mut form = SurveyForm::new(client);

    match DialoguerHost::new().run(&mut form, &runtime) {
        Ok(_) => {}
        Err(HostError::Cancelled) => println!("Survey cancelled."),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
