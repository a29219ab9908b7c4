use std::fmt;
use std::time::Duration;

/// Something the respondent left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingItem {
    /// A required text input is blank.
    Field(String),

    /// No option of a mutually exclusive choice is selected.
    Choice(String),

    /// No checkbox of a group is checked.
    Group(String),
}

impl MissingItem {
    pub fn name(&self) -> &str {
        match self {
            Self::Field(name) | Self::Choice(name) | Self::Group(name) => name,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl fmt::Display for MissingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{name} is required"),
            Self::Choice(name) => write!(f, "please choose a {name}"),
            Self::Group(name) => write!(f, "select at least one {name} option"),
        }
    }
}

/// Required fields or groups are missing. Blocks navigation or submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", describe(.missing))]
pub struct ValidationError {
    missing: Vec<MissingItem>,
}

fn describe(missing: &[MissingItem]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Create an error from a non-empty list of missing items.
    pub fn new(missing: Vec<MissingItem>) -> Self {
        Self { missing }
    }

    pub fn missing(&self) -> &[MissingItem] {
        &self.missing
    }

    /// Check whether any checkbox group is unanswered.
    pub fn has_missing_group(&self) -> bool {
        self.missing.iter().any(MissingItem::is_group)
    }

    /// Turn an accumulated list into a result: empty means valid.
    pub fn check(missing: Vec<MissingItem>) -> Result<(), Self> {
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Self::new(missing))
        }
    }
}

/// Error type for a submission attempt.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The record failed the pre-submission check. Nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No resolution within the configured window; the request was cancelled.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Network failure that is not the expected unreadability of an opaque reply.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered `{ success: false }`.
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// The endpoint answered, but not with a `{ success, message }` reply.
    #[error("Invalid reply: {0}")]
    InvalidReply(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The record could not be serialized.
    #[error("Failed to encode record: {0}")]
    Encode(String),
}

impl SubmitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text of the transient notice shown to the respondent.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) if err.has_missing_group() => {
                "Please select at least one option in each lifestyle group".to_string()
            }
            Self::Validation(err) => err.to_string(),
            Self::Timeout(_) => {
                "Request timed out, please check your network connection and try again"
                    .to_string()
            }
            Self::Transport(_) => "Network error, please check your connection".to_string(),
            Self::Rejected(message) => message.clone(),
            Self::Status(code) => format!("HTTP error: {code}"),
            Self::InvalidReply(_) | Self::Encode(_) => {
                "Submission failed, please try again later".to_string()
            }
        }
    }
}
