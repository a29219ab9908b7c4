/// Number of regular steps. The terminal success step is not counted.
pub const TOTAL_STEPS: usize = 2;

/// A screen of the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Step {
    /// Step 1: name, email, gender and the other basic fields.
    #[default]
    Basic,

    /// Step 2: the four lifestyle checkbox groups.
    Lifestyle,

    /// Terminal confirmation screen shown after a successful submission.
    Success,
}

impl Step {
    /// All steps in display order.
    pub const ALL: [Step; 3] = [Step::Basic, Step::Lifestyle, Step::Success];

    /// One-based position; the success step sits past the regular count.
    pub fn number(self) -> usize {
        match self {
            Self::Basic => 1,
            Self::Lifestyle => 2,
            Self::Success => TOTAL_STEPS + 1,
        }
    }

    /// Fraction of the form completed when this step is shown, in `0.0..=1.0`.
    pub fn progress(self) -> f64 {
        let done = self.number().min(TOTAL_STEPS);
        done as f64 / TOTAL_STEPS as f64
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Success
    }
}

/// Result of the latest submission attempt, used to drive UI feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A request is in flight.
    Pending,

    Succeeded,

    /// The attempt failed; the form can be resubmitted.
    Failed(String),
}

impl SubmissionOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}
