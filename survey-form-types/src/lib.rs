//! Core types for the survey-form crate.
//!
//! This crate provides the foundational types for the two-step survey:
//! - `BasicInfoForm` and `LifestyleForm` - The field models of each step
//! - `SurveyRecord` - The flattened record that gets submitted
//! - `Step` and `SubmissionOutcome` - Navigation and submission state
//! - `FormView` - The presentation contract a host implements

mod fields;
pub use fields::{
    BasicInfoForm, Checkbox, ChoiceGroup, InputField, LIFESTYLE_GROUPS, LifestyleForm,
};

mod record;
pub use record::{LIST_SEPARATOR, SurveyRecord};

mod step;
pub use step::{Step, SubmissionOutcome, TOTAL_STEPS};

mod error;
pub use error::{MissingItem, SubmitError, ValidationError};

mod traits;
pub use traits::{FormView, Notice};
