use survey_form_types::{
    BasicInfoForm, LIFESTYLE_GROUPS, LifestyleForm, MissingItem, SurveyRecord, ValidationError,
};

/// Completeness rules for both steps and for the aggregated record.
///
/// Every check returns its verdict; callers decide what to block on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValidator;

impl FormValidator {
    /// Step 1: every required input is non-blank and the choice group has a selection.
    pub fn validate_basic(form: &BasicInfoForm) -> Result<(), ValidationError> {
        let mut missing: Vec<MissingItem> = form
            .required_fields()
            .filter(|field| field.is_blank())
            .map(|field| MissingItem::Field(field.name().to_string()))
            .collect();

        if form.choice().selected_value().is_none() {
            missing.push(MissingItem::Choice(form.choice().name().to_string()));
        }

        ValidationError::check(missing)
    }

    /// Step 2: every checkbox group has at least one checked member.
    pub fn validate_lifestyle(form: &LifestyleForm) -> Result<(), ValidationError> {
        let missing = form
            .groups()
            .into_iter()
            .filter(|(_, members)| !members.iter().any(|checkbox| checkbox.checked))
            .map(|(name, _)| MissingItem::Group(name.to_string()))
            .collect();

        ValidationError::check(missing)
    }

    /// Pre-submission check on the flattened record.
    pub fn validate_record(record: &SurveyRecord) -> Result<(), ValidationError> {
        let fields = record
            .required_scalars()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| MissingItem::Field(name.to_string()));

        let groups = LIFESTYLE_GROUPS
            .into_iter()
            .filter(|group| record.group(group).is_none_or(|value| value.trim().is_empty()))
            .map(|group| MissingItem::Group(group.to_string()));

        ValidationError::check(fields.chain(groups).collect())
    }
}
