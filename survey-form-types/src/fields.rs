/// Names of the four checkbox groups on the lifestyle step, in display order.
pub const LIFESTYLE_GROUPS: [&str; 4] = ["food", "drink", "stay", "travel"];

/// A single text input on the basic info step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    /// Field name, also the key in the submitted record.
    name: String,

    /// The prompt text shown to the user.
    label: String,

    /// Current raw value as typed.
    value: String,

    /// Whether an empty value blocks navigation.
    required: bool,
}

impl InputField {
    /// Create a required field.
    pub fn required(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            value: String::new(),
            required: true,
        }
    }

    /// Create an optional field.
    pub fn optional(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, label)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the raw value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Check if the value is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// A mutually exclusive choice (radio buttons). At most one option is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceGroup {
    name: String,
    label: String,
    options: Vec<String>,
    selected: Option<usize>,
}

impl ChoiceGroup {
    /// Create a choice group with nothing selected.
    pub fn new<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
            selected: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Select the option with the given value, replacing any previous selection.
    ///
    /// Returns `false` and leaves the selection unchanged if no option matches.
    pub fn select(&mut self, value: &str) -> bool {
        match self.options.iter().position(|option| option == value) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Select by option index. Out-of-range indices are ignored.
    pub fn select_index(&mut self, idx: usize) -> bool {
        if idx < self.options.len() {
            self.selected = Some(idx);
            true
        } else {
            false
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Get the selected option value, if any.
    pub fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// One checkbox, belonging to a named group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    /// Group name this checkbox belongs to (e.g. "food").
    pub group: String,

    /// Submitted value when checked.
    pub value: String,

    pub checked: bool,
}

impl Checkbox {
    /// Create an unchecked checkbox.
    pub fn new(group: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            value: value.into(),
            checked: false,
        }
    }
}

/// Step 1: basic respondent information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicInfoForm {
    fields: Vec<InputField>,
    choice: ChoiceGroup,
}

impl BasicInfoForm {
    /// Create a form from its inputs and the mutually exclusive choice.
    pub fn new(fields: Vec<InputField>, choice: ChoiceGroup) -> Self {
        Self { fields, choice }
    }

    /// The deployed questionnaire.
    pub fn standard() -> Self {
        Self::new(
            vec![
                InputField::required("name", "Name"),
                InputField::required("email", "Email"),
                InputField::required("age", "Age"),
                InputField::required("transportation", "Usual transportation"),
                InputField::required("interest", "Interests"),
                InputField::optional("feedback", "Anything else you'd like to tell us?"),
            ],
            ChoiceGroup::new("gender", "Gender", ["m", "f", "other"]),
        )
    }

    pub fn fields(&self) -> &[InputField] {
        &self.fields
    }

    /// Iterate over the required inputs only.
    pub fn required_fields(&self) -> impl Iterator<Item = &InputField> {
        self.fields.iter().filter(|field| field.is_required())
    }

    pub fn field(&self, name: &str) -> Option<&InputField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut InputField> {
        self.fields.iter_mut().find(|field| field.name() == name)
    }

    /// Set the value of the named field. Returns `false` if no such field exists.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Trimmed value of the named field, or `""` when the field is absent.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(|field| field.value().trim()).unwrap_or("")
    }

    pub fn choice(&self) -> &ChoiceGroup {
        &self.choice
    }

    pub fn choice_mut(&mut self) -> &mut ChoiceGroup {
        &mut self.choice
    }
}

impl Default for BasicInfoForm {
    fn default() -> Self {
        Self::standard()
    }
}

/// Step 2: lifestyle preferences, a flat list of checkboxes grouped by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifestyleForm {
    checkboxes: Vec<Checkbox>,
}

impl LifestyleForm {
    pub fn new(checkboxes: Vec<Checkbox>) -> Self {
        Self { checkboxes }
    }

    /// The deployed questionnaire with the four lifestyle groups.
    pub fn standard() -> Self {
        let options: [(&str, &[&str]); 4] = [
            ("food", &["sushi", "noodles", "hotpot", "barbecue", "vegetarian"]),
            ("drink", &["coffee", "tea", "juice", "soda", "alcohol"]),
            ("stay", &["hotel", "hostel", "homestay", "camping"]),
            ("travel", &["plane", "train", "car", "bicycle"]),
        ];
        let checkboxes = options
            .iter()
            .flat_map(|(group, values)| {
                values
                    .iter()
                    .map(move |value| Checkbox::new(*group, *value))
            })
            .collect();
        Self::new(checkboxes)
    }

    pub fn checkboxes(&self) -> &[Checkbox] {
        &self.checkboxes
    }

    /// Partition the checkboxes by group name, keeping first-seen group order.
    pub fn groups(&self) -> Vec<(&str, Vec<&Checkbox>)> {
        let mut groups: Vec<(&str, Vec<&Checkbox>)> = Vec::new();
        for checkbox in &self.checkboxes {
            match groups.iter_mut().find(|(name, _)| *name == checkbox.group) {
                Some((_, members)) => members.push(checkbox),
                None => groups.push((checkbox.group.as_str(), vec![checkbox])),
            }
        }
        groups
    }

    /// Option values of a group, in declaration order.
    pub fn options(&self, group: &str) -> Vec<&str> {
        self.checkboxes
            .iter()
            .filter(|checkbox| checkbox.group == group)
            .map(|checkbox| checkbox.value.as_str())
            .collect()
    }

    /// Set the checked state of one checkbox. Returns `false` if it does not exist.
    pub fn set_checked(&mut self, group: &str, value: &str, checked: bool) -> bool {
        match self
            .checkboxes
            .iter_mut()
            .find(|checkbox| checkbox.group == group && checkbox.value == value)
        {
            Some(checkbox) => {
                checkbox.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn check(&mut self, group: &str, value: &str) -> bool {
        self.set_checked(group, value, true)
    }

    /// Replace the selection of a whole group with the given values.
    pub fn select_only(&mut self, group: &str, values: &[&str]) {
        for checkbox in self.checkboxes.iter_mut().filter(|c| c.group == group) {
            checkbox.checked = values.contains(&checkbox.value.as_str());
        }
    }

    /// Checked values of a group, in declaration order.
    pub fn checked_values(&self, group: &str) -> Vec<&str> {
        self.checkboxes
            .iter()
            .filter(|checkbox| checkbox.group == group && checkbox.checked)
            .map(|checkbox| checkbox.value.as_str())
            .collect()
    }
}

impl Default for LifestyleForm {
    fn default() -> Self {
        Self::standard()
    }
}
