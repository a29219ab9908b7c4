use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::{BasicInfoForm, LifestyleForm};

/// Separator used when flattening a checkbox group into a single string.
pub const LIST_SEPARATOR: &str = ", ";

/// The aggregated record sent to the collection endpoint.
///
/// Every field is a string. Multi-select groups are flattened with
/// [`LIST_SEPARATOR`], so `food: "sushi, tea"` means two boxes were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub age: String,
    pub transportation: String,
    pub interest: String,

    /// Free text, sent as `""` when left blank.
    #[serde(default)]
    pub feedback: String,

    pub food: String,
    pub drink: String,
    pub stay: String,
    pub travel: String,

    /// Local time of collection, e.g. `2025/3/7 14:05:09`.
    #[serde(default)]
    pub timestamp: String,
}

impl SurveyRecord {
    /// Collect a record from both steps, stamped with the current local time.
    pub fn collect(basic: &BasicInfoForm, lifestyle: &LifestyleForm) -> Self {
        Self::collect_at(basic, lifestyle, Local::now())
    }

    /// Collect a record from both steps with an explicit timestamp.
    pub fn collect_at(
        basic: &BasicInfoForm,
        lifestyle: &LifestyleForm,
        at: DateTime<Local>,
    ) -> Self {
        let joined = |group: &str| lifestyle.checked_values(group).join(LIST_SEPARATOR);

        Self {
            name: basic.value("name").to_string(),
            email: basic.value("email").to_string(),
            gender: basic.choice().selected_value().unwrap_or("").to_string(),
            age: basic.value("age").to_string(),
            transportation: basic.value("transportation").to_string(),
            interest: basic.value("interest").to_string(),
            feedback: basic.value("feedback").to_string(),
            food: joined("food"),
            drink: joined("drink"),
            stay: joined("stay"),
            travel: joined("travel"),
            timestamp: format_timestamp(at),
        }
    }

    /// Value of a group field by group name.
    pub fn group(&self, name: &str) -> Option<&str> {
        match name {
            "food" => Some(self.food.as_str()),
            "drink" => Some(self.drink.as_str()),
            "stay" => Some(self.stay.as_str()),
            "travel" => Some(self.travel.as_str()),
            _ => None,
        }
    }

    /// Required scalar fields as `(name, value)` pairs.
    pub fn required_scalars(&self) -> [(&'static str, &str); 6] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("gender", self.gender.as_str()),
            ("age", self.age.as_str()),
            ("transportation", self.transportation.as_str()),
            ("interest", self.interest.as_str()),
        ]
    }
}

/// Taiwanese locale style: `2025/3/7 下午2:05:09`.
fn format_timestamp(at: DateTime<Local>) -> String {
    let period = if at.hour() < 12 { "上午" } else { "下午" };
    format!("{} {period}{}", at.format("%Y/%-m/%-d"), at.format("%-I:%M:%S"))
}
