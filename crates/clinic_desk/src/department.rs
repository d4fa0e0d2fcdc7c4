use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Top-level dashboard route. Switching department resets the aside.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    ValueEnum,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    #[default]
    Reception,
    Counseling,
    Clinic,
    Treatment,
    Billing,
}

impl Department {
    #[must_use]
    pub fn all() -> Vec<Department> {
        Department::iter().collect()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Department::Reception => "Reception",
            Department::Counseling => "Counseling",
            Department::Clinic => "Clinic",
            Department::Treatment => "Treatment",
            Department::Billing => "Billing",
        }
    }

    /// Position in the tab bar, 0-based.
    #[must_use]
    pub fn index(self) -> usize {
        Department::iter().position(|d| d == self).unwrap_or(0)
    }

    /// Department for a 1-based hotkey digit.
    #[must_use]
    pub fn from_hotkey(digit: char) -> Option<Department> {
        let n = digit.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Department::iter().nth(i))
    }

    #[must_use]
    pub fn next(self) -> Department {
        let all = Department::all();
        all[(self.index() + 1) % all.len()]
    }

    #[must_use]
    pub fn prev(self) -> Department {
        let all = Department::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}
