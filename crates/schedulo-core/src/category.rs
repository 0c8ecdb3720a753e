//! Life-area categories shared by activity events and mood reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Persisted by upper-case name (`"ACADEMIC"`); parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Category {
    Academic,
    Health,
    Other,
    Personal,
    Social,
    Spiritual,
    Work,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Academic,
        Category::Health,
        Category::Other,
        Category::Personal,
        Category::Social,
        Category::Spiritual,
        Category::Work,
    ];

    /// Upper-case persisted name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Academic => "ACADEMIC",
            Category::Health => "HEALTH",
            Category::Other => "OTHER",
            Category::Personal => "PERSONAL",
            Category::Social => "SOCIAL",
            Category::Spiritual => "SPIRITUAL",
            Category::Work => "WORK",
        }
    }

    /// Title-case name for display.
    pub fn label(self) -> &'static str {
        match self {
            Category::Academic => "Academic",
            Category::Health => "Health",
            Category::Other => "Other",
            Category::Personal => "Personal",
            Category::Social => "Social",
            Category::Spiritual => "Spiritual",
            Category::Work => "Work",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Category {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
