use crate::category::Category;
use crate::error::ValidationError;

/// Highest allowed feeling scale value.
pub const MAX_FEELING_SCALE: u8 = 10;

/// One day's mood journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodReport {
    feeling_scale: u8,
    feeling_source: Category,
    journal_entry: String,
}

impl MoodReport {
    pub fn new(
        feeling_scale: u8,
        feeling_source: Category,
        journal_entry: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if feeling_scale > MAX_FEELING_SCALE {
            return Err(ValidationError::FeelingScaleOutOfRange(feeling_scale));
        }
        let journal_entry = journal_entry.into();
        if journal_entry.is_empty() {
            return Err(ValidationError::EmptyField("journal entry"));
        }
        Ok(Self {
            feeling_scale,
            feeling_source,
            journal_entry,
        })
    }

    pub fn feeling_scale(&self) -> u8 {
        self.feeling_scale
    }

    pub fn feeling_source(&self) -> Category {
        self.feeling_source
    }

    pub fn journal_entry(&self) -> &str {
        &self.journal_entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_bounds() {
        assert!(MoodReport::new(0, Category::Health, "ok").is_ok());
        assert!(MoodReport::new(10, Category::Health, "ok").is_ok());
        assert_eq!(
            MoodReport::new(11, Category::Health, "ok"),
            Err(ValidationError::FeelingScaleOutOfRange(11))
        );
    }

    #[test]
    fn test_entry_required() {
        assert_eq!(
            MoodReport::new(5, Category::Work, ""),
            Err(ValidationError::EmptyField("journal entry"))
        );
    }
}
