//! Display names shared by restaurants and menu items.

use std::fmt;

use serde::Serialize;

/// Maximum number of characters accepted in a restaurant or dish name.
pub const NAME_MAX: usize = 120;

/// Maximum number of characters accepted in a free-text description.
pub const DESCRIPTION_MAX: usize = 2000;

/// Reasons a name is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name must not be empty"),
            Self::TooLong { max } => write!(f, "name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for NameValidationError {}

/// Trimmed, non-empty name of a restaurant or dish.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityName(String);

impl EntityName {
    pub fn new(value: impl AsRef<str>) -> Result<Self, NameValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NameValidationError::Empty);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(NameValidationError::TooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalise optional free text: blank input becomes `None`.
///
/// Returns `Err(max)` when the trimmed text exceeds [`DESCRIPTION_MAX`].
pub(crate) fn optional_text(value: Option<&str>) -> Result<Option<String>, usize> {
    let Some(trimmed) = value.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > DESCRIPTION_MAX {
        return Err(DESCRIPTION_MAX);
    }
    Ok(Some(trimmed.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Margherita ", "Margherita")]
    #[case("Chez Panisse", "Chez Panisse")]
    fn trims_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(EntityName::new(raw).expect("valid").as_ref(), expected);
    }

    #[rstest]
    fn rejects_blank_and_overlong_names() {
        assert_eq!(EntityName::new(" "), Err(NameValidationError::Empty));
        assert_eq!(
            EntityName::new("x".repeat(NAME_MAX + 1)),
            Err(NameValidationError::TooLong { max: NAME_MAX })
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("   "), None)]
    #[case(Some(" wood fired "), Some("wood fired"))]
    fn optional_text_drops_blank_values(
        #[case] raw: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            optional_text(raw).expect("within limit"),
            expected.map(str::to_owned)
        );
    }
}
