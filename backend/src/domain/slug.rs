//! URL-safe restaurant slugs.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. They route the public menu, so a handful of
//! words that collide with fixed API path segments are reserved.

use std::fmt;

use serde::Serialize;

/// Maximum number of characters accepted in a slug.
pub const SLUG_MAX: usize = 80;

/// Path segments under `/restaurants` that a slug must never shadow.
pub const RESERVED_SLUGS: &[&str] = &["mine", "by-id"];

/// Reasons a slug candidate is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    Empty,
    TooLong { max: usize },
    InvalidCharacters,
    Reserved { slug: String },
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug must not be empty"),
            Self::TooLong { max } => write!(f, "slug must be at most {max} characters"),
            Self::InvalidCharacters => write!(
                f,
                "slug may only contain lowercase letters, digits, and hyphens"
            ),
            Self::Reserved { slug } => write!(f, "slug '{slug}' is reserved"),
        }
    }
}

impl std::error::Error for SlugValidationError {}

/// Return `true` when `value` is made of slug characters only.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Validated restaurant slug.
///
/// # Examples
/// ```
/// use backend::domain::Slug;
///
/// let slug = Slug::new(" trattoria-42 ").unwrap();
/// assert_eq!(slug.as_ref(), "trattoria-42");
/// assert!(Slug::new("Trattoria").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Slug(String);

impl Slug {
    /// Trim and validate a slug candidate.
    pub fn new(value: impl AsRef<str>) -> Result<Self, SlugValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if trimmed.chars().count() > SLUG_MAX {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX });
        }
        if !is_valid_slug(trimmed) {
            return Err(SlugValidationError::InvalidCharacters);
        }
        if RESERVED_SLUGS.contains(&trimmed) {
            return Err(SlugValidationError::Reserved {
                slug: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}
