//! Absolute `http`/`https` URLs pointing at externally hosted assets.
//!
//! Logo, dish image, and 3D model references are stored as opaque absolute
//! URLs. The asset relay dereferences the same type, so the scheme guard here
//! is what keeps the relay from touching `file:`, `data:` or other schemes.

use std::fmt;

use serde::Serialize;
use url::Url;

/// Reasons a candidate asset URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetUrlError {
    Empty,
    UnsupportedScheme,
    Malformed { reason: String },
}

impl fmt::Display for AssetUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "url must not be empty"),
            Self::UnsupportedScheme => write!(f, "url must start with http:// or https://"),
            Self::Malformed { reason } => write!(f, "url is malformed: {reason}"),
        }
    }
}

impl std::error::Error for AssetUrlError {}

fn has_http_prefix(value: &str) -> bool {
    let lowered = value
        .get(..8)
        .unwrap_or(value)
        .to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

/// Validated absolute asset URL.
///
/// # Examples
/// ```
/// use backend::domain::AssetUrl;
///
/// let url = AssetUrl::parse("https://cdn.example.com/models/pizza.glb").unwrap();
/// assert_eq!(url.as_str(), "https://cdn.example.com/models/pizza.glb");
/// assert!(AssetUrl::parse("ftp://cdn.example.com/pizza.glb").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct AssetUrl(Url);

impl AssetUrl {
    /// Parse an absolute `http` or `https` URL.
    ///
    /// The scheme prefix is checked case-insensitively before the URL parser
    /// runs, and the parsed URL must carry a host.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, AssetUrlError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AssetUrlError::Empty);
        }
        if !has_http_prefix(trimmed) {
            return Err(AssetUrlError::UnsupportedScheme);
        }
        let url = Url::parse(trimmed).map_err(|err| AssetUrlError::Malformed {
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AssetUrlError::UnsupportedScheme);
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(AssetUrlError::Malformed {
                reason: "missing host".to_owned(),
            });
        }
        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Borrow the parsed URL for adapters that need it.
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for AssetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<AssetUrl> for String {
    fn from(value: AssetUrl) -> Self {
        value.0.into()
    }
}

/// Normalise an optional URL field: blank input becomes `None`.
pub(crate) fn optional_asset_url(value: Option<&str>) -> Result<Option<AssetUrl>, AssetUrlError> {
    match value.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => AssetUrl::parse(text).map(Some),
        None => Ok(None),
    }
}
