//! Uploaded asset naming rules.
//!
//! Uploaded files are addressed by an object key of the form
//! `<folder>/<unix-millis>_<suffix>.<ext>`. Keys are generated server side;
//! the client only picks the folder and supplies the original file name so
//! the extension can be checked.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::slug::is_valid_slug;

/// Folder used when the client does not name one.
pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";

/// File types accepted for logos, dish photos and 3D models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetExtension {
    Png,
    Jpg,
    Jpeg,
    Gif,
    Webp,
    Svg,
    Glb,
    Gltf,
}

impl AssetExtension {
    pub fn parse(ext: &str) -> Option<Self> {
        let lowered = ext.to_ascii_lowercase();
        let ext = match lowered.as_str() {
            "png" => Self::Png,
            "jpg" => Self::Jpg,
            "jpeg" => Self::Jpeg,
            "gif" => Self::Gif,
            "webp" => Self::Webp,
            "svg" => Self::Svg,
            "glb" => Self::Glb,
            "gltf" => Self::Gltf,
            _ => return None,
        };
        Some(ext)
    }

    /// Extension of a file name, if it is one we accept.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        file_name
            .trim()
            .rsplit_once('.')
            .and_then(|(_, ext)| Self::parse(ext))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Svg => "svg",
            Self::Glb => "glb",
            Self::Gltf => "gltf",
        }
    }

    /// MIME type used when serving a stored file.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpg | Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Svg => "image/svg+xml",
            Self::Glb => "model/gltf-binary",
            Self::Gltf => "model/gltf+json",
        }
    }
}

/// Why an upload request or object key was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadValidationError {
    InvalidFolder,
    UnsupportedFileType,
    InvalidKey,
}

impl UploadValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidFolder => "folder",
            Self::UnsupportedFileType => "fileName",
            Self::InvalidKey => "key",
        }
    }
}

impl fmt::Display for UploadValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFolder => write!(
                f,
                "folder may only contain lowercase letters, digits, and hyphens"
            ),
            Self::UnsupportedFileType => write!(
                f,
                "file type must be one of png, jpg, jpeg, gif, webp, svg, glb, gltf"
            ),
            Self::InvalidKey => write!(f, "object key is malformed"),
        }
    }
}

impl std::error::Error for UploadValidationError {}

/// Validated upload target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    folder: String,
    extension: AssetExtension,
}

impl UploadRequest {
    pub fn try_new(folder: Option<&str>, file_name: &str) -> Result<Self, UploadValidationError> {
        let folder = folder
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_FOLDER);
        if !is_valid_slug(folder) {
            return Err(UploadValidationError::InvalidFolder);
        }
        let extension = AssetExtension::from_file_name(file_name)
            .ok_or(UploadValidationError::UnsupportedFileType)?;
        Ok(Self {
            folder: folder.to_owned(),
            extension,
        })
    }

    pub fn folder(&self) -> &str {
        self.folder.as_str()
    }

    pub fn extension(&self) -> AssetExtension {
        self.extension
    }

    /// Object key for this upload given a timestamp and random suffix.
    pub fn object_key(&self, unix_millis: i64, suffix: &str) -> ObjectKey {
        ObjectKey {
            raw: format!(
                "{}/{unix_millis}_{suffix}.{}",
                self.folder,
                self.extension.as_str()
            ),
            extension: self.extension,
        }
    }
}

/// Relative key of a stored asset.
///
/// Keys are one or more `/`-separated segments of ASCII letters, digits, `-`,
/// `_` and `.`; no segment may be empty or start with a dot, and the final
/// segment carries an accepted extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    raw: String,
    extension: AssetExtension,
}

impl ObjectKey {
    pub fn parse(raw: &str) -> Result<Self, UploadValidationError> {
        let segments_ok = !raw.is_empty()
            && raw.split('/').all(|segment| {
                !segment.is_empty()
                    && !segment.starts_with('.')
                    && segment
                        .chars()
                        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
            });
        if !segments_ok {
            return Err(UploadValidationError::InvalidKey);
        }
        let extension =
            AssetExtension::from_file_name(raw).ok_or(UploadValidationError::InvalidKey)?;
        Ok(Self {
            raw: raw.to_owned(),
            extension,
        })
    }

    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    pub fn extension(&self) -> AssetExtension {
        self.extension
    }

    /// Directory part of the key, if any.
    pub fn parent(&self) -> Option<&str> {
        self.raw.rsplit_once('/').map(|(parent, _)| parent)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredAsset {
    #[schema(example = "menu-items/1718000000000_k3j9x2a1qz.glb")]
    pub key: String,
    #[schema(example = "http://localhost:8080/uploads/menu-items/1718000000000_k3j9x2a1qz.glb")]
    pub url: String,
}

/// Bytes of a stored asset with the type it should be served as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetContent {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "pizza.GLB", "uploads", AssetExtension::Glb)]
    #[case(Some("logos"), "brand.svg", "logos", AssetExtension::Svg)]
    #[case(Some("  "), "photo.jpeg", "uploads", AssetExtension::Jpeg)]
    fn accepts_known_extensions(
        #[case] folder: Option<&str>,
        #[case] file_name: &str,
        #[case] expected_folder: &str,
        #[case] expected_ext: AssetExtension,
    ) {
        let request = UploadRequest::try_new(folder, file_name).expect("valid upload");
        assert_eq!(request.folder(), expected_folder);
        assert_eq!(request.extension(), expected_ext);
    }

    #[rstest]
    #[case(Some("../etc"), "a.png", UploadValidationError::InvalidFolder)]
    #[case(Some("Logos"), "a.png", UploadValidationError::InvalidFolder)]
    #[case(None, "script.exe", UploadValidationError::UnsupportedFileType)]
    #[case(None, "noextension", UploadValidationError::UnsupportedFileType)]
    fn rejects_bad_requests(
        #[case] folder: Option<&str>,
        #[case] file_name: &str,
        #[case] expected: UploadValidationError,
    ) {
        assert_eq!(UploadRequest::try_new(folder, file_name), Err(expected));
    }

    #[rstest]
    fn object_key_uses_folder_time_and_suffix() {
        let request = UploadRequest::try_new(Some("menu-items"), "dish.glb").expect("valid");
        let key = request.object_key(1_718_000_000_000, "abc123");
        assert_eq!(key.as_str(), "menu-items/1718000000000_abc123.glb");
        assert_eq!(key.parent(), Some("menu-items"));
        assert_eq!(ObjectKey::parse(key.as_str()), Ok(key));
    }

    #[rstest]
    #[case("../secret.png")]
    #[case("uploads/../../x.png")]
    #[case("/abs/path.png")]
    #[case("uploads//double.png")]
    #[case("uploads/.hidden.png")]
    #[case("uploads/readme.txt")]
    #[case("uploads/space name.png")]
    fn object_key_rejects_traversal_and_unknown_types(#[case] raw: &str) {
        assert_eq!(ObjectKey::parse(raw), Err(UploadValidationError::InvalidKey));
    }

    #[rstest]
    fn content_types_cover_models() {
        assert_eq!(AssetExtension::Glb.content_type(), "model/gltf-binary");
        assert_eq!(AssetExtension::Gltf.content_type(), "model/gltf+json");
    }
}
