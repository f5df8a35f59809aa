//! Restaurants and the typed forms used to create or edit them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::asset_url::{AssetUrl, AssetUrlError, optional_asset_url};
use super::name::{EntityName, NameValidationError, optional_text};
use super::slug::{Slug, SlugValidationError};
use super::user::UserId;

/// Opaque restaurant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RestaurantId(Uuid);

impl RestaurantId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for RestaurantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A published restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[schema(value_type = String, example = "0b6d3f0e-8b7e-4b5e-9c44-2f3f6fb1c8a1")]
    pub id: RestaurantId,
    #[schema(value_type = String)]
    pub owner_id: UserId,
    #[schema(value_type = String, example = "Trattoria Roma")]
    pub name: EntityName,
    #[schema(value_type = String, example = "trattoria-roma")]
    pub slug: Slug,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "https://cdn.example.com/logo.png")]
    pub logo_url: Option<AssetUrl>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    /// Materialise a new restaurant from a validated draft.
    pub fn from_draft(owner_id: UserId, draft: RestaurantDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: RestaurantId::random(),
            owner_id,
            name: draft.name,
            slug: draft.slug,
            description: draft.description,
            logo_url: draft.logo_url,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    /// Apply a patch, returning the updated record.
    #[must_use]
    pub fn patched(mut self, patch: RestaurantPatch, now: DateTime<Utc>) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(slug) = patch.slug {
            self.slug = slug;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(logo_url) = patch.logo_url {
            self.logo_url = logo_url;
        }
        self.updated_at = now;
        self
    }
}

/// Raw, unvalidated restaurant form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantFields {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

/// Field-level validation failures for restaurant forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestaurantValidationError {
    Name(NameValidationError),
    Slug(SlugValidationError),
    DescriptionTooLong { max: usize },
    LogoUrl(AssetUrlError),
}

impl RestaurantValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Slug(_) => "slug",
            Self::DescriptionTooLong { .. } => "description",
            Self::LogoUrl(_) => "logoUrl",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Name(NameValidationError::Empty) => "empty_name",
            Self::Name(NameValidationError::TooLong { .. }) => "name_too_long",
            Self::Slug(SlugValidationError::Reserved { .. }) => "reserved_slug",
            Self::Slug(_) => "invalid_slug",
            Self::DescriptionTooLong { .. } => "description_too_long",
            Self::LogoUrl(_) => "invalid_url",
        }
    }
}

impl fmt::Display for RestaurantValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(err) => err.fmt(f),
            Self::Slug(err) => err.fmt(f),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
            Self::LogoUrl(err) => write!(f, "logo {err}"),
        }
    }
}

impl std::error::Error for RestaurantValidationError {}

/// Validated values for a new restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantDraft {
    pub name: EntityName,
    pub slug: Slug,
    pub description: Option<String>,
    pub logo_url: Option<AssetUrl>,
}

impl RestaurantDraft {
    /// Validate a create form. `name` and `slug` are required.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{RestaurantDraft, RestaurantFields};
    ///
    /// let draft = RestaurantDraft::try_new(RestaurantFields {
    ///     name: Some("Trattoria Roma".into()),
    ///     slug: Some("trattoria-roma".into()),
    ///     ..RestaurantFields::default()
    /// })
    /// .unwrap();
    /// assert_eq!(draft.slug.as_ref(), "trattoria-roma");
    /// ```
    pub fn try_new(fields: RestaurantFields) -> Result<Self, RestaurantValidationError> {
        let name = EntityName::new(fields.name.unwrap_or_default())
            .map_err(RestaurantValidationError::Name)?;
        let slug =
            Slug::new(fields.slug.unwrap_or_default()).map_err(RestaurantValidationError::Slug)?;
        let description = optional_text(fields.description.as_deref())
            .map_err(|max| RestaurantValidationError::DescriptionTooLong { max })?;
        let logo_url = optional_asset_url(fields.logo_url.as_deref())
            .map_err(RestaurantValidationError::LogoUrl)?;
        Ok(Self {
            name,
            slug,
            description,
            logo_url,
        })
    }
}

/// Validated partial update for a restaurant.
///
/// Absent fields keep their stored value. A blank description or logo URL
/// clears the stored value; a blank name or slug is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantPatch {
    pub name: Option<EntityName>,
    pub slug: Option<Slug>,
    pub description: Option<Option<String>>,
    pub logo_url: Option<Option<AssetUrl>>,
}

impl RestaurantPatch {
    pub fn try_new(fields: RestaurantFields) -> Result<Self, RestaurantValidationError> {
        let name = fields
            .name
            .map(EntityName::new)
            .transpose()
            .map_err(RestaurantValidationError::Name)?;
        let slug = fields
            .slug
            .map(Slug::new)
            .transpose()
            .map_err(RestaurantValidationError::Slug)?;
        let description = fields
            .description
            .map(|text| optional_text(Some(&text)))
            .transpose()
            .map_err(|max| RestaurantValidationError::DescriptionTooLong { max })?;
        let logo_url = fields
            .logo_url
            .map(|url| optional_asset_url(Some(&url)))
            .transpose()
            .map_err(RestaurantValidationError::LogoUrl)?;
        Ok(Self {
            name,
            slug,
            description,
            logo_url,
        })
    }
}
