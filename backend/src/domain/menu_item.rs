//! Menu items, their prices and categories.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use super::asset_url::{AssetUrl, AssetUrlError, optional_asset_url};
use super::name::{EntityName, NameValidationError, optional_text};
use super::restaurant::RestaurantId;

/// Maximum number of characters in a custom category label.
pub const CATEGORY_MAX: usize = 40;

/// Opaque menu item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MenuItemId(Uuid);

impl MenuItemId {
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

impl FromStr for MenuItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Price as submitted by a client: either a JSON number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceValidationError {
    NotANumber,
    NotFinite,
    Negative,
}

impl fmt::Display for PriceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "price must be a number"),
            Self::NotFinite => write!(f, "price must be finite"),
            Self::Negative => write!(f, "price must not be negative"),
        }
    }
}

impl std::error::Error for PriceValidationError {}

/// Non-negative, finite menu price.
///
/// # Examples
/// ```
/// use backend::domain::{Price, PriceInput};
///
/// let price = Price::try_from(PriceInput::Text("12.5".into())).unwrap();
/// assert_eq!(price.value(), 12.5);
/// assert_eq!(price.to_string(), "$12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn try_new(value: f64) -> Result<Self, PriceValidationError> {
        if !value.is_finite() {
            return Err(PriceValidationError::NotFinite);
        }
        if value < 0.0 {
            return Err(PriceValidationError::Negative);
        }
        // normalise -0.0
        Ok(Self(value + 0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<PriceInput> for Price {
    type Error = PriceValidationError;

    fn try_from(input: PriceInput) -> Result<Self, Self::Error> {
        match input {
            PriceInput::Number(value) => Self::try_new(value),
            PriceInput::Text(text) => {
                let value = text
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| PriceValidationError::NotANumber)?;
                Self::try_new(value)
            }
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryValidationError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "category must not be empty"),
            Self::TooLong { max } => write!(f, "category must be at most {max} characters"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Menu section a dish is listed under.
///
/// The four well-known sections are recognised case-insensitively (with `_`
/// or `-` accepted in place of spaces); any other label is kept verbatim as a
/// custom section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Appetizers,
    MainCourse,
    Desserts,
    Beverages,
    Custom(String),
}

impl Category {
    pub fn parse(value: &str) -> Result<Self, CategoryValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CategoryValidationError::Empty);
        }
        let folded = trimmed.to_lowercase().replace(['_', '-'], " ");
        let known = match folded.as_str() {
            "appetizers" => Some(Self::Appetizers),
            "main course" => Some(Self::MainCourse),
            "desserts" => Some(Self::Desserts),
            "beverages" => Some(Self::Beverages),
            _ => None,
        };
        if let Some(category) = known {
            return Ok(category);
        }
        if trimmed.chars().count() > CATEGORY_MAX {
            return Err(CategoryValidationError::TooLong { max: CATEGORY_MAX });
        }
        Ok(Self::Custom(trimmed.to_owned()))
    }

    /// Label shown to diners and stored by persistence adapters.
    pub fn label(&self) -> &str {
        match self {
            Self::Appetizers => "Appetizers",
            Self::MainCourse => "Main Course",
            Self::Desserts => "Desserts",
            Self::Beverages => "Beverages",
            Self::Custom(label) => label.as_str(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A dish on a restaurant's menu.
///
/// Serialises with camelCase keys plus a derived `formattedPrice` string.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub restaurant_id: RestaurantId,
    pub name: EntityName,
    pub description: Option<String>,
    pub price: Price,
    pub category: Category,
    pub image_url: Option<AssetUrl>,
    pub model3d_url: Option<AssetUrl>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Serialize for MenuItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MenuItem", 12)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("restaurantId", &self.restaurant_id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("price", &self.price)?;
        state.serialize_field("formattedPrice", &self.price.to_string())?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("imageUrl", &self.image_url)?;
        state.serialize_field("model3dUrl", &self.model3d_url)?;
        state.serialize_field("featured", &self.featured)?;
        state.serialize_field("createdAt", &self.created_at)?;
        state.serialize_field("updatedAt", &self.updated_at)?;
        state.end()
    }
}

impl MenuItem {
    pub fn from_draft(draft: MenuItemDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: MenuItemId::random(),
            restaurant_id: draft.restaurant_id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            image_url: draft.image_url,
            model3d_url: draft.model3d_url,
            featured: draft.featured,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn patched(mut self, patch: MenuItemPatch, now: DateTime<Utc>) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(model3d_url) = patch.model3d_url {
            self.model3d_url = model3d_url;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        self.updated_at = now;
        self
    }
}

/// Raw, unvalidated menu item form values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<PriceInput>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub model3d_url: Option<String>,
    pub featured: Option<bool>,
}

/// Field-level validation failures for menu item forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItemValidationError {
    RestaurantId,
    Name(NameValidationError),
    DescriptionTooLong { max: usize },
    MissingPrice,
    Price(PriceValidationError),
    Category(CategoryValidationError),
    ImageUrl(AssetUrlError),
    ModelUrl(AssetUrlError),
}

impl MenuItemValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::RestaurantId => "restaurantId",
            Self::Name(_) => "name",
            Self::DescriptionTooLong { .. } => "description",
            Self::MissingPrice | Self::Price(_) => "price",
            Self::Category(_) => "category",
            Self::ImageUrl(_) => "imageUrl",
            Self::ModelUrl(_) => "model3dUrl",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::RestaurantId => "invalid_restaurant_id",
            Self::Name(NameValidationError::Empty) => "empty_name",
            Self::Name(NameValidationError::TooLong { .. }) => "name_too_long",
            Self::DescriptionTooLong { .. } => "description_too_long",
            Self::MissingPrice => "missing_price",
            Self::Price(PriceValidationError::Negative) => "negative_price",
            Self::Price(_) => "invalid_price",
            Self::Category(_) => "invalid_category",
            Self::ImageUrl(_) | Self::ModelUrl(_) => "invalid_url",
        }
    }
}

impl fmt::Display for MenuItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RestaurantId => write!(f, "restaurantId must be a valid identifier"),
            Self::Name(err) => err.fmt(f),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
            Self::MissingPrice => write!(f, "price is required"),
            Self::Price(err) => err.fmt(f),
            Self::Category(err) => err.fmt(f),
            Self::ImageUrl(err) => write!(f, "image {err}"),
            Self::ModelUrl(err) => write!(f, "3D model {err}"),
        }
    }
}

impl std::error::Error for MenuItemValidationError {}

/// Validated values for a new menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemDraft {
    pub restaurant_id: RestaurantId,
    pub name: EntityName,
    pub description: Option<String>,
    pub price: Price,
    pub category: Category,
    pub image_url: Option<AssetUrl>,
    pub model3d_url: Option<AssetUrl>,
    pub featured: bool,
}

fn validated_category(raw: Option<&str>) -> Result<Option<Category>, MenuItemValidationError> {
    raw.map(Category::parse)
        .transpose()
        .map_err(MenuItemValidationError::Category)
}

impl MenuItemDraft {
    /// Validate a create form.
    ///
    /// `restaurant_id`, `name` and `price` are required. A missing or blank
    /// category falls back to [`Category::Appetizers`].
    pub fn try_new(
        restaurant_id: Option<&str>,
        fields: MenuItemFields,
    ) -> Result<Self, MenuItemValidationError> {
        let restaurant_id = restaurant_id
            .and_then(|raw| raw.parse::<RestaurantId>().ok())
            .ok_or(MenuItemValidationError::RestaurantId)?;
        let name = EntityName::new(fields.name.unwrap_or_default())
            .map_err(MenuItemValidationError::Name)?;
        let description = optional_text(fields.description.as_deref())
            .map_err(|max| MenuItemValidationError::DescriptionTooLong { max })?;
        let price = fields
            .price
            .ok_or(MenuItemValidationError::MissingPrice)
            .and_then(|input| Price::try_from(input).map_err(MenuItemValidationError::Price))?;
        let category = fields
            .category
            .as_deref()
            .filter(|raw| !raw.trim().is_empty());
        let category = validated_category(category)?.unwrap_or_default();
        let image_url = optional_asset_url(fields.image_url.as_deref())
            .map_err(MenuItemValidationError::ImageUrl)?;
        let model3d_url = optional_asset_url(fields.model3d_url.as_deref())
            .map_err(MenuItemValidationError::ModelUrl)?;
        Ok(Self {
            restaurant_id,
            name,
            description,
            price,
            category,
            image_url,
            model3d_url,
            featured: fields.featured.unwrap_or(false),
        })
    }
}

/// Validated partial update for a menu item.
///
/// Absent fields keep their stored value; blank description or asset URLs
/// clear the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemPatch {
    pub name: Option<EntityName>,
    pub description: Option<Option<String>>,
    pub price: Option<Price>,
    pub category: Option<Category>,
    pub image_url: Option<Option<AssetUrl>>,
    pub model3d_url: Option<Option<AssetUrl>>,
    pub featured: Option<bool>,
}

impl MenuItemPatch {
    pub fn try_new(fields: MenuItemFields) -> Result<Self, MenuItemValidationError> {
        let name = fields
            .name
            .map(EntityName::new)
            .transpose()
            .map_err(MenuItemValidationError::Name)?;
        let description = fields
            .description
            .map(|text| optional_text(Some(&text)))
            .transpose()
            .map_err(|max| MenuItemValidationError::DescriptionTooLong { max })?;
        let price = fields
            .price
            .map(Price::try_from)
            .transpose()
            .map_err(MenuItemValidationError::Price)?;
        let category = validated_category(fields.category.as_deref())?;
        let image_url = fields
            .image_url
            .map(|url| optional_asset_url(Some(&url)))
            .transpose()
            .map_err(MenuItemValidationError::ImageUrl)?;
        let model3d_url = fields
            .model3d_url
            .map(|url| optional_asset_url(Some(&url)))
            .transpose()
            .map_err(MenuItemValidationError::ModelUrl)?;
        Ok(Self {
            name,
            description,
            price,
            category,
            image_url,
            model3d_url,
            featured: fields.featured,
        })
    }
}
