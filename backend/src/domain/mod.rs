//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed restaurant, menu and account model used
//! by the HTTP and persistence adapters, plus the services that implement the
//! driving ports in [`ports`]. Types validate on construction and document
//! their serialisation contract (camelCase JSON) in their Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic error payload.
//! - `Restaurant`, `MenuItem`, `User`: aggregates returned by the API.
//! - `RestaurantDraft`, `MenuItemDraft` and their patches: typed admin forms.
//! - `AssetRelayService`, `RestaurantService`, `MenuItemService`,
//!   `PasswordAccountService`, `UploadService`: driving-port implementations.

pub mod account_service;
pub mod asset_url;
pub mod auth;
pub mod error;
pub mod menu;
pub mod menu_item;
pub mod menu_item_service;
pub mod name;
pub mod ports;
pub mod qr_code;
pub mod relay;
pub mod restaurant;
pub mod restaurant_service;
pub mod slug;
pub mod trace_id;
pub mod upload;
pub mod upload_service;
pub mod user;

pub use self::account_service::PasswordAccountService;
pub use self::asset_url::{AssetUrl, AssetUrlError};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Registration,
    RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::menu::{MenuSection, PublicMenu};
pub use self::menu_item::{
    CATEGORY_MAX, Category, CategoryValidationError, MenuItem, MenuItemDraft, MenuItemFields,
    MenuItemId, MenuItemPatch, MenuItemValidationError, Price, PriceInput, PriceValidationError,
};
pub use self::menu_item_service::MenuItemService;
pub use self::name::{EntityName, NameValidationError};
pub use self::qr_code::MenuLink;
pub use self::relay::{AssetRelayService, FALLBACK_CONTENT_TYPE, RelayedAsset};
pub use self::restaurant::{
    Restaurant, RestaurantDraft, RestaurantFields, RestaurantId, RestaurantPatch,
    RestaurantValidationError,
};
pub use self::restaurant_service::RestaurantService;
pub use self::slug::{Slug, SlugValidationError};
pub use self::trace_id::TraceId;
pub use self::upload::{
    AssetContent, AssetExtension, ObjectKey, StoredAsset, UploadRequest, UploadValidationError,
};
pub use self::upload_service::UploadService;
pub use self::user::{DisplayName, EmailAddress, User, UserAccount, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
