//! OpenAPI schema definitions for domain types with hand-written serialisers.
//!
//! `Error`, `MenuItem` and the public menu payloads serialise through custom
//! or DTO-backed implementations, so their schemas are registered here
//! rather than derived on the domain types.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not the owner of the resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Duplicate slug or email.
    #[schema(rename = "conflict")]
    Conflict,
    /// Upload body exceeds the configured limit.
    #[schema(rename = "payload_too_large")]
    PayloadTooLarge,
    /// A relayed asset could not be fetched.
    #[schema(rename = "upstream_failure")]
    UpstreamFailure,
    /// A backing dependency is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "name must not be empty")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` response header.
    #[schema(example = "8f14e45f-ceea-467f-a0e6-2f0a4e1b9c3d")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field":"slug","code":"invalid_slug"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::MenuItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MenuItem)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MenuItemSchema {
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    id: String,
    restaurant_id: String,
    #[schema(example = "Margherita")]
    name: String,
    description: Option<String>,
    #[schema(example = 12.5)]
    price: f64,
    /// Read-only display form of `price`.
    #[schema(example = "$12.50")]
    formatted_price: String,
    #[schema(example = "Main Course")]
    category: String,
    image_url: Option<String>,
    #[schema(rename = "model3dUrl")]
    model3d_url: Option<String>,
    featured: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// OpenAPI schema for [`crate::domain::MenuSection`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MenuSection)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MenuSectionSchema {
    #[schema(example = "Desserts")]
    category: String,
    items: Vec<MenuItemSchema>,
}

/// OpenAPI schema for [`crate::domain::PublicMenu`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PublicMenu)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PublicMenuSchema {
    restaurant: crate::domain::Restaurant,
    menu_items: Vec<MenuItemSchema>,
    sections: Vec<MenuSectionSchema>,
    featured: Vec<MenuItemSchema>,
}
