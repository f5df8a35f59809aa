//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint of the inbound HTTP adapter along
//! with the schemas they reference. Domain aggregates whose serialised shape
//! differs from their Rust shape (errors, menu items, public menus) are
//! described through the wrappers in [`crate::inbound::http::schemas`].
//!
//! The generated document backs Swagger UI in debug builds and is exported
//! by the `openapi-dump` binary.

use crate::domain::{MenuLink, Restaurant, StoredAsset, User};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::menu_items::MenuItemRequest;
use crate::inbound::http::restaurants::{DeletedResponse, RestaurantRequest};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, MenuItemSchema, MenuSectionSchema, PublicMenuSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login or /api/v1/auth/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Menu publishing backend API",
        description = "Restaurant and menu administration, public menus, QR links, \
                       uploads and a same-origin asset relay."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::restaurants::list_restaurants,
        crate::inbound::http::restaurants::list_my_restaurants,
        crate::inbound::http::restaurants::create_restaurant,
        crate::inbound::http::restaurants::get_restaurant,
        crate::inbound::http::restaurants::update_restaurant,
        crate::inbound::http::restaurants::delete_restaurant,
        crate::inbound::http::restaurants::restaurant_menu,
        crate::inbound::http::restaurants::restaurant_qr_code,
        crate::inbound::http::menu_items::list_menu_items,
        crate::inbound::http::menu_items::create_menu_item,
        crate::inbound::http::menu_items::get_menu_item,
        crate::inbound::http::menu_items::update_menu_item,
        crate::inbound::http::menu_items::delete_menu_item,
        crate::inbound::http::relay::relay_asset,
        crate::inbound::http::relay::relay_preflight,
        crate::inbound::http::uploads::upload_asset,
        crate::inbound::http::uploads::serve_upload,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        User,
        Restaurant,
        MenuItemSchema,
        MenuSectionSchema,
        PublicMenuSchema,
        MenuLink,
        StoredAsset,
        RegisterRequest,
        LoginRequest,
        RestaurantRequest,
        MenuItemRequest,
        DeletedResponse,
    )),
    tags(
        (name = "health", description = "Endpoints for health checks"),
        (name = "auth", description = "Owner registration and session management"),
        (name = "restaurants", description = "Restaurant administration and public menus"),
        (name = "menu-items", description = "Menu item administration"),
        (name = "relay", description = "Same-origin relay for remote assets"),
        (name = "uploads", description = "Asset uploads and downloads")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure and path registration.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const MENU_ITEM_SCHEMA_NAME: &str = "crate.domain.MenuItem";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(MENU_ITEM_SCHEMA_NAME, "formattedPrice")]
    #[case(MENU_ITEM_SCHEMA_NAME, "model3dUrl")]
    #[case("User", "email")]
    #[case("Restaurant", "slug")]
    #[case("MenuLink", "qrImageUrl")]
    fn schemas_use_camel_case_fields(#[case] schema_name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(schema_name).expect("schema registered");

        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/v1/proxy")]
    #[case("/api/v1/auth/me")]
    #[case("/api/v1/restaurants/{slug}/qr-code")]
    #[case("/api/v1/menu-items/{id}")]
    #[case("/uploads/{key}")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn session_cookie_scheme_is_declared() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
