//! Menu item handlers.
//!
//! ```text
//! GET    /api/v1/menu-items?restaurantId=<id>
//! POST   /api/v1/menu-items {"restaurantId":"…","name":"Tiramisu","price":"6.5"}
//! GET    /api/v1/menu-items/{id}
//! PUT    /api/v1/menu-items/{id} {"featured":true}
//! DELETE /api/v1/menu-items/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    MenuItem, MenuItemDraft, MenuItemFields, MenuItemId, MenuItemPatch, PriceInput, RestaurantId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::restaurants::DeletedResponse;
use crate::inbound::http::schemas::{ErrorSchema, MenuItemSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    field_error, menu_item_form_error, missing_field_error, parse_path_id,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MenuItemsQuery {
    /// Restaurant whose menu to list. Required.
    pub restaurant_id: Option<String>,
}

/// Create or update form. `restaurantId` is only read on create.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRequest {
    pub restaurant_id: Option<String>,
    #[schema(example = "Tiramisu")]
    pub name: Option<String>,
    pub description: Option<String>,
    /// A JSON number or numeric string.
    #[schema(value_type = Option<f64>, example = 6.5)]
    pub price: Option<PriceInput>,
    #[schema(example = "Desserts")]
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub model3d_url: Option<String>,
    pub featured: Option<bool>,
}

impl MenuItemRequest {
    fn into_parts(self) -> (Option<String>, MenuItemFields) {
        let fields = MenuItemFields {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image_url: self.image_url,
            model3d_url: self.model3d_url,
            featured: self.featured,
        };
        (self.restaurant_id, fields)
    }
}

/// Items of one restaurant, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/menu-items",
    params(MenuItemsQuery),
    responses(
        (status = 200, description = "Menu items", body = [MenuItemSchema]),
        (status = 400, description = "Missing or malformed restaurantId", body = ErrorSchema)
    ),
    tags = ["menu-items"],
    operation_id = "listMenuItems",
    security([])
)]
#[get("/menu-items")]
pub async fn list_menu_items(
    state: web::Data<HttpState>,
    query: web::Query<MenuItemsQuery>,
) -> ApiResult<web::Json<Vec<MenuItem>>> {
    let raw = query
        .into_inner()
        .restaurant_id
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error("restaurantId"))?;
    let restaurant_id: RestaurantId = raw.parse().map_err(|_| {
        field_error(
            "restaurantId",
            "invalid_restaurant_id",
            "restaurantId must be a valid identifier",
        )
    })?;
    Ok(web::Json(state.menu_items.list(&restaurant_id).await?))
}

/// Add a dish to a restaurant the caller owns.
#[utoipa::path(
    post,
    path = "/api/v1/menu-items",
    request_body = MenuItemRequest,
    responses(
        (status = 201, description = "Menu item created", body = MenuItemSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not the restaurant owner", body = ErrorSchema),
        (status = 404, description = "Restaurant not found", body = ErrorSchema)
    ),
    tags = ["menu-items"],
    operation_id = "createMenuItem"
)]
#[post("/menu-items")]
pub async fn create_menu_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MenuItemRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let (restaurant_id, fields) = payload.into_inner().into_parts();
    let draft =
        MenuItemDraft::try_new(restaurant_id.as_deref(), fields).map_err(menu_item_form_error)?;
    let item = state.menu_items.create(&caller, draft).await?;
    Ok(HttpResponse::Created().json(item))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item identifier")),
    responses(
        (status = 200, description = "Menu item", body = MenuItemSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["menu-items"],
    operation_id = "getMenuItem",
    security([])
)]
#[get("/menu-items/{id}")]
pub async fn get_menu_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MenuItem>> {
    let id: MenuItemId = parse_path_id(&path, "menu item")?;
    Ok(web::Json(state.menu_items.get(&id).await?))
}

/// Owner-only partial update.
#[utoipa::path(
    put,
    path = "/api/v1/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item identifier")),
    request_body = MenuItemRequest,
    responses(
        (status = 200, description = "Updated menu item", body = MenuItemSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not the restaurant owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["menu-items"],
    operation_id = "updateMenuItem"
)]
#[put("/menu-items/{id}")]
pub async fn update_menu_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<MenuItemRequest>,
) -> ApiResult<web::Json<MenuItem>> {
    let caller = session.require_user_id()?;
    let id: MenuItemId = parse_path_id(&path, "menu item")?;
    let (_, fields) = payload.into_inner().into_parts();
    let patch = MenuItemPatch::try_new(fields).map_err(menu_item_form_error)?;
    Ok(web::Json(state.menu_items.update(&caller, &id, patch).await?))
}

/// Owner-only delete. Deleting an absent item succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/menu-items/{id}",
    params(("id" = String, Path, description = "Menu item identifier")),
    responses(
        (status = 200, description = "Deleted, or already absent", body = DeletedResponse),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not the restaurant owner", body = ErrorSchema)
    ),
    tags = ["menu-items"],
    operation_id = "deleteMenuItem"
)]
#[delete("/menu-items/{id}")]
pub async fn delete_menu_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let caller = session.require_user_id()?;
    let id: MenuItemId = parse_path_id(&path, "menu item")?;
    state.menu_items.delete(&caller, &id).await?;
    Ok(web::Json(DeletedResponse::new(id)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_menu_items)
        .service(create_menu_item)
        .service(get_menu_item)
        .service(update_menu_item)
        .service(delete_menu_item);
}
