//! Restaurant handlers.
//!
//! ```text
//! GET    /api/v1/restaurants
//! GET    /api/v1/restaurants/mine
//! POST   /api/v1/restaurants {"name":"Trattoria Roma","slug":"trattoria-roma"}
//! GET    /api/v1/restaurants/by-id/{id}
//! PUT    /api/v1/restaurants/by-id/{id} {"description":"Family run"}
//! DELETE /api/v1/restaurants/by-id/{id}
//! GET    /api/v1/restaurants/{slug}
//! GET    /api/v1/restaurants/{slug}/qr-code
//! ```
//!
//! `mine` and `by-id` are reserved slugs, so these routes never shadow a
//! restaurant's public page.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    MenuLink, PublicMenu, Restaurant, RestaurantDraft, RestaurantFields, RestaurantId,
    RestaurantPatch,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, PublicMenuSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_path_id, restaurant_form_error};

/// Create or update form. Every field is optional on update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRequest {
    #[schema(example = "Trattoria Roma")]
    pub name: Option<String>,
    #[schema(example = "trattoria-roma")]
    pub slug: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl From<RestaurantRequest> for RestaurantFields {
    fn from(value: RestaurantRequest) -> Self {
        Self {
            name: value.name,
            slug: value.slug,
            description: value.description,
            logo_url: value.logo_url,
        }
    }
}

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub ok: bool,
    pub id: String,
}

impl DeletedResponse {
    pub fn new(id: impl ToString) -> Self {
        Self {
            ok: true,
            id: id.to_string(),
        }
    }
}

/// Every restaurant, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/restaurants",
    responses(
        (status = 200, description = "Restaurants", body = [Restaurant]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "listRestaurants",
    security([])
)]
#[get("/restaurants")]
pub async fn list_restaurants(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Restaurant>>> {
    Ok(web::Json(state.restaurants.list().await?))
}

/// Restaurants owned by the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/mine",
    responses(
        (status = 200, description = "Owned restaurants", body = [Restaurant]),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "listMyRestaurants"
)]
#[get("/restaurants/mine")]
pub async fn list_my_restaurants(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let restaurants = state.restaurants.list_owned(&owner).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(restaurants))
}

#[utoipa::path(
    post,
    path = "/api/v1/restaurants",
    request_body = RestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", body = Restaurant),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 409, description = "Slug already taken", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "createRestaurant"
)]
#[post("/restaurants")]
pub async fn create_restaurant(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RestaurantRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft =
        RestaurantDraft::try_new(payload.into_inner().into()).map_err(restaurant_form_error)?;
    let restaurant = state.restaurants.create(&owner, draft).await?;
    Ok(HttpResponse::Created().json(restaurant))
}

#[utoipa::path(
    get,
    path = "/api/v1/restaurants/by-id/{id}",
    params(("id" = String, Path, description = "Restaurant identifier")),
    responses(
        (status = 200, description = "Restaurant", body = Restaurant),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "getRestaurant",
    security([])
)]
#[get("/restaurants/by-id/{id}")]
pub async fn get_restaurant(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Restaurant>> {
    let id: RestaurantId = parse_path_id(&path, "restaurant")?;
    Ok(web::Json(state.restaurants.get(&id).await?))
}

/// Owner-only partial update.
#[utoipa::path(
    put,
    path = "/api/v1/restaurants/by-id/{id}",
    params(("id" = String, Path, description = "Restaurant identifier")),
    request_body = RestaurantRequest,
    responses(
        (status = 200, description = "Updated restaurant", body = Restaurant),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Slug already taken", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "updateRestaurant"
)]
#[put("/restaurants/by-id/{id}")]
pub async fn update_restaurant(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RestaurantRequest>,
) -> ApiResult<web::Json<Restaurant>> {
    let caller = session.require_user_id()?;
    let id: RestaurantId = parse_path_id(&path, "restaurant")?;
    let patch =
        RestaurantPatch::try_new(payload.into_inner().into()).map_err(restaurant_form_error)?;
    Ok(web::Json(state.restaurants.update(&caller, &id, patch).await?))
}

/// Owner-only delete; the restaurant's menu items go with it.
#[utoipa::path(
    delete,
    path = "/api/v1/restaurants/by-id/{id}",
    params(("id" = String, Path, description = "Restaurant identifier")),
    responses(
        (status = 200, description = "Deleted, or already absent", body = DeletedResponse),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "deleteRestaurant"
)]
#[delete("/restaurants/by-id/{id}")]
pub async fn delete_restaurant(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let caller = session.require_user_id()?;
    let id: RestaurantId = parse_path_id(&path, "restaurant")?;
    state.restaurants.delete(&caller, &id).await?;
    Ok(web::Json(DeletedResponse::new(id)))
}

/// Public menu page: restaurant, items by category, and featured dishes.
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{slug}",
    params(("slug" = String, Path, description = "Restaurant slug")),
    responses(
        (status = 200, description = "Public menu", body = PublicMenuSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "getRestaurantMenu",
    security([])
)]
#[get("/restaurants/{slug}")]
pub async fn restaurant_menu(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublicMenu>> {
    Ok(web::Json(state.restaurants.menu_by_slug(&path).await?))
}

/// Shareable menu URL and QR image.
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{slug}/qr-code",
    params(("slug" = String, Path, description = "Restaurant slug")),
    responses(
        (status = 200, description = "Menu link", body = MenuLink),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "getRestaurantQrCode",
    security([])
)]
#[get("/restaurants/{slug}/qr-code")]
pub async fn restaurant_qr_code(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MenuLink>> {
    Ok(web::Json(state.restaurants.menu_link(&path).await?))
}

/// Register the handlers in match order.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_restaurants)
        .service(list_my_restaurants)
        .service(create_restaurant)
        .service(get_restaurant)
        .service(update_restaurant)
        .service(delete_restaurant)
        .service(restaurant_qr_code)
        .service(restaurant_menu);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockRestaurantCatalogue;
    use crate::domain::{Error, UserId};
    use crate::inbound::http::session::USER_ID_KEY;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::state::test_ports::mock_ports;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::{DateTime, Utc};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};
    use std::sync::Arc;

    const OWNER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[fixture]
    fn roma() -> Restaurant {
        let draft = RestaurantDraft::try_new(RestaurantFields {
            name: Some("Trattoria Roma".to_owned()),
            slug: Some("trattoria-roma".to_owned()),
            ..RestaurantFields::default()
        })
        .expect("valid draft");
        let owner = UserId::new(OWNER).expect("fixture id");
        Restaurant::from_draft(owner, draft, DateTime::<Utc>::UNIX_EPOCH)
    }

    async fn sign_in(session: Session) -> HttpResponse {
        session.insert(USER_ID_KEY, OWNER).expect("session insert");
        HttpResponse::Ok().finish()
    }

    fn state_with(restaurants: MockRestaurantCatalogue) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            restaurants: Arc::new(restaurants),
            ..mock_ports()
        }))
    }

    macro_rules! restaurant_app {
        ($state:expr) => {
            test::init_service(
                App::new().app_data($state).service(
                    web::scope("/api/v1")
                        .wrap(test_session_middleware())
                        .route("/test-login", web::get().to(sign_in))
                        .configure(configure),
                ),
            )
            .await
        };
    }

    macro_rules! login_cookie {
        ($app:expr) => {{
            let res = test::call_service(
                &$app,
                test::TestRequest::get().uri("/api/v1/test-login").to_request(),
            )
            .await;
            session_cookie(&res)
        }};
    }

    #[rstest]
    #[actix_web::test]
    async fn list_is_public(roma: Restaurant) {
        let mut restaurants = MockRestaurantCatalogue::new();
        restaurants
            .expect_list()
            .times(1)
            .return_once(move || Ok(vec![roma]));
        let app = restaurant_app!(state_with(restaurants));

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/restaurants").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body[0]["slug"], "trattoria-roma");
        assert_eq!(body[0]["ownerId"], OWNER);
    }

    #[rstest]
    #[actix_web::test]
    async fn mine_route_is_not_treated_as_slug() {
        let mut restaurants = MockRestaurantCatalogue::new();
        restaurants.expect_menu_by_slug().times(0);
        let app = restaurant_app!(state_with(restaurants));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/restaurants/mine")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_requires_session() {
        let mut restaurants = MockRestaurantCatalogue::new();
        restaurants.expect_create().times(0);
        let app = restaurant_app!(state_with(restaurants));

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/restaurants")
                .set_json(json!({"name": "Roma", "slug": "roma"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_returns_201_for_owner(roma: Restaurant) {
        let mut restaurants = MockRestaurantCatalogue::new();
        restaurants
            .expect_create()
            .withf(|owner, draft| owner.to_string() == OWNER && draft.slug.as_ref() == "trattoria-roma")
            .return_once(move |_, _| Ok(roma));
        let app = restaurant_app!(state_with(restaurants));
        let cookie = login_cookie!(app);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/restaurants")
                .cookie(cookie)
                .set_json(json!({"name": "Trattoria Roma", "slug": "trattoria-roma"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_reports_field_errors() {
        let mut restaurants = MockRestaurantCatalogue::new();
        restaurants.expect_create().times(0);
        let app = restaurant_app!(state_with(restaurants));
        let cookie = login_cookie!(app);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/restaurants")
                .cookie(cookie)
                .set_json(json!({"name": "Roma", "slug": "mine"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "slug");
        assert_eq!(body["details"]["code"], "reserved_slug");
    }

    #[rstest]
    #[actix_web::test]
    async fn update_by_non_owner_is_forbidden(roma: Restaurant) {
        let id = roma.id;
        let mut restaurants = MockRestaurantCatalogue::new();
        restaurants
            .expect_update()
            .withf(move |_, target, patch| *target == id && patch.name.is_some())
            .return_once(|_, _, _| Err(Error::forbidden("not the owner of this restaurant")));
        let app = restaurant_app!(state_with(restaurants));
        let cookie = login_cookie!(app);

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/api/v1/restaurants/by-id/{id}"))
                .cookie(cookie)
                .set_json(json!({"name": "Roma Due"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_acknowledges_with_id() {
        let id = RestaurantId::random();
        let mut restaurants = MockRestaurantCatalogue::new();
        restaurants
            .expect_delete()
            .withf(move |_, target| *target == id)
            .return_once(|_, _| Ok(()));
        let app = restaurant_app!(state_with(restaurants));
        let cookie = login_cookie!(app);

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/v1/restaurants/by-id/{id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"ok": true, "id": id.to_string()}));
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_id_is_not_found() {
        let mut restaurants = MockRestaurantCatalogue::new();
        restaurants.expect_get().times(0);
        let app = restaurant_app!(state_with(restaurants));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/restaurants/by-id/not-a-uuid")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn qr_code_route_resolves_slug(roma: Restaurant) {
        let link = MenuLink::for_restaurant("http://localhost:8080", &roma);
        let mut restaurants = MockRestaurantCatalogue::new();
        restaurants
            .expect_menu_link()
            .withf(|slug| slug == "trattoria-roma")
            .return_once(move |_| Ok(link));
        let app = restaurant_app!(state_with(restaurants));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/restaurants/trattoria-roma/qr-code")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body["menuUrl"],
            "http://localhost:8080/restaurant/trattoria-roma"
        );
        assert_eq!(body["downloadFileName"], "Trattoria-Roma-qr.png");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_slug_is_not_found() {
        let mut restaurants = MockRestaurantCatalogue::new();
        restaurants
            .expect_menu_by_slug()
            .return_once(|_| Err(Error::not_found("restaurant not found")));
        let app = restaurant_app!(state_with(restaurants));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/restaurants/nowhere")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
