//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::AppSettings;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{configure_api, configure_public};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Sessions outlive browser restarts for a week.
const SESSION_TTL_DAYS: i64 = 7;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::days(SESSION_TTL_DAYS)),
        )
        .build();

    let api = web::scope("/api/v1").wrap(session).configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .configure(configure_public);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing session, binding, storage
///   and relay settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the adapters cannot be built or binding
/// the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Tests for full application wiring over in-memory adapters.

    use super::config::UploadLimits;
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use backend::inbound::http::session_config::SessionSettings;
    use env_lock::lock_env;
    use ortho_config::OrthoConfig;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};
    use std::ffi::OsString;
    use tempfile::TempDir;

    #[fixture]
    fn upload_dir() -> TempDir {
        TempDir::new().expect("temp dir")
    }

    fn config(dir: &TempDir) -> ServerConfig {
        ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            "127.0.0.1:0".parse().expect("valid address"),
        )
        .with_uploads(UploadLimits {
            dir: dir.path().to_path_buf(),
            max_bytes: 1024,
        })
    }

    fn deps(config: &ServerConfig) -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(config).expect("state builds"),
            key: config.key.clone(),
            cookie_secure: config.cookie_secure,
            same_site: config.same_site,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn create_server_marks_ready(upload_dir: TempDir) {
        let health_state = web::Data::new(HealthState::new());
        assert!(!health_state.is_ready(), "state should start unready");

        let _server =
            create_server(health_state.clone(), config(&upload_dir)).expect("server should build");

        assert!(health_state.is_ready(), "server creation should mark readiness");
    }

    #[rstest]
    #[actix_web::test]
    async fn session_cookie_is_private_and_http_only(upload_dir: TempDir) {
        let config = config(&upload_dir);
        let app = test::init_service(build_app(deps(&config))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(json!({
                    "name": "Ada",
                    "email": "ada@example.com",
                    "password": "correct horse"
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().is_some(), "session should persist");
    }

    #[rstest]
    #[actix_web::test]
    async fn public_routes_sit_outside_the_api_scope(upload_dir: TempDir) {
        let config = config(&upload_dir);
        let app = test::init_service(build_app(deps(&config))).await;

        let live = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(live.status(), StatusCode::OK);

        let missing = test::call_service(
            &app,
            test::TestRequest::get().uri("/uploads/menu-items/1_x.png").to_request(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(missing).await;
        assert_eq!(body["code"], "not_found");
    }

    #[rstest]
    #[actix_web::test]
    async fn app_builds_from_settings_loaded_with_an_empty_environment(upload_dir: TempDir) {
        let settings = {
            let _guard = lock_env([
                ("MENU_BIND_ADDR", None),
                ("MENU_DATABASE_URL", None),
                ("MENU_PUBLIC_BASE_URL", None),
                ("MENU_RELAY_TIMEOUT_SECS", None),
                ("MENU_RELAY_MAX_BYTES", None),
                (
                    "MENU_UPLOAD_DIR",
                    Some(upload_dir.path().display().to_string()),
                ),
                ("MENU_UPLOAD_MAX_BYTES", None),
                ("MENU_DB_POOL_SIZE", None),
            ]);
            AppSettings::load_from_iter([OsString::from("menu-backend")])
                .expect("settings load without any variables")
        };
        assert!(settings.database_url().is_none());

        let session = SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        };
        let config = ServerConfig::from_settings(&settings, session).expect("default bind parses");
        assert_eq!(config.uploads.dir, upload_dir.path());
        assert_eq!(config.public_base_url, "http://localhost:8080");

        let app = test::init_service(build_app(deps(&config))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(json!({
                    "name": "Ada",
                    "email": "ada@example.com",
                    "password": "correct horse"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let ready = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(ready.status(), StatusCode::OK);
    }
}
