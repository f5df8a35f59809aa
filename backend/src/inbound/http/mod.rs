//! HTTP inbound adapter exposing REST endpoints.
//!
//! [`configure_api`] registers everything mounted under `/api/v1`;
//! [`configure_public`] registers the unauthenticated routes served from the
//! site root (health probes and uploaded files).

pub mod auth;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod menu_items;
pub mod relay;
pub mod restaurants;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod uploads;
mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api/v1` handlers on a scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(relay::relay_asset)
        .service(relay::relay_preflight)
        .service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::me)
        .configure(restaurants::configure)
        .configure(menu_items::configure)
        .service(uploads::upload_asset);
}

/// Register the root-level routes that sit outside `/api/v1`.
pub fn configure_public(cfg: &mut web::ServiceConfig) {
    cfg.service(health::ready)
        .service(health::live)
        .service(uploads::serve_upload);
}
