//! Same-origin asset relay for browser-side 3D and image viewers.
//!
//! ```text
//! GET     /api/v1/proxy?url=https%3A%2F%2Fcdn.example.com%2Fdish.glb
//! OPTIONS /api/v1/proxy
//! ```
//!
//! Successful and relayed-error responses both carry a wildcard
//! `Access-Control-Allow-Origin`. Transport failures surface as JSON
//! `upstream_failure` errors rather than a relayed status.

use actix_web::http::StatusCode;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LENGTH, CONTENT_TYPE,
};
use actix_web::{HttpResponse, HttpResponseBuilder, get, options, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, RelayedAsset};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;

pub const ALLOWED_METHODS: &str = "GET,OPTIONS";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RelayQuery {
    /// Absolute `http` or `https` URL of the asset to fetch.
    pub url: Option<String>,
}

fn with_cors(mut builder: HttpResponseBuilder) -> HttpResponseBuilder {
    builder
        .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS));
    builder
}

/// Fetch a remote asset once and re-serve it same-origin.
#[utoipa::path(
    get,
    path = "/api/v1/proxy",
    params(RelayQuery),
    responses(
        (status = 200, description = "Upstream bytes with the upstream content type",
            headers(
                ("Access-Control-Allow-Origin" = String, description = "Always `*`"),
                ("Content-Length" = u64, description = "Buffered byte count")
            )),
        (status = 400, description = "Missing or invalid target URL", body = ErrorSchema),
        (status = 500, description = "Upstream unreachable", body = ErrorSchema),
        (status = "default", description = "Upstream error status and body, forwarded verbatim")
    ),
    tags = ["relay"],
    operation_id = "relayAsset",
    security([])
)]
#[get("/proxy")]
pub async fn relay_asset(
    state: web::Data<HttpState>,
    query: web::Query<RelayQuery>,
) -> ApiResult<HttpResponse> {
    let target = query
        .into_inner()
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| missing_field_error("url"))?;

    match state.relay.relay(&target).await? {
        RelayedAsset::Delivered { content_type, body } => {
            Ok(with_cors(HttpResponse::Ok())
                .insert_header((CONTENT_TYPE, content_type))
                .insert_header((CONTENT_LENGTH, body.len()))
                .body(body))
        }
        RelayedAsset::UpstreamRejected { status, body } => {
            let status = StatusCode::from_u16(status).map_err(|_| {
                Error::upstream_failure(format!("upstream returned invalid status {status}"))
            })?;
            Ok(with_cors(HttpResponse::build(status)).body(body))
        }
    }
}

/// CORS preflight for the relay.
#[utoipa::path(
    options,
    path = "/api/v1/proxy",
    responses((status = 204, description = "Preflight accepted")),
    tags = ["relay"],
    operation_id = "relayPreflight",
    security([])
)]
#[options("/proxy")]
pub async fn relay_preflight() -> HttpResponse {
    with_cors(HttpResponse::NoContent()).finish()
}
