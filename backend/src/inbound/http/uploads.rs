//! Asset upload and download handlers.
//!
//! ```text
//! POST /api/v1/uploads?folder=menu-items&fileName=dish.glb   (raw file body)
//! GET  /uploads/menu-items/1718000000000_k3j9x2a1qz.glb
//! ```
//!
//! The upload body is read incrementally and abandoned as soon as it passes
//! the configured limit, so oversized files never sit fully in memory.

use actix_web::http::header::{CONTENT_LENGTH, CONTENT_SECURITY_POLICY, X_CONTENT_TYPE_OPTIONS};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use futures_util::StreamExt;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, StoredAsset, UploadRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, upload_error};

/// Uploaded files share the API origin, so scripts inside them (SVG) must
/// never run.
const UPLOAD_CSP: &str = "default-src 'none'; style-src 'unsafe-inline'; sandbox";

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// Target folder slug; defaults to `uploads`.
    pub folder: Option<String>,
    /// Original file name; only its extension is kept.
    pub file_name: Option<String>,
}

fn too_large(max: usize) -> Error {
    Error::payload_too_large(format!("upload exceeds the {max} byte limit"))
}

fn declared_length(request: &HttpRequest) -> Option<usize> {
    request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

async fn read_capped(mut payload: web::Payload, max: usize) -> Result<Vec<u8>, Error> {
    let mut body = Vec::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk
            .map_err(|err| Error::invalid_request(format!("failed to read upload body: {err}")))?;
        if body.len().saturating_add(chunk.len()) > max {
            return Err(too_large(max));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Store a file and return its public URL.
#[utoipa::path(
    post,
    path = "/api/v1/uploads",
    params(UploadQuery),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Stored", body = StoredAsset),
        (status = 400, description = "Unsupported file type or folder", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 413, description = "File too large", body = ErrorSchema)
    ),
    tags = ["uploads"],
    operation_id = "uploadAsset"
)]
#[post("/uploads")]
pub async fn upload_asset(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    query: web::Query<UploadQuery>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let uploader = session.require_user_id()?;
    let UploadQuery { folder, file_name } = query.into_inner();
    let file_name = file_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| missing_field_error("fileName"))?;
    let target = UploadRequest::try_new(folder.as_deref(), &file_name).map_err(upload_error)?;

    let max = state.uploads.max_bytes();
    if declared_length(&request).is_some_and(|len| len > max) {
        return Err(too_large(max));
    }
    let body = read_capped(payload, max).await?;
    let stored = state.uploads.upload(&uploader, &target, body).await?;
    Ok(HttpResponse::Created().json(stored))
}

/// Serve a stored file with a type inferred from its extension.
#[utoipa::path(
    get,
    path = "/uploads/{key}",
    params(("key" = String, Path, description = "Object key, may contain `/`")),
    responses(
        (status = 200, description = "File bytes"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["uploads"],
    operation_id = "getUploadedAsset",
    security([])
)]
#[get("/uploads/{key:.*}")]
pub async fn serve_upload(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let asset = state.uploads.open(&path).await?;
    Ok(HttpResponse::Ok()
        .content_type(asset.content_type)
        .insert_header((CONTENT_SECURITY_POLICY, UPLOAD_CSP))
        .insert_header((X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .body(asset.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AssetContent;
    use crate::domain::ports::MockAssetUploads;
    use crate::inbound::http::session::USER_ID_KEY;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::state::test_ports::mock_ports;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    async fn sign_in(session: Session) -> HttpResponse {
        session
            .insert(USER_ID_KEY, "3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .expect("session insert");
        HttpResponse::Ok().finish()
    }

    fn state_with(uploads: MockAssetUploads) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            uploads: Arc::new(uploads),
            ..mock_ports()
        }))
    }

    macro_rules! upload_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .service(
                        web::scope("/api/v1")
                            .wrap(test_session_middleware())
                            .route("/test-login", web::get().to(sign_in))
                            .service(upload_asset),
                    )
                    .service(serve_upload),
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
    async fn upload_returns_key_and_url() {
        let mut uploads = MockAssetUploads::new();
        uploads.expect_max_bytes().return_const(16_usize);
        uploads
            .expect_upload()
            .withf(|_, request, body| request.folder() == "menu-items" && body == b"glTF")
            .times(1)
            .return_once(|_, _, _| {
                Ok(StoredAsset {
                    key: "menu-items/1_abc.glb".to_owned(),
                    url: "http://localhost:8080/uploads/menu-items/1_abc.glb".to_owned(),
                })
            });
        let app = upload_app!(state_with(uploads));
        let cookie = login_cookie!(app);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/uploads?folder=menu-items&fileName=dish.glb")
                .cookie(cookie)
                .set_payload("glTF")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["key"], "menu-items/1_abc.glb");
    }

    #[rstest]
    #[actix_web::test]
    async fn oversized_upload_is_413() {
        let mut uploads = MockAssetUploads::new();
        uploads.expect_max_bytes().return_const(4_usize);
        uploads.expect_upload().times(0);
        let app = upload_app!(state_with(uploads));
        let cookie = login_cookie!(app);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/uploads?fileName=big.png")
                .cookie(cookie)
                .set_payload(vec![0_u8; 32])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "payload_too_large");
    }

    #[rstest]
    #[case("/api/v1/uploads?fileName=notes.txt", "fileName")]
    #[case("/api/v1/uploads", "fileName")]
    #[case("/api/v1/uploads?folder=../etc&fileName=a.png", "folder")]
    #[actix_web::test]
    async fn invalid_targets_are_rejected(#[case] uri: &str, #[case] field: &str) {
        let mut uploads = MockAssetUploads::new();
        uploads.expect_max_bytes().return_const(16_usize);
        uploads.expect_upload().times(0);
        let app = upload_app!(state_with(uploads));
        let cookie = login_cookie!(app);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(uri)
                .cookie(cookie)
                .set_payload("x")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn upload_requires_session() {
        let app = upload_app!(state_with(MockAssetUploads::new()));
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/uploads?fileName=a.png")
                .set_payload("x")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn serve_uses_nested_key_and_content_type() {
        let mut uploads = MockAssetUploads::new();
        uploads
            .expect_open()
            .withf(|key| key == "menu-items/1_abc.png")
            .return_once(|_| {
                Ok(AssetContent {
                    content_type: "image/png",
                    bytes: vec![1, 2, 3],
                })
            });
        let app = upload_app!(state_with(uploads));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/uploads/menu-items/1_abc.png")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some("image/png")
        );
        assert_eq!(test::read_body(res).await.as_ref(), &[1, 2, 3]);
    }

    #[rstest]
    #[case("logos/1_brand.svg", "image/svg+xml")]
    #[case("menu-items/1_abc.png", "image/png")]
    #[actix_web::test]
    async fn served_files_cannot_run_scripts(#[case] key: &str, #[case] content_type: &'static str) {
        let mut uploads = MockAssetUploads::new();
        uploads.expect_open().return_once(move |_| {
            Ok(AssetContent {
                content_type,
                bytes: b"<svg><script>alert(1)</script></svg>".to_vec(),
            })
        });
        let app = upload_app!(state_with(uploads));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/uploads/{key}"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let header = |name: &str| {
            res.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        assert_eq!(header("content-type").as_deref(), Some(content_type));
        assert_eq!(header("x-content-type-options").as_deref(), Some("nosniff"));
        let csp = header("content-security-policy").expect("csp header");
        assert!(csp.starts_with("default-src 'none'"));
        assert!(csp.contains("sandbox"));
    }

    #[rstest]
    #[actix_web::test]
    async fn serve_missing_file_is_404() {
        let mut uploads = MockAssetUploads::new();
        uploads
            .expect_open()
            .return_once(|_| Err(Error::not_found("asset not found")));
        let app = upload_app!(state_with(uploads));

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/uploads/nope/1_a.png").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
