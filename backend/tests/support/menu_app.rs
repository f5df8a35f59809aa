//! Full-stack harness over the in-memory adapters.
//!
//! Everything except the relay's network fetch and the password hasher is the
//! production wiring; those two are swapped for fast, observable doubles.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::web;
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tempfile::TempDir;

use backend::domain::ports::{
    AssetFetchError, AssetFetcher, CredentialHashError, CredentialHasher, FetchedAsset,
};
use backend::domain::{
    AssetRelayService, AssetUrl, MenuItemService, PasswordAccountService, RestaurantService,
    UploadService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::{InMemoryMenuStore, InMemoryUserRepository};
use backend::outbound::storage::CapStdAssetStore;

pub const PUBLIC_BASE_URL: &str = "http://menus.test";

/// What the stub fetcher answers with.
#[derive(Debug, Clone)]
pub enum Upstream {
    Respond(FetchedAsset),
    Unreachable,
}

/// Asset fetcher that counts calls and returns a canned upstream answer.
#[derive(Debug)]
pub struct StubFetcher {
    upstream: Upstream,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn new(upstream: Upstream) -> Self {
        Self {
            upstream,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetFetcher for StubFetcher {
    async fn fetch(&self, _url: &AssetUrl) -> Result<FetchedAsset, AssetFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.upstream {
            Upstream::Respond(asset) => Ok(asset.clone()),
            Upstream::Unreachable => Err(AssetFetchError::transport("connection refused")),
        }
    }
}

/// Reversible "hash" so account tests skip Argon2's cost.
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialHashError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialHashError> {
        Ok(hash.strip_prefix("plain:") == Some(password))
    }
}

/// Application state plus the handles tests inspect.
pub struct MenuHarness {
    pub state: web::Data<HttpState>,
    pub fetcher: Arc<StubFetcher>,
    _uploads: TempDir,
}

impl MenuHarness {
    pub fn new(upstream: Upstream) -> Self {
        let uploads = TempDir::new().expect("temp dir");
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let store = Arc::new(InMemoryMenuStore::new());
        let fetcher = Arc::new(StubFetcher::new(upstream));
        let asset_store = CapStdAssetStore::open(uploads.path()).expect("upload store");

        let state = HttpState::new(HttpStatePorts {
            accounts: Arc::new(PasswordAccountService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(PlainHasher),
                Arc::clone(&clock),
            )),
            restaurants: Arc::new(RestaurantService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&clock),
                PUBLIC_BASE_URL,
            )),
            menu_items: Arc::new(MenuItemService::new(
                Arc::clone(&store),
                store,
                Arc::clone(&clock),
            )),
            relay: Arc::new(AssetRelayService::new(Arc::clone(&fetcher))),
            uploads: Arc::new(UploadService::new(
                Arc::new(asset_store),
                clock,
                PUBLIC_BASE_URL,
                1024,
            )),
        });

        Self {
            state: web::Data::new(state),
            fetcher,
            _uploads: uploads,
        }
    }
}

pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Build the full application around a harness.
macro_rules! menu_app {
    ($harness:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($harness.state.clone())
                .service(
                    actix_web::web::scope("/api/v1")
                        .wrap(crate::menu_app::session_middleware())
                        .configure(backend::inbound::http::configure_api),
                )
                .configure(backend::inbound::http::configure_public),
        )
        .await
    };
}
