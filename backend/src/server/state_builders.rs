//! Builders wiring outbound adapters into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use backend::domain::ports::{
    AccountService, MenuItemCatalogue, MenuItemRepository, RestaurantCatalogue,
    RestaurantRepository, UserRepository,
};
use backend::domain::{
    AssetRelayService, MenuItemService, PasswordAccountService, RestaurantService, UploadService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::http::ReqwestAssetFetcher;
use backend::outbound::memory::{InMemoryMenuStore, InMemoryUserRepository};
use backend::outbound::persistence::{
    DieselMenuItemRepository, DieselRestaurantRepository, DieselUserRepository,
};
use backend::outbound::security::Argon2CredentialHasher;
use backend::outbound::storage::CapStdAssetStore;

use super::ServerConfig;

/// Account and catalogue ports sharing one set of repositories.
struct CataloguePorts {
    accounts: Arc<dyn AccountService>,
    restaurants: Arc<dyn RestaurantCatalogue>,
    menu_items: Arc<dyn MenuItemCatalogue>,
}

fn build_catalogue_ports<U, R, M>(
    users: Arc<U>,
    restaurants: Arc<R>,
    menu_items: Arc<M>,
    clock: &Arc<dyn Clock>,
    public_base_url: &str,
) -> CataloguePorts
where
    U: UserRepository + 'static,
    R: RestaurantRepository + 'static,
    M: MenuItemRepository + 'static,
{
    CataloguePorts {
        accounts: Arc::new(PasswordAccountService::new(
            users,
            Arc::new(Argon2CredentialHasher::new()),
            Arc::clone(clock),
        )),
        restaurants: Arc::new(RestaurantService::new(
            Arc::clone(&restaurants),
            Arc::clone(&menu_items),
            Arc::clone(clock),
            public_base_url,
        )),
        menu_items: Arc::new(MenuItemService::new(
            menu_items,
            restaurants,
            Arc::clone(clock),
        )),
    }
}

/// Use Diesel repositories when a pool is configured, otherwise keep every
/// record in process memory.
fn catalogue_ports(config: &ServerConfig, clock: &Arc<dyn Clock>) -> CataloguePorts {
    match &config.db_pool {
        Some(pool) => build_catalogue_ports(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselRestaurantRepository::new(pool.clone())),
            Arc::new(DieselMenuItemRepository::new(pool.clone())),
            clock,
            &config.public_base_url,
        ),
        None => {
            let store = Arc::new(InMemoryMenuStore::new());
            build_catalogue_ports(
                Arc::new(InMemoryUserRepository::new()),
                Arc::clone(&store),
                store,
                clock,
                &config.public_base_url,
            )
        }
    }
}

/// Build the HTTP state shared by every worker.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the relay client cannot be built or the
/// upload directory cannot be opened.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let CataloguePorts {
        accounts,
        restaurants,
        menu_items,
    } = catalogue_ports(config, &clock);

    let fetcher = ReqwestAssetFetcher::new(config.relay.timeout, config.relay.max_bytes)
        .map_err(|err| std::io::Error::other(format!("relay client init failed: {err}")))?;
    let store = CapStdAssetStore::open(&config.uploads.dir)
        .map_err(|err| std::io::Error::other(format!("upload store init failed: {err}")))?;

    Ok(web::Data::new(HttpState::new(HttpStatePorts {
        accounts,
        restaurants,
        menu_items,
        relay: Arc::new(AssetRelayService::new(Arc::new(fetcher))),
        uploads: Arc::new(UploadService::new(
            Arc::new(store),
            clock,
            config.public_base_url.clone(),
            config.uploads.max_bytes,
        )),
    })))
}
