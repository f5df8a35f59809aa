//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, AssetRelay, AssetUploads, MenuItemCatalogue, RestaurantCatalogue,
};

/// Parameter object bundling every port implementation used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountService>,
    pub restaurants: Arc<dyn RestaurantCatalogue>,
    pub menu_items: Arc<dyn MenuItemCatalogue>,
    pub relay: Arc<dyn AssetRelay>,
    pub uploads: Arc<dyn AssetUploads>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub restaurants: Arc<dyn RestaurantCatalogue>,
    pub menu_items: Arc<dyn MenuItemCatalogue>,
    pub relay: Arc<dyn AssetRelay>,
    pub uploads: Arc<dyn AssetUploads>,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            restaurants,
            menu_items,
            relay,
            uploads,
        } = ports;
        Self {
            accounts,
            restaurants,
            menu_items,
            relay,
            uploads,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
