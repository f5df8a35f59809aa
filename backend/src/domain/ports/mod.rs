//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, fetcher, store) expose typed error
//! enums declared with `define_port_error!`; driving ports return the domain
//! [`Error`](crate::domain::Error) so inbound adapters can map it directly.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod asset_fetcher;
mod asset_relay;
mod asset_store;
mod asset_uploads;
mod credential_hasher;
mod menu_item_catalogue;
mod menu_item_repository;
mod restaurant_catalogue;
mod restaurant_repository;
mod user_repository;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use asset_fetcher::{AssetFetchError, AssetFetcher, FetchedAsset};
#[cfg(test)]
pub use asset_fetcher::MockAssetFetcher;
pub use asset_relay::AssetRelay;
#[cfg(test)]
pub use asset_relay::MockAssetRelay;
pub use asset_store::{AssetStore, AssetStoreError};
#[cfg(test)]
pub use asset_store::MockAssetStore;
pub use asset_uploads::AssetUploads;
#[cfg(test)]
pub use asset_uploads::MockAssetUploads;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use menu_item_catalogue::MenuItemCatalogue;
#[cfg(test)]
pub use menu_item_catalogue::MockMenuItemCatalogue;
pub use menu_item_repository::{MenuItemPersistenceError, MenuItemRepository};
#[cfg(test)]
pub use menu_item_repository::MockMenuItemRepository;
pub use restaurant_catalogue::RestaurantCatalogue;
#[cfg(test)]
pub use restaurant_catalogue::MockRestaurantCatalogue;
#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
pub use restaurant_repository::{RestaurantPersistenceError, RestaurantRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
