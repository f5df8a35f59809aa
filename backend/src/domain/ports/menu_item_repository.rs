//! Port abstraction for menu item persistence.

use async_trait::async_trait;

use crate::domain::{MenuItem, MenuItemId, RestaurantId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by menu item repository adapters.
    pub enum MenuItemPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "menu item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "menu item repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// Items of one restaurant, newest first.
    async fn list_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<MenuItem>, MenuItemPersistenceError>;

    async fn find_by_id(&self, id: &MenuItemId)
    -> Result<Option<MenuItem>, MenuItemPersistenceError>;

    async fn insert(&self, item: &MenuItem) -> Result<(), MenuItemPersistenceError>;

    async fn update(&self, item: &MenuItem) -> Result<(), MenuItemPersistenceError>;

    /// Returns `false` when nothing was stored under `id`.
    async fn delete(&self, id: &MenuItemId) -> Result<bool, MenuItemPersistenceError>;
}
