//! Driving port for menu item queries and owner mutations.

use async_trait::async_trait;

use crate::domain::{Error, MenuItem, MenuItemDraft, MenuItemId, MenuItemPatch, RestaurantId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemCatalogue: Send + Sync {
    /// Items of one restaurant, newest first.
    async fn list(&self, restaurant_id: &RestaurantId) -> Result<Vec<MenuItem>, Error>;

    /// Fails with `not_found` when absent.
    async fn get(&self, id: &MenuItemId) -> Result<MenuItem, Error>;

    /// Add an item to a restaurant the caller owns.
    async fn create(&self, caller: &UserId, draft: MenuItemDraft) -> Result<MenuItem, Error>;

    async fn update(
        &self,
        caller: &UserId,
        id: &MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, Error>;

    /// Deleting an absent item succeeds.
    async fn delete(&self, caller: &UserId, id: &MenuItemId) -> Result<(), Error>;
}
