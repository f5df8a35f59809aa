//! Driving port for restaurant queries and owner mutations.

use async_trait::async_trait;

use crate::domain::{
    Error, MenuLink, PublicMenu, Restaurant, RestaurantDraft, RestaurantId, RestaurantPatch,
    UserId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantCatalogue: Send + Sync {
    /// Every restaurant, newest first.
    async fn list(&self) -> Result<Vec<Restaurant>, Error>;

    /// Restaurants owned by `owner`, newest first.
    async fn list_owned(&self, owner: &UserId) -> Result<Vec<Restaurant>, Error>;

    /// Fails with `not_found` when absent.
    async fn get(&self, id: &RestaurantId) -> Result<Restaurant, Error>;

    /// The public menu page payload for `slug`.
    async fn menu_by_slug(&self, slug: &str) -> Result<PublicMenu, Error>;

    /// Shareable menu URL and QR image for `slug`.
    async fn menu_link(&self, slug: &str) -> Result<MenuLink, Error>;

    async fn create(&self, owner: &UserId, draft: RestaurantDraft) -> Result<Restaurant, Error>;

    /// Owner-only partial update.
    async fn update(
        &self,
        caller: &UserId,
        id: &RestaurantId,
        patch: RestaurantPatch,
    ) -> Result<Restaurant, Error>;

    /// Owner-only delete of the restaurant and its menu. Deleting an absent
    /// restaurant succeeds.
    async fn delete(&self, caller: &UserId, id: &RestaurantId) -> Result<(), Error>;
}
