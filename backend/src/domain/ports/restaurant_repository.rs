//! Port abstraction for restaurant persistence.

use async_trait::async_trait;

use crate::domain::{Restaurant, RestaurantId, Slug, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by restaurant repository adapters.
    pub enum RestaurantPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "restaurant repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "restaurant repository query failed: {message}",
        /// Another restaurant already uses the slug.
        DuplicateSlug { slug: String } => "slug {slug} is already taken",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// All restaurants, newest first.
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError>;

    /// Restaurants owned by `owner`, newest first.
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError>;

    async fn find_by_id(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError>;

    async fn find_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError>;

    /// Store a new restaurant. Fails with `DuplicateSlug` when the slug is taken.
    async fn insert(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError>;

    /// Overwrite the stored record with the same id.
    async fn update(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError>;

    /// Delete the restaurant and all of its menu items atomically.
    ///
    /// Returns `false` when nothing was stored under `id`.
    async fn delete_with_menu_items(
        &self,
        id: &RestaurantId,
    ) -> Result<bool, RestaurantPersistenceError>;
}
