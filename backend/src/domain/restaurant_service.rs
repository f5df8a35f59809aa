//! Restaurant service implementing the [`RestaurantCatalogue`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    MenuItemPersistenceError, MenuItemRepository, RestaurantCatalogue,
    RestaurantPersistenceError, RestaurantRepository,
};
use crate::domain::{
    Error, MenuLink, PublicMenu, Restaurant, RestaurantDraft, RestaurantId, RestaurantPatch, Slug,
    UserId,
};

pub(crate) fn map_restaurant_error(error: RestaurantPersistenceError) -> Error {
    match error {
        RestaurantPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("restaurant repository unavailable: {message}"))
        }
        RestaurantPersistenceError::Query { message } => {
            Error::internal(format!("restaurant repository error: {message}"))
        }
        RestaurantPersistenceError::DuplicateSlug { slug } => slug_taken(&slug),
    }
}

pub(crate) fn map_menu_item_error(error: MenuItemPersistenceError) -> Error {
    match error {
        MenuItemPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("menu item repository unavailable: {message}"))
        }
        MenuItemPersistenceError::Query { message } => {
            Error::internal(format!("menu item repository error: {message}"))
        }
    }
}

fn slug_taken(slug: &str) -> Error {
    Error::conflict(format!("slug '{slug}' is already taken"))
        .with_details(serde_json::json!({ "field": "slug", "code": "slug_taken" }))
}

pub(crate) fn restaurant_not_found(id: &RestaurantId) -> Error {
    Error::not_found(format!("restaurant {id} not found"))
}

/// Restaurant queries and owner mutations over the repositories.
#[derive(Clone)]
pub struct RestaurantService<R, M> {
    restaurants: Arc<R>,
    menu_items: Arc<M>,
    clock: Arc<dyn Clock>,
    public_base_url: String,
}

impl<R, M> RestaurantService<R, M> {
    /// `public_base_url` is the diner-facing site used in QR links.
    pub fn new(
        restaurants: Arc<R>,
        menu_items: Arc<M>,
        clock: Arc<dyn Clock>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            restaurants,
            menu_items,
            clock,
            public_base_url: public_base_url.into(),
        }
    }
}

impl<R, M> RestaurantService<R, M>
where
    R: RestaurantRepository,
{
    async fn require_by_slug(&self, slug: &str) -> Result<Restaurant, Error> {
        let not_found = || Error::not_found(format!("restaurant '{slug}' not found"));
        let Ok(slug) = Slug::new(slug) else {
            return Err(not_found());
        };
        self.restaurants
            .find_by_slug(&slug)
            .await
            .map_err(map_restaurant_error)?
            .ok_or_else(not_found)
    }

    async fn require_owned(&self, caller: &UserId, id: &RestaurantId) -> Result<Restaurant, Error> {
        let restaurant = self
            .restaurants
            .find_by_id(id)
            .await
            .map_err(map_restaurant_error)?
            .ok_or_else(|| restaurant_not_found(id))?;
        ensure_owner(&restaurant, caller)?;
        Ok(restaurant)
    }

    async fn ensure_slug_free(&self, slug: &Slug, except: Option<&RestaurantId>) -> Result<(), Error> {
        let holder = self
            .restaurants
            .find_by_slug(slug)
            .await
            .map_err(map_restaurant_error)?;
        match holder {
            Some(existing) if Some(&existing.id) != except => Err(slug_taken(slug.as_ref())),
            _ => Ok(()),
        }
    }
}

pub(crate) fn ensure_owner(restaurant: &Restaurant, caller: &UserId) -> Result<(), Error> {
    if restaurant.is_owned_by(caller) {
        Ok(())
    } else {
        Err(Error::forbidden("only the restaurant owner may change it"))
    }
}

#[async_trait]
impl<R, M> RestaurantCatalogue for RestaurantService<R, M>
where
    R: RestaurantRepository,
    M: MenuItemRepository,
{
    async fn list(&self) -> Result<Vec<Restaurant>, Error> {
        self.restaurants
            .list_all()
            .await
            .map_err(map_restaurant_error)
    }

    async fn list_owned(&self, owner: &UserId) -> Result<Vec<Restaurant>, Error> {
        self.restaurants
            .list_by_owner(owner)
            .await
            .map_err(map_restaurant_error)
    }

    async fn get(&self, id: &RestaurantId) -> Result<Restaurant, Error> {
        self.restaurants
            .find_by_id(id)
            .await
            .map_err(map_restaurant_error)?
            .ok_or_else(|| restaurant_not_found(id))
    }

    async fn menu_by_slug(&self, slug: &str) -> Result<PublicMenu, Error> {
        let restaurant = self.require_by_slug(slug).await?;
        let items = self
            .menu_items
            .list_by_restaurant(&restaurant.id)
            .await
            .map_err(map_menu_item_error)?;
        Ok(PublicMenu::assemble(restaurant, items))
    }

    async fn menu_link(&self, slug: &str) -> Result<MenuLink, Error> {
        let restaurant = self.require_by_slug(slug).await?;
        Ok(MenuLink::for_restaurant(&self.public_base_url, &restaurant))
    }

    async fn create(&self, owner: &UserId, draft: RestaurantDraft) -> Result<Restaurant, Error> {
        self.ensure_slug_free(&draft.slug, None).await?;
        let restaurant = Restaurant::from_draft(*owner, draft, self.clock.utc());
        self.restaurants
            .insert(&restaurant)
            .await
            .map_err(map_restaurant_error)?;
        info!(restaurant_id = %restaurant.id, slug = %restaurant.slug, "created restaurant");
        Ok(restaurant)
    }

    async fn update(
        &self,
        caller: &UserId,
        id: &RestaurantId,
        patch: RestaurantPatch,
    ) -> Result<Restaurant, Error> {
        let current = self.require_owned(caller, id).await?;
        if let Some(slug) = patch.slug.as_ref().filter(|slug| **slug != current.slug) {
            self.ensure_slug_free(slug, Some(id)).await?;
        }
        let updated = current.patched(patch, self.clock.utc());
        self.restaurants
            .update(&updated)
            .await
            .map_err(map_restaurant_error)?;
        Ok(updated)
    }

    async fn delete(&self, caller: &UserId, id: &RestaurantId) -> Result<(), Error> {
        let Some(restaurant) = self
            .restaurants
            .find_by_id(id)
            .await
            .map_err(map_restaurant_error)?
        else {
            return Ok(());
        };
        ensure_owner(&restaurant, caller)?;
        let removed = self
            .restaurants
            .delete_with_menu_items(id)
            .await
            .map_err(map_restaurant_error)?;
        info!(restaurant_id = %id, removed, "deleted restaurant and its menu");
        Ok(())
    }
}

#[cfg(test)]
#[path = "restaurant_service_tests.rs"]
mod tests;
