//! Menu item service implementing the [`MenuItemCatalogue`] driving port.
//!
//! Mutations are authorised against the owning restaurant, so the service
//! reads the restaurant repository before touching menu items.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{MenuItemCatalogue, MenuItemRepository, RestaurantRepository};
use crate::domain::restaurant_service::{
    ensure_owner, map_menu_item_error, map_restaurant_error, restaurant_not_found,
};
use crate::domain::{
    Error, MenuItem, MenuItemDraft, MenuItemId, MenuItemPatch, RestaurantId, UserId,
};

fn item_not_found(id: &MenuItemId) -> Error {
    Error::not_found(format!("menu item {id} not found"))
}

#[derive(Clone)]
pub struct MenuItemService<M, R> {
    menu_items: Arc<M>,
    restaurants: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<M, R> MenuItemService<M, R> {
    pub fn new(menu_items: Arc<M>, restaurants: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            menu_items,
            restaurants,
            clock,
        }
    }
}

impl<M, R> MenuItemService<M, R>
where
    M: MenuItemRepository,
    R: RestaurantRepository,
{
    async fn authorise(&self, caller: &UserId, restaurant_id: &RestaurantId) -> Result<(), Error> {
        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await
            .map_err(map_restaurant_error)?
            .ok_or_else(|| restaurant_not_found(restaurant_id))?;
        ensure_owner(&restaurant, caller)
    }

    async fn find(&self, id: &MenuItemId) -> Result<Option<MenuItem>, Error> {
        self.menu_items
            .find_by_id(id)
            .await
            .map_err(map_menu_item_error)
    }
}

#[async_trait]
impl<M, R> MenuItemCatalogue for MenuItemService<M, R>
where
    M: MenuItemRepository,
    R: RestaurantRepository,
{
    async fn list(&self, restaurant_id: &RestaurantId) -> Result<Vec<MenuItem>, Error> {
        self.menu_items
            .list_by_restaurant(restaurant_id)
            .await
            .map_err(map_menu_item_error)
    }

    async fn get(&self, id: &MenuItemId) -> Result<MenuItem, Error> {
        self.find(id).await?.ok_or_else(|| item_not_found(id))
    }

    async fn create(&self, caller: &UserId, draft: MenuItemDraft) -> Result<MenuItem, Error> {
        self.authorise(caller, &draft.restaurant_id).await?;
        let item = MenuItem::from_draft(draft, self.clock.utc());
        self.menu_items
            .insert(&item)
            .await
            .map_err(map_menu_item_error)?;
        info!(menu_item_id = %item.id, restaurant_id = %item.restaurant_id, "created menu item");
        Ok(item)
    }

    async fn update(
        &self,
        caller: &UserId,
        id: &MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, Error> {
        let current = self.find(id).await?.ok_or_else(|| item_not_found(id))?;
        self.authorise(caller, &current.restaurant_id).await?;
        let updated = current.patched(patch, self.clock.utc());
        self.menu_items
            .update(&updated)
            .await
            .map_err(map_menu_item_error)?;
        Ok(updated)
    }

    async fn delete(&self, caller: &UserId, id: &MenuItemId) -> Result<(), Error> {
        let Some(current) = self.find(id).await? else {
            return Ok(());
        };
        self.authorise(caller, &current.restaurant_id).await?;
        self.menu_items
            .delete(id)
            .await
            .map_err(map_menu_item_error)?;
        Ok(())
    }
}
