//! PostgreSQL-backed `MenuItemRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MenuItemPersistenceError, MenuItemRepository};
use crate::domain::{AssetUrl, Category, EntityName, MenuItem, MenuItemId, Price, RestaurantId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{MenuItemRow, MenuItemWrite};
use super::pool::{DbPool, PoolError};
use super::schema::menu_items;

/// Diesel-backed implementation of the `MenuItemRepository` port.
#[derive(Clone)]
pub struct DieselMenuItemRepository {
    pool: DbPool,
}

impl DieselMenuItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MenuItemPersistenceError {
    map_basic_pool_error(error, MenuItemPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MenuItemPersistenceError {
    map_basic_diesel_error(
        error,
        MenuItemPersistenceError::query,
        MenuItemPersistenceError::connection,
    )
}

fn stored_invalid(what: &str, err: impl std::fmt::Display) -> MenuItemPersistenceError {
    MenuItemPersistenceError::query(format!("stored menu item {what} invalid: {err}"))
}

fn parse_stored_url(
    value: Option<&str>,
    what: &str,
) -> Result<Option<AssetUrl>, MenuItemPersistenceError> {
    value
        .map(AssetUrl::parse)
        .transpose()
        .map_err(|err| stored_invalid(what, err))
}

fn row_to_menu_item(row: MenuItemRow) -> Result<MenuItem, MenuItemPersistenceError> {
    Ok(MenuItem {
        id: MenuItemId::from_uuid(row.id),
        restaurant_id: RestaurantId::from_uuid(row.restaurant_id),
        name: EntityName::new(&row.name).map_err(|err| stored_invalid("name", err))?,
        description: row.description,
        price: Price::try_new(row.price).map_err(|err| stored_invalid("price", err))?,
        category: Category::parse(&row.category).map_err(|err| stored_invalid("category", err))?,
        image_url: parse_stored_url(row.image_url.as_deref(), "image url")?,
        model3d_url: parse_stored_url(row.model3d_url.as_deref(), "model url")?,
        featured: row.featured,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn write_model(item: &MenuItem) -> MenuItemWrite<'_> {
    MenuItemWrite {
        id: *item.id.as_uuid(),
        restaurant_id: *item.restaurant_id.as_uuid(),
        name: item.name.as_ref(),
        description: item.description.as_deref(),
        price: item.price.value(),
        category: item.category.label(),
        image_url: item.image_url.as_ref().map(AssetUrl::as_str),
        model3d_url: item.model3d_url.as_ref().map(AssetUrl::as_str),
        featured: item.featured,
        created_at: item.created_at,
        updated_at: item.updated_at,
    }
}

#[async_trait]
impl MenuItemRepository for DieselMenuItemRepository {
    async fn list_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<MenuItem>, MenuItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MenuItemRow> = menu_items::table
            .filter(menu_items::restaurant_id.eq(restaurant_id.as_uuid()))
            .order(menu_items::created_at.desc())
            .select(MenuItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_menu_item).collect()
    }

    async fn find_by_id(
        &self,
        id: &MenuItemId,
    ) -> Result<Option<MenuItem>, MenuItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MenuItemRow> = menu_items::table
            .filter(menu_items::id.eq(id.as_uuid()))
            .select(MenuItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_menu_item).transpose()
    }

    async fn insert(&self, item: &MenuItem) -> Result<(), MenuItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(menu_items::table)
            .values(&write_model(item))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, item: &MenuItem) -> Result<(), MenuItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(menu_items::table.find(item.id.as_uuid()))
            .set(&write_model(item))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(MenuItemPersistenceError::query("menu item not found for update"));
        }
        Ok(())
    }

    async fn delete(&self, id: &MenuItemId) -> Result<bool, MenuItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(menu_items::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
