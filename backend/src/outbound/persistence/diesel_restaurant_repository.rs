//! PostgreSQL-backed `RestaurantRepository` implementation using Diesel ORM.
//!
//! Deleting a restaurant removes its menu items in the same transaction; the
//! `menu_items` foreign key has no `ON DELETE CASCADE`, so the order of the
//! two statements matters.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{RestaurantPersistenceError, RestaurantRepository};
use crate::domain::{AssetUrl, EntityName, Restaurant, RestaurantId, Slug, UserId};

use super::diesel_basic_error_mapping::{
    RESTAURANTS_SLUG_KEY, is_unique_violation_of, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{RestaurantRow, RestaurantWrite};
use super::pool::{DbPool, PoolError};
use super::schema::{menu_items, restaurants};

/// Diesel-backed implementation of the `RestaurantRepository` port.
#[derive(Clone)]
pub struct DieselRestaurantRepository {
    pool: DbPool,
}

impl DieselRestaurantRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RestaurantPersistenceError {
    map_basic_pool_error(error, RestaurantPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RestaurantPersistenceError {
    map_basic_diesel_error(
        error,
        RestaurantPersistenceError::query,
        RestaurantPersistenceError::connection,
    )
}

fn map_write_error(error: diesel::result::Error, slug: &Slug) -> RestaurantPersistenceError {
    if is_unique_violation_of(&error, RESTAURANTS_SLUG_KEY) {
        RestaurantPersistenceError::duplicate_slug(slug.as_ref())
    } else {
        map_diesel_error(error)
    }
}

fn stored_invalid(what: &str, err: impl std::fmt::Display) -> RestaurantPersistenceError {
    RestaurantPersistenceError::query(format!("stored restaurant {what} invalid: {err}"))
}

fn row_to_restaurant(row: RestaurantRow) -> Result<Restaurant, RestaurantPersistenceError> {
    let name = EntityName::new(&row.name).map_err(|err| stored_invalid("name", err))?;
    let slug = Slug::new(&row.slug).map_err(|err| stored_invalid("slug", err))?;
    let logo_url = row
        .logo_url
        .as_deref()
        .map(AssetUrl::parse)
        .transpose()
        .map_err(|err| stored_invalid("logo url", err))?;

    Ok(Restaurant {
        id: RestaurantId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        name,
        slug,
        description: row.description,
        logo_url,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_restaurants(
    rows: Vec<RestaurantRow>,
) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
    rows.into_iter().map(row_to_restaurant).collect()
}

fn write_model(restaurant: &Restaurant) -> RestaurantWrite<'_> {
    RestaurantWrite {
        id: *restaurant.id.as_uuid(),
        owner_id: *restaurant.owner_id.as_uuid(),
        name: restaurant.name.as_ref(),
        slug: restaurant.slug.as_ref(),
        description: restaurant.description.as_deref(),
        logo_url: restaurant.logo_url.as_ref().map(AssetUrl::as_str),
        created_at: restaurant.created_at,
        updated_at: restaurant.updated_at,
    }
}

#[async_trait]
impl RestaurantRepository for DieselRestaurantRepository {
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RestaurantRow> = restaurants::table
            .order(restaurants::created_at.desc())
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_restaurants(rows)
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RestaurantRow> = restaurants::table
            .filter(restaurants::owner_id.eq(owner.as_uuid()))
            .order(restaurants::created_at.desc())
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_restaurants(rows)
    }

    async fn find_by_id(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RestaurantRow> = restaurants::table
            .filter(restaurants::id.eq(id.as_uuid()))
            .select(RestaurantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_restaurant).transpose()
    }

    async fn find_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RestaurantRow> = restaurants::table
            .filter(restaurants::slug.eq(slug.as_ref()))
            .select(RestaurantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_restaurant).transpose()
    }

    async fn insert(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(restaurants::table)
            .values(&write_model(restaurant))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, &restaurant.slug))
    }

    async fn update(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(restaurants::table.find(restaurant.id.as_uuid()))
            .set(&write_model(restaurant))
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &restaurant.slug))?;
        if updated == 0 {
            return Err(RestaurantPersistenceError::query("restaurant not found for update"));
        }
        Ok(())
    }

    async fn delete_with_menu_items(
        &self,
        id: &RestaurantId,
    ) -> Result<bool, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let restaurant_id = *id.as_uuid();

        let deleted = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(
                        menu_items::table.filter(menu_items::restaurant_id.eq(restaurant_id)),
                    )
                    .execute(conn)
                    .await?;
                    diesel::delete(restaurants::table.find(restaurant_id))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
