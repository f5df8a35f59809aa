//! In-memory restaurants and menu items.
//!
//! Both tables share one lock so deleting a restaurant and its items is a
//! single critical section, mirroring the database transaction.

use std::cmp::Reverse;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    MenuItemPersistenceError, MenuItemRepository, RestaurantPersistenceError,
    RestaurantRepository,
};
use crate::domain::{MenuItem, MenuItemId, Restaurant, RestaurantId, Slug, UserId};

#[derive(Debug, Default)]
struct Tables {
    restaurants: Vec<Restaurant>,
    menu_items: Vec<MenuItem>,
}

/// Implements both [`RestaurantRepository`] and [`MenuItemRepository`].
///
/// Share one `Arc<InMemoryMenuStore>` between the two ports.
#[derive(Debug, Default)]
pub struct InMemoryMenuStore {
    tables: Mutex<Tables>,
}

const POISONED: &str = "menu store lock poisoned";

/// Newest first; among equal timestamps the later insertion wins.
fn newest_first<T>(
    rows: impl DoubleEndedIterator<Item = T>,
    created_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut rows: Vec<T> = rows.rev().collect();
    rows.sort_by_key(|row| Reverse(created_at(row)));
    rows
}

impl InMemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn restaurants<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, RestaurantPersistenceError>,
    ) -> Result<T, RestaurantPersistenceError> {
        let mut guard = self
            .tables
            .lock()
            .map_err(|_| RestaurantPersistenceError::query(POISONED))?;
        f(&mut guard)
    }

    fn menu_items<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, MenuItemPersistenceError>,
    ) -> Result<T, MenuItemPersistenceError> {
        let mut guard = self
            .tables
            .lock()
            .map_err(|_| MenuItemPersistenceError::query(POISONED))?;
        f(&mut guard)
    }
}

fn ensure_slug_free(
    tables: &Tables,
    restaurant: &Restaurant,
) -> Result<(), RestaurantPersistenceError> {
    let taken = tables
        .restaurants
        .iter()
        .any(|other| other.slug == restaurant.slug && other.id != restaurant.id);
    if taken {
        return Err(RestaurantPersistenceError::duplicate_slug(
            restaurant.slug.as_ref(),
        ));
    }
    Ok(())
}

#[async_trait]
impl RestaurantRepository for InMemoryMenuStore {
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        self.restaurants(|tables| {
            Ok(newest_first(tables.restaurants.iter().cloned(), |r| r.created_at))
        })
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        self.restaurants(|tables| {
            let owned = tables
                .restaurants
                .iter()
                .filter(|r| r.is_owned_by(owner))
                .cloned();
            Ok(newest_first(owned, |r| r.created_at))
        })
    }

    async fn find_by_id(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        self.restaurants(|tables| Ok(tables.restaurants.iter().find(|r| &r.id == id).cloned()))
    }

    async fn find_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        self.restaurants(|tables| {
            Ok(tables
                .restaurants
                .iter()
                .find(|r| &r.slug == slug)
                .cloned())
        })
    }

    async fn insert(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError> {
        self.restaurants(|tables| {
            ensure_slug_free(tables, restaurant)?;
            tables.restaurants.push(restaurant.clone());
            Ok(())
        })
    }

    async fn update(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError> {
        self.restaurants(|tables| {
            ensure_slug_free(tables, restaurant)?;
            let stored = tables
                .restaurants
                .iter_mut()
                .find(|r| r.id == restaurant.id)
                .ok_or_else(|| RestaurantPersistenceError::query("restaurant not found for update"))?;
            *stored = restaurant.clone();
            Ok(())
        })
    }

    async fn delete_with_menu_items(
        &self,
        id: &RestaurantId,
    ) -> Result<bool, RestaurantPersistenceError> {
        self.restaurants(|tables| {
            tables.menu_items.retain(|item| &item.restaurant_id != id);
            let before = tables.restaurants.len();
            tables.restaurants.retain(|r| &r.id != id);
            Ok(tables.restaurants.len() < before)
        })
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryMenuStore {
    async fn list_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<MenuItem>, MenuItemPersistenceError> {
        self.menu_items(|tables| {
            let items = tables
                .menu_items
                .iter()
                .filter(|item| &item.restaurant_id == restaurant_id)
                .cloned();
            Ok(newest_first(items, |item| item.created_at))
        })
    }

    async fn find_by_id(
        &self,
        id: &MenuItemId,
    ) -> Result<Option<MenuItem>, MenuItemPersistenceError> {
        self.menu_items(|tables| Ok(tables.menu_items.iter().find(|item| &item.id == id).cloned()))
    }

    async fn insert(&self, item: &MenuItem) -> Result<(), MenuItemPersistenceError> {
        self.menu_items(|tables| {
            if !tables.restaurants.iter().any(|r| r.id == item.restaurant_id) {
                return Err(MenuItemPersistenceError::query(
                    "menu item references a missing restaurant",
                ));
            }
            tables.menu_items.push(item.clone());
            Ok(())
        })
    }

    async fn update(&self, item: &MenuItem) -> Result<(), MenuItemPersistenceError> {
        self.menu_items(|tables| {
            let stored = tables
                .menu_items
                .iter_mut()
                .find(|stored| stored.id == item.id)
                .ok_or_else(|| MenuItemPersistenceError::query("menu item not found for update"))?;
            *stored = item.clone();
            Ok(())
        })
    }

    async fn delete(&self, id: &MenuItemId) -> Result<bool, MenuItemPersistenceError> {
        self.menu_items(|tables| {
            let before = tables.menu_items.len();
            tables.menu_items.retain(|item| &item.id != id);
            Ok(tables.menu_items.len() < before)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixed_now, menu_item, restaurant};
    use chrono::Duration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn owner() -> UserId {
        UserId::random()
    }

    #[rstest]
    #[tokio::test]
    async fn lists_restaurants_newest_first(owner: UserId) {
        let store = InMemoryMenuStore::new();
        let older = restaurant(owner, "Older", "older");
        let mut newer = restaurant(owner, "Newer", "newer");
        newer.created_at = fixed_now() + Duration::minutes(5);
        RestaurantRepository::insert(&store, &older).await.expect("insert");
        RestaurantRepository::insert(&store, &newer).await.expect("insert");

        let listed = store.list_all().await.expect("list");
        let slugs: Vec<&str> = listed.iter().map(|r| r.slug.as_ref()).collect();
        assert_eq!(slugs, ["newer", "older"]);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_slug_is_rejected_on_insert_and_update(owner: UserId) {
        let store = InMemoryMenuStore::new();
        let first = restaurant(owner, "First", "shared");
        let mut second = restaurant(owner, "Second", "second");
        RestaurantRepository::insert(&store, &first).await.expect("insert");
        RestaurantRepository::insert(&store, &second).await.expect("insert");

        let clash = restaurant(owner, "Clash", "shared");
        let error = RestaurantRepository::insert(&store, &clash)
            .await
            .expect_err("duplicate");
        assert_eq!(error, RestaurantPersistenceError::duplicate_slug("shared"));

        second.slug = Slug::new("shared").expect("slug");
        let error = RestaurantRepository::update(&store, &second)
            .await
            .expect_err("duplicate");
        assert!(matches!(error, RestaurantPersistenceError::DuplicateSlug { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_restaurant_removes_its_items(owner: UserId) {
        let store = InMemoryMenuStore::new();
        let kept = restaurant(owner, "Kept", "kept");
        let doomed = restaurant(owner, "Doomed", "doomed");
        RestaurantRepository::insert(&store, &kept).await.expect("insert");
        RestaurantRepository::insert(&store, &doomed).await.expect("insert");
        let survivor = menu_item(&kept, "Soup", 4.0);
        MenuItemRepository::insert(&store, &survivor).await.expect("insert");
        MenuItemRepository::insert(&store, &menu_item(&doomed, "Pie", 6.5))
            .await
            .expect("insert");

        assert!(store.delete_with_menu_items(&doomed.id).await.expect("delete"));
        assert!(!store.delete_with_menu_items(&doomed.id).await.expect("delete"));

        assert!(store.list_by_restaurant(&doomed.id).await.expect("list").is_empty());
        assert_eq!(
            store.list_by_restaurant(&kept.id).await.expect("list"),
            vec![survivor]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn menu_items_require_an_existing_restaurant(owner: UserId) {
        let store = InMemoryMenuStore::new();
        let ghost = restaurant(owner, "Ghost", "ghost");

        let error = MenuItemRepository::insert(&store, &menu_item(&ghost, "Soup", 1.0))
            .await
            .expect_err("orphan");
        assert!(matches!(error, MenuItemPersistenceError::Query { .. }));
    }
}
