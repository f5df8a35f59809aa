//! Shared builders and doubles for unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::{
    DisplayName, EmailAddress, MenuItem, MenuItemDraft, MenuItemFields, PriceInput, Restaurant,
    RestaurantDraft, RestaurantFields, User, UserId,
};

/// Clock frozen at a fixed instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2024-06-10T06:13:20Z, a stable instant for assertions.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::milliseconds(1_718_000_000_000)
}

pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(fixed_now()))
}

pub fn user(name: &str, email: &str) -> User {
    User {
        id: UserId::random(),
        name: DisplayName::new(name).expect("valid name"),
        email: EmailAddress::new(email).expect("valid email"),
        created_at: fixed_now(),
    }
}

pub fn restaurant(owner: UserId, name: &str, slug: &str) -> Restaurant {
    let draft = RestaurantDraft::try_new(RestaurantFields {
        name: Some(name.to_owned()),
        slug: Some(slug.to_owned()),
        ..RestaurantFields::default()
    })
    .expect("valid restaurant draft");
    Restaurant::from_draft(owner, draft, fixed_now())
}

pub fn menu_item(restaurant: &Restaurant, name: &str, price: f64) -> MenuItem {
    let draft = MenuItemDraft::try_new(
        Some(&restaurant.id.to_string()),
        MenuItemFields {
            name: Some(name.to_owned()),
            price: Some(PriceInput::Number(price)),
            ..MenuItemFields::default()
        },
    )
    .expect("valid menu item draft");
    MenuItem::from_draft(draft, fixed_now())
}
