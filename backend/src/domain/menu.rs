//! Public menu page payload.

use serde::Serialize;

use super::menu_item::{Category, MenuItem};
use super::restaurant::Restaurant;

/// Items sharing a category, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub category: Category,
    pub items: Vec<MenuItem>,
}

/// A restaurant with its full menu, ready for the diner-facing page.
///
/// `menu_items` is ordered by category label then dish name; `sections`
/// groups the same sequence by category and `featured` repeats the flagged
/// dishes in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMenu {
    pub restaurant: Restaurant,
    pub menu_items: Vec<MenuItem>,
    pub sections: Vec<MenuSection>,
    pub featured: Vec<MenuItem>,
}

impl PublicMenu {
    pub fn assemble(restaurant: Restaurant, mut items: Vec<MenuItem>) -> Self {
        items.sort_by(|a, b| {
            a.category
                .label()
                .cmp(b.category.label())
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut sections: Vec<MenuSection> = Vec::new();
        for item in &items {
            match sections.last_mut() {
                Some(section) if section.category == item.category => {
                    section.items.push(item.clone());
                }
                _ => sections.push(MenuSection {
                    category: item.category.clone(),
                    items: vec![item.clone()],
                }),
            }
        }

        let featured = items.iter().filter(|item| item.featured).cloned().collect();

        Self {
            restaurant,
            menu_items: items,
            sections,
            featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MenuItemDraft, MenuItemFields, PriceInput, RestaurantDraft, RestaurantFields, UserId,
    };
    use chrono::{DateTime, Utc};
    use rstest::rstest;

    fn restaurant() -> Restaurant {
        let draft = RestaurantDraft::try_new(RestaurantFields {
            name: Some("Roma".to_owned()),
            slug: Some("roma".to_owned()),
            ..RestaurantFields::default()
        })
        .expect("valid draft");
        Restaurant::from_draft(UserId::random(), draft, DateTime::<Utc>::UNIX_EPOCH)
    }

    fn item(restaurant: &Restaurant, name: &str, category: &str, featured: bool) -> MenuItem {
        let draft = MenuItemDraft::try_new(
            Some(&restaurant.id.to_string()),
            MenuItemFields {
                name: Some(name.to_owned()),
                price: Some(PriceInput::Number(5.0)),
                category: Some(category.to_owned()),
                featured: Some(featured),
                ..MenuItemFields::default()
            },
        )
        .expect("valid draft");
        MenuItem::from_draft(draft, DateTime::<Utc>::UNIX_EPOCH)
    }

    #[rstest]
    fn orders_by_category_then_name_and_groups() {
        let restaurant = restaurant();
        let items = vec![
            item(&restaurant, "Tiramisu", "Desserts", true),
            item(&restaurant, "Bruschetta", "Appetizers", false),
            item(&restaurant, "Arancini", "Appetizers", true),
            item(&restaurant, "Espresso", "Beverages", false),
        ];

        let menu = PublicMenu::assemble(restaurant, items);

        let names: Vec<&str> = menu.menu_items.iter().map(|i| i.name.as_ref()).collect();
        assert_eq!(names, ["Arancini", "Bruschetta", "Espresso", "Tiramisu"]);
        let sections: Vec<(&str, usize)> = menu
            .sections
            .iter()
            .map(|s| (s.category.label(), s.items.len()))
            .collect();
        assert_eq!(sections, [("Appetizers", 2), ("Beverages", 1), ("Desserts", 1)]);
        let featured: Vec<&str> = menu.featured.iter().map(|i| i.name.as_ref()).collect();
        assert_eq!(featured, ["Arancini", "Tiramisu"]);
    }

    #[rstest]
    fn empty_menu_has_no_sections() {
        let menu = PublicMenu::assemble(restaurant(), Vec::new());
        assert!(menu.sections.is_empty());
        assert!(menu.featured.is_empty());
    }
}
