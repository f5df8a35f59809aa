//! Shareable links to a restaurant's public menu.

use serde::Serialize;
use url::form_urlencoded;
use utoipa::ToSchema;

use super::restaurant::Restaurant;

/// Image service that renders a QR code for the `data` query parameter.
pub const QR_IMAGE_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";
/// Pixel dimensions requested from the QR image service.
pub const QR_IMAGE_SIZE: &str = "400x400";

/// Menu URL plus a QR image rendering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuLink {
    #[schema(example = "https://menus.example.com/restaurant/trattoria-roma")]
    pub menu_url: String,
    pub qr_image_url: String,
    #[schema(example = "Trattoria-Roma-qr.png")]
    pub download_file_name: String,
}

impl MenuLink {
    /// Build the link for `restaurant` under the public site `base_url`.
    pub fn for_restaurant(base_url: &str, restaurant: &Restaurant) -> Self {
        let menu_url = format!(
            "{}/restaurant/{}",
            base_url.trim_end_matches('/'),
            restaurant.slug
        );
        let data: String = form_urlencoded::byte_serialize(menu_url.as_bytes()).collect();
        let stem = restaurant
            .name
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        Self {
            qr_image_url: format!("{QR_IMAGE_SERVICE}?size={QR_IMAGE_SIZE}&data={data}"),
            menu_url,
            download_file_name: format!("{stem}-qr.png"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RestaurantDraft, RestaurantFields, UserId};
    use chrono::{DateTime, Utc};
    use rstest::rstest;

    fn restaurant(name: &str, slug: &str) -> Restaurant {
        let draft = RestaurantDraft::try_new(RestaurantFields {
            name: Some(name.to_owned()),
            slug: Some(slug.to_owned()),
            ..RestaurantFields::default()
        })
        .expect("valid draft");
        Restaurant::from_draft(UserId::random(), draft, DateTime::<Utc>::UNIX_EPOCH)
    }

    #[rstest]
    #[case("https://menus.example.com")]
    #[case("https://menus.example.com/")]
    fn builds_menu_and_qr_urls(#[case] base: &str) {
        let link = MenuLink::for_restaurant(base, &restaurant("Trattoria Roma", "trattoria-roma"));
        assert_eq!(
            link.menu_url,
            "https://menus.example.com/restaurant/trattoria-roma"
        );
        assert_eq!(
            link.qr_image_url,
            "https://api.qrserver.com/v1/create-qr-code/?size=400x400&data=\
             https%3A%2F%2Fmenus.example.com%2Frestaurant%2Ftrattoria-roma"
        );
    }

    #[rstest]
    #[case("Trattoria Roma", "Trattoria-Roma-qr.png")]
    #[case("Le   Petit\tCafé", "Le-Petit-Café-qr.png")]
    fn download_name_collapses_whitespace(#[case] name: &str, #[case] expected: &str) {
        let link = MenuLink::for_restaurant("http://localhost:8080", &restaurant(name, "x"));
        assert_eq!(link.download_file_name, expected);
    }
}
