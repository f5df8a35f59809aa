//! Diesel table definitions.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Restaurant owner accounts.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        /// Lowercased; unique via `users_email_key`.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    restaurants (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        /// Unique via `restaurants_slug_key`.
        slug -> Varchar,
        description -> Nullable<Text>,
        logo_url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    menu_items (id) {
        id -> Uuid,
        restaurant_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        price -> Float8,
        /// Category label, e.g. `Main Course`.
        category -> Varchar,
        image_url -> Nullable<Text>,
        model3d_url -> Nullable<Text>,
        featured -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(restaurants -> users (owner_id));
diesel::joinable!(menu_items -> restaurants (restaurant_id));

diesel::allow_tables_to_appear_in_same_query!(users, restaurants, menu_items);
