//! Cache-control policies shared by handlers.

use actix_web::http::header::{CACHE_CONTROL, HeaderName};

/// Owner-specific payloads must be revalidated before reuse.
pub const PRIVATE_NO_CACHE: &str = "private, no-cache, must-revalidate";
/// Health answers are never stored.
pub const NO_STORE: &str = "no-store";

pub const fn private_no_cache_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, PRIVATE_NO_CACHE)
}

pub const fn no_store_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, NO_STORE)
}
