//! In-process repositories used when no database URL is configured.
//!
//! State lives behind a `std::sync::Mutex`; guards are never held across an
//! `.await`. A poisoned lock surfaces as the port's query error.

mod menu_store;
mod user_store;

pub use menu_store::InMemoryMenuStore;
pub use user_store::InMemoryUserRepository;
