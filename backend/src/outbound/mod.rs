//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories for database-less runs and tests
//! - **http**: reqwest-backed asset fetcher for the relay
//! - **security**: Argon2 credential hashing
//! - **storage**: capability-scoped filesystem store for uploads
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod http;
pub mod memory;
pub mod persistence;
pub mod security;
pub mod storage;
