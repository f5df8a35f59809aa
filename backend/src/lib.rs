//! Backend library for the restaurant menu publishing service.
//!
//! Layers follow a ports-and-adapters split: [`domain`] holds types, ports
//! and services; [`inbound`] exposes them over HTTP; [`outbound`] implements
//! the driven ports for PostgreSQL, memory, the filesystem and remote HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
