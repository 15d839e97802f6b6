//! Relational schema and store layer for public-cloud image and server
//! metadata.
//!
//! One table per provider/entity pair ([`entities`]), a [`MetadataStore`]
//! offering validated insert/get/list/update/delete operations per table
//! ([`store`]), and a connection configurator ([`config`]) that assembles a
//! PostgreSQL URL from explicit settings or `POSTGRES_*` environment
//! variables. Cross-field invariants (image lifecycle date ordering,
//! change-info normalization, the update-server name requirement) are
//! enforced by [`validate`] before anything is written; per-region address
//! uniqueness is enforced by partial unique indexes in the backing store.

pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod store;
pub mod validate;

#[cfg(test)]
mod tests;

pub use config::{database_url, DbConfig};
pub use error::{Result, StorageError};
pub use store::MetadataStore;
