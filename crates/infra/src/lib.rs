//! Infrastructure layer: the SQLite-backed store.
//!
//! The store is an explicitly passed handle (no globals): `main` opens it,
//! the router receives it, handlers call it.

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::SqliteStore;
