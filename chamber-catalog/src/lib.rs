//! Reloading catalog data model types.
//!
//! This crate defines the persistent data model without any database
//! dependencies. Consumers pass these types to `chamber-db` for persistence.

pub mod types;

pub use types::*;
