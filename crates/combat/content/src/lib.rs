//! Data-driven combat content and loaders.
//!
//! This crate houses the static content the combat core consumes through its
//! oracle traits, and loaders for the RON/TOML files that describe it:
//! - Monster templates (data-driven via RON)
//! - Terrain, cover and hazard catalogs (data-driven via RON)
//! - Room layouts (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//!
//! Content is looked up by identifier and never appears in encounter state;
//! monsters are spawned from their templates as fresh participants.

pub mod catalog;
pub mod monsters;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::Catalog;
pub use monsters::{MonsterCatalog, MonsterDefinition};

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, LoadResult, MonsterLoader, RoomLoader,
};
