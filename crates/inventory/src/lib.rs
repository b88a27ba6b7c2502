//! Inventory domain module.
//!
//! Parts, products and the registry that holds them. Everything here is
//! in-memory and synchronous; nothing is persisted.

pub mod catalog;
pub mod event;
pub mod part;
pub mod product;
pub mod registry;

pub use catalog::{Catalog, CatalogChange};
pub use event::{
    InventoryEvent, PartAdded, PartDeleted, PartReplaced, ProductAdded, ProductDeleted,
    ProductReplaced,
};
pub use part::{Part, PartSource};
pub use product::Product;
pub use registry::{Inventory, InventoryEnvelope};
