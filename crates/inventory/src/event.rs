use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{PartId, ProductId};
use stockroom_events::Event;

/// Event: PartAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartAdded {
    pub part_id: PartId,
    pub position: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PartReplaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartReplaced {
    pub position: usize,
    pub replaced_id: PartId,
    pub part_id: PartId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PartDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDeleted {
    pub part_id: PartId,
    pub position: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub product_id: ProductId,
    pub position: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductReplaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductReplaced {
    pub position: usize,
    pub replaced_id: ProductId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDeleted {
    pub product_id: ProductId,
    pub position: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    PartAdded(PartAdded),
    PartReplaced(PartReplaced),
    PartDeleted(PartDeleted),
    ProductAdded(ProductAdded),
    ProductReplaced(ProductReplaced),
    ProductDeleted(ProductDeleted),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::PartAdded(_) => "inventory.part.added",
            InventoryEvent::PartReplaced(_) => "inventory.part.replaced",
            InventoryEvent::PartDeleted(_) => "inventory.part.deleted",
            InventoryEvent::ProductAdded(_) => "inventory.product.added",
            InventoryEvent::ProductReplaced(_) => "inventory.product.replaced",
            InventoryEvent::ProductDeleted(_) => "inventory.product.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::PartAdded(e) => e.occurred_at,
            InventoryEvent::PartReplaced(e) => e.occurred_at,
            InventoryEvent::PartDeleted(e) => e.occurred_at,
            InventoryEvent::ProductAdded(e) => e.occurred_at,
            InventoryEvent::ProductReplaced(e) => e.occurred_at,
            InventoryEvent::ProductDeleted(e) => e.occurred_at,
        }
    }
}
