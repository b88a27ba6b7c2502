//! The inventory registry: the single source of truth for parts and products.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

use stockroom_core::{DomainError, DomainResult, PartId, ProductId, RegistryId};
use stockroom_events::{EventBus, EventEnvelope, InMemoryEventBus, Subscription};

use crate::catalog::{Catalog, CatalogChange};
use crate::event::{
    InventoryEvent, PartAdded, PartDeleted, PartReplaced, ProductAdded, ProductDeleted,
    ProductReplaced,
};
use crate::part::Part;
use crate::product::Product;

/// Envelope type delivered to [`Inventory::subscribe`] subscriptions.
pub type InventoryEnvelope = EventEnvelope<InventoryEvent>;

/// Numbers events and fans them out.
///
/// Called with a catalog lock held; the sequence lock is always taken second,
/// so the two catalogs never wait on each other.
#[derive(Debug)]
struct ChangePublisher {
    registry_id: RegistryId,
    sequence: Mutex<u64>,
    bus: InMemoryEventBus<InventoryEnvelope>,
}

impl ChangePublisher {
    fn publish(&self, event: InventoryEvent) {
        let mut sequence = self.sequence.lock().unwrap_or_else(PoisonError::into_inner);
        *sequence += 1;
        let envelope = EventEnvelope::new(self.registry_id, *sequence, event);
        if let Err(err) = self.bus.publish(envelope) {
            tracing::warn!(registry_id = %self.registry_id, error = ?err, "failed to publish inventory event");
        }
    }
}

fn part_event(change: CatalogChange<PartId>) -> InventoryEvent {
    let occurred_at = Utc::now();
    match change {
        CatalogChange::Added { id, position } => InventoryEvent::PartAdded(PartAdded {
            part_id: id,
            position,
            occurred_at,
        }),
        CatalogChange::Replaced {
            position,
            replaced_id,
            id,
        } => InventoryEvent::PartReplaced(PartReplaced {
            position,
            replaced_id,
            part_id: id,
            occurred_at,
        }),
        CatalogChange::Removed { id, position } => InventoryEvent::PartDeleted(PartDeleted {
            part_id: id,
            position,
            occurred_at,
        }),
    }
}

fn product_event(change: CatalogChange<ProductId>) -> InventoryEvent {
    let occurred_at = Utc::now();
    match change {
        CatalogChange::Added { id, position } => InventoryEvent::ProductAdded(ProductAdded {
            product_id: id,
            position,
            occurred_at,
        }),
        CatalogChange::Replaced {
            position,
            replaced_id,
            id,
        } => InventoryEvent::ProductReplaced(ProductReplaced {
            position,
            replaced_id,
            product_id: id,
            occurred_at,
        }),
        CatalogChange::Removed { id, position } => {
            InventoryEvent::ProductDeleted(ProductDeleted {
                product_id: id,
                position,
                occurred_at,
            })
        }
    }
}

/// In-memory registry of parts and products.
///
/// Construct one per application (or per test) and share it by reference or
/// `Arc`. All operations take `&self`; each collection and its id counter sit
/// behind a single lock.
///
/// Entities are handed around as `Arc`s. Identity (for deletion and for
/// product/part association) is the allocation, not the field values.
#[derive(Debug)]
pub struct Inventory {
    id: RegistryId,
    parts: Catalog<Part>,
    products: Catalog<Product>,
    publisher: ChangePublisher,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        let id = RegistryId::new();
        Self {
            id,
            parts: Catalog::new(),
            products: Catalog::new(),
            publisher: ChangePublisher {
                registry_id: id,
                sequence: Mutex::new(0),
                bus: InMemoryEventBus::new(),
            },
        }
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    /// All parts in insertion order.
    ///
    /// This is a snapshot of the handles: parts added or removed afterwards are
    /// not reflected in the returned vector. Use [`Inventory::subscribe`] to
    /// follow changes.
    pub fn get_all_parts(&self) -> Vec<Arc<Part>> {
        self.parts.snapshot()
    }

    /// All products in insertion order (snapshot, see [`Inventory::get_all_parts`]).
    pub fn get_all_products(&self) -> Vec<Arc<Product>> {
        self.products.snapshot()
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Append a part. Ids are not checked for uniqueness.
    pub fn add_part(&self, part: Arc<Part>) {
        self.parts.push(part, |change| {
            tracing::debug!(registry_id = %self.id, ?change, "part added");
            self.publisher.publish(part_event(change));
        });
    }

    /// Append a product. Ids are not checked for uniqueness.
    pub fn add_product(&self, product: Arc<Product>) {
        self.products.push(product, |change| {
            tracing::debug!(registry_id = %self.id, ?change, "product added");
            self.publisher.publish(product_event(change));
        });
    }

    /// Issue the next part id (1, 2, 3, ...). Issued ids are never reused,
    /// whether or not a part is ever added with them. Fails with
    /// `IdsExhausted` after `u32::MAX` ids.
    pub fn get_new_part_id(&self) -> DomainResult<PartId> {
        self.parts.next_id()
    }

    /// Issue the next product id; independent of the part counter.
    pub fn get_new_product_id(&self) -> DomainResult<ProductId> {
        self.products.next_id()
    }

    /// Find a part by id.
    ///
    /// When several parts share an id, the one nearest the end of the
    /// collection wins.
    pub fn lookup_part(&self, part_id: PartId) -> Option<Arc<Part>> {
        self.parts.find_by_id(part_id)
    }

    /// All parts whose name equals `name` exactly (case-sensitive).
    pub fn lookup_part_by_name(&self, name: &str) -> Vec<Arc<Part>> {
        self.parts.find_by_name(name)
    }

    /// Find a product by id; last match wins, as for [`Inventory::lookup_part`].
    pub fn lookup_product(&self, product_id: ProductId) -> Option<Arc<Product>> {
        self.products.find_by_id(product_id)
    }

    /// All products whose name equals `name` exactly (case-sensitive).
    pub fn lookup_product_by_name(&self, name: &str) -> Vec<Arc<Product>> {
        self.products.find_by_name(name)
    }

    /// Parts whose name contains `fragment`, ignoring case.
    pub fn lookup_part_by_name_fragment(&self, fragment: &str) -> Vec<Arc<Part>> {
        self.parts.find_by_name_fragment(fragment)
    }

    /// Products whose name contains `fragment`, ignoring case.
    pub fn lookup_product_by_name_fragment(&self, fragment: &str) -> Vec<Arc<Product>> {
        self.products.find_by_name_fragment(fragment)
    }

    /// Search-box semantics: an id match if the query is a known id, otherwise
    /// a name-fragment search.
    pub fn search_parts(&self, query: &str) -> Vec<Arc<Part>> {
        if let Some(part) = query
            .parse::<PartId>()
            .ok()
            .and_then(|id| self.lookup_part(id))
        {
            return vec![part];
        }
        self.lookup_part_by_name_fragment(query)
    }

    /// Search-box semantics for products (see [`Inventory::search_parts`]).
    pub fn search_products(&self, query: &str) -> Vec<Arc<Product>> {
        if let Some(product) = query
            .parse::<ProductId>()
            .ok()
            .and_then(|id| self.lookup_product(id))
        {
            return vec![product];
        }
        self.lookup_product_by_name_fragment(query)
    }

    /// Position of the part [`Inventory::lookup_part`] would return.
    pub fn position_of_part(&self, part_id: PartId) -> Option<usize> {
        self.parts.position_of(part_id)
    }

    /// Position of the product [`Inventory::lookup_product`] would return.
    pub fn position_of_product(&self, product_id: ProductId) -> Option<usize> {
        self.products.position_of(product_id)
    }

    /// Replace the part at `index` (a position, not an id).
    pub fn update_part(&self, index: usize, part: Arc<Part>) -> DomainResult<()> {
        self.parts
            .replace(index, part, |change| {
                tracing::debug!(registry_id = %self.id, ?change, "part replaced");
                self.publisher.publish(part_event(change));
            })
            .inspect_err(|err| tracing::warn!(registry_id = %self.id, %err, "part update rejected"))
    }

    /// Replace the product at `index` (a position, not an id).
    pub fn update_product(&self, index: usize, product: Arc<Product>) -> DomainResult<()> {
        self.products
            .replace(index, product, |change| {
                tracing::debug!(registry_id = %self.id, ?change, "product replaced");
                self.publisher.publish(product_event(change));
            })
            .inspect_err(|err| {
                tracing::warn!(registry_id = %self.id, %err, "product update rejected")
            })
    }

    /// Remove `part` (by identity). `false` means it was not in the inventory.
    ///
    /// Products that list the part keep their handle to it.
    pub fn delete_part(&self, part: &Arc<Part>) -> bool {
        self.parts.remove(part, |change| {
            tracing::debug!(registry_id = %self.id, ?change, "part deleted");
            self.publisher.publish(part_event(change));
        })
    }

    /// Remove `product` (by identity). `false` means it was not in the inventory.
    pub fn delete_product(&self, product: &Arc<Product>) -> bool {
        self.products.remove(product, |change| {
            tracing::debug!(registry_id = %self.id, ?change, "product deleted");
            self.publisher.publish(product_event(change));
        })
    }

    /// Like [`Inventory::delete_product`], but refuses to remove a product
    /// that still lists associated parts.
    pub fn delete_product_checked(&self, product: &Arc<Product>) -> DomainResult<bool> {
        if product.has_associated_parts() {
            return Err(DomainError::conflict(format!(
                "product {} still has {} associated part(s)",
                product.id_typed(),
                product.all_associated_parts().len()
            )));
        }
        Ok(self.delete_product(product))
    }

    /// Registered products whose associated parts include `part` (by identity).
    pub fn products_using_part(&self, part: &Arc<Part>) -> Vec<Arc<Product>> {
        self.products.filter(|product| product.uses_part(part))
    }

    /// Receive an envelope for every mutation made from now on.
    ///
    /// Envelopes queue without bound until received. A subscription that is
    /// kept but never drained grows for the life of the registry; drop it once
    /// it is no longer read.
    pub fn subscribe(&self) -> Subscription<InventoryEnvelope> {
        self.publisher.bus.subscribe()
    }
}
