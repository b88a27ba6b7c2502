//! Inventory listing for logs.

use serde_json::{Value, json};

use stockroom_inventory::Inventory;

/// Both collections as JSON, in collection order.
pub fn snapshot_json(inventory: &Inventory) -> serde_json::Result<Value> {
    Ok(json!({
        "registry_id": inventory.id().to_string(),
        "parts": serde_json::to_value(inventory.get_all_parts())?,
        "products": serde_json::to_value(inventory.get_all_products())?,
    }))
}

/// Emit one `info` line per part and per product, in the order a table view
/// would show them.
pub fn log_listing(inventory: &Inventory) {
    for part in inventory.get_all_parts() {
        tracing::info!(
            part_id = %part.id_typed(),
            name = part.name(),
            price = part.price(),
            stock = part.stock(),
            machine_id = ?part.machine_id(),
            company_name = ?part.company_name(),
            "part"
        );
    }
    for product in inventory.get_all_products() {
        tracing::info!(
            product_id = %product.id_typed(),
            name = product.name(),
            price = product.price(),
            stock = product.stock(),
            associated_parts = product.all_associated_parts().len(),
            "product"
        );
    }
}
