//! Sample inventory loaded at startup.

use std::sync::Arc;

use stockroom_core::DomainResult;
use stockroom_inventory::{Inventory, Part, Product};

/// Register a small bicycle-shop catalog.
///
/// Every entity passes boundary validation before it is added, the same check a
/// form would run on user input.
pub fn load_sample_inventory(inventory: &Inventory) -> DomainResult<()> {
    let brakes = add_part(
        inventory,
        Part::in_house(inventory.get_new_part_id()?, "Brakes", 15.00, 10, 1, 20, 101),
    )?;
    let wheel = add_part(
        inventory,
        Part::outsourced(inventory.get_new_part_id()?, "Wheel", 11.00, 16, 2, 30, "Spoke & Rim Co"),
    )?;
    let seat = add_part(
        inventory,
        Part::in_house(inventory.get_new_part_id()?, "Seat", 15.00, 10, 1, 20, 102),
    )?;

    let mut bike = Product::new(inventory.get_new_product_id()?, "Giant Bike", 299.99, 5, 1, 10);
    bike.add_associated_part(Arc::clone(&brakes));
    bike.add_associated_part(Arc::clone(&wheel));
    bike.add_associated_part(Arc::clone(&wheel));
    bike.add_associated_part(Arc::clone(&seat));
    add_product(inventory, bike)?;

    let mut tricycle = Product::new(inventory.get_new_product_id()?, "Tricycle", 99.99, 3, 1, 5);
    for _ in 0..3 {
        tricycle.add_associated_part(Arc::clone(&wheel));
    }
    tricycle.add_associated_part(seat);
    add_product(inventory, tricycle)?;

    add_product(
        inventory,
        Product::new(inventory.get_new_product_id()?, "Frame Kit", 49.99, 2, 0, 8),
    )?;

    tracing::info!(
        parts = inventory.part_count(),
        products = inventory.product_count(),
        "sample inventory loaded"
    );
    Ok(())
}

fn add_part(inventory: &Inventory, part: Part) -> DomainResult<Arc<Part>> {
    part.validate()?;
    let part = Arc::new(part);
    inventory.add_part(Arc::clone(&part));
    Ok(part)
}

fn add_product(inventory: &Inventory, product: Product) -> DomainResult<Arc<Product>> {
    product.validate()?;
    let product = Arc::new(product);
    inventory.add_product(Arc::clone(&product));
    Ok(product)
}
