use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId, StockLevels};

use crate::part::Part;

/// A sellable item assembled from zero or more parts.
///
/// The product holds shared handles to its parts; it does not own them.
/// Removing a part from the inventory leaves it in every product that lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    stock: i32,
    min: i32,
    max: i32,
    associated_parts: Vec<Arc<Part>>,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            associated_parts: Vec::new(),
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    pub fn stock(&self) -> i32 {
        self.stock
    }

    pub fn set_stock(&mut self, stock: i32) {
        self.stock = stock;
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn set_min(&mut self, min: i32) {
        self.min = min;
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn set_max(&mut self, max: i32) {
        self.max = max;
    }

    pub fn levels(&self) -> StockLevels {
        StockLevels::new(self.stock, self.min, self.max)
    }

    /// Append a part handle. The same part may be listed more than once.
    pub fn add_associated_part(&mut self, part: Arc<Part>) {
        self.associated_parts.push(part);
    }

    /// Remove the first entry that is `part` itself (same allocation, not an
    /// equal copy). Returns whether anything was removed.
    pub fn delete_associated_part(&mut self, part: &Arc<Part>) -> bool {
        match self
            .associated_parts
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, part))
        {
            Some(index) => {
                self.associated_parts.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn all_associated_parts(&self) -> &[Arc<Part>] {
        &self.associated_parts
    }

    pub fn has_associated_parts(&self) -> bool {
        !self.associated_parts.is_empty()
    }

    /// Whether `part` (by identity) is listed on this product.
    pub fn uses_part(&self, part: &Arc<Part>) -> bool {
        self.associated_parts
            .iter()
            .any(|candidate| Arc::ptr_eq(candidate, part))
    }

    /// Sum of the current prices of the associated parts.
    pub fn parts_cost(&self) -> f64 {
        self.associated_parts.iter().map(|part| part.price()).sum()
    }

    /// Boundary validation for values entered by a user.
    ///
    /// Besides the stock bounds, a product may not sell for less than the
    /// parts it is made of.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(
                "price must be a finite, non-negative amount",
            ));
        }
        self.levels().validate()?;
        if self.price < self.parts_cost() {
            return Err(DomainError::validation(
                "product price cannot be less than the cost of its parts",
            ));
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::PartId;

    fn test_part(id: u32, name: &str, price: f64) -> Arc<Part> {
        Arc::new(Part::in_house(PartId::new(id), name, price, 5, 1, 10, 100))
    }

    fn test_product() -> Product {
        Product::new(ProductId::new(1), "Bicycle", 199.99, 3, 1, 5)
    }

    #[test]
    fn new_product_has_no_associated_parts() {
        let product = test_product();
        assert!(product.all_associated_parts().is_empty());
        assert!(!product.has_associated_parts());
        assert_eq!(product.id(), ProductId::new(1));
    }

    #[test]
    fn add_associated_part_keeps_order_and_duplicates() {
        let mut product = test_product();
        let wheel = test_part(1, "Wheel", 20.0);
        let seat = test_part(2, "Seat", 15.0);

        product.add_associated_part(wheel.clone());
        product.add_associated_part(seat.clone());
        product.add_associated_part(wheel.clone());

        let parts = product.all_associated_parts();
        assert_eq!(parts.len(), 3);
        assert!(Arc::ptr_eq(&parts[0], &wheel));
        assert!(Arc::ptr_eq(&parts[1], &seat));
        assert!(Arc::ptr_eq(&parts[2], &wheel));
    }

    #[test]
    fn delete_associated_part_removes_one_occurrence_by_identity() {
        let mut product = test_product();
        let wheel = test_part(1, "Wheel", 20.0);
        product.add_associated_part(wheel.clone());
        product.add_associated_part(wheel.clone());

        assert!(product.delete_associated_part(&wheel));
        assert_eq!(product.all_associated_parts().len(), 1);
        assert!(product.delete_associated_part(&wheel));
        assert!(!product.delete_associated_part(&wheel));
    }

    #[test]
    fn delete_associated_part_ignores_equal_copy() {
        let mut product = test_product();
        let wheel = test_part(1, "Wheel", 20.0);
        let twin = Arc::new((*wheel).clone());
        product.add_associated_part(wheel.clone());

        assert_eq!(*twin, *wheel);
        assert!(!product.delete_associated_part(&twin));
        assert!(product.uses_part(&wheel));
        assert!(!product.uses_part(&twin));
    }

    #[test]
    fn validate_rejects_price_below_parts_cost() {
        let mut product = Product::new(ProductId::new(2), "Cart", 30.0, 2, 1, 4);
        product.add_associated_part(test_part(1, "Wheel", 20.0));
        product.add_associated_part(test_part(2, "Wheel", 20.0));

        assert_eq!(product.parts_cost(), 40.0);
        match product.validate().unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("cost of its parts")),
            _ => panic!("Expected Validation error for underpriced product"),
        }

        product.set_price(40.0);
        assert!(product.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_finite_price() {
        for price in [f64::NAN, f64::INFINITY, -1.0] {
            let mut product = test_product();
            product.set_price(price);
            assert_eq!(
                product.validate().unwrap_err(),
                DomainError::validation("price must be a finite, non-negative amount")
            );
        }
    }

    #[test]
    fn validate_checks_stock_bounds() {
        let mut product = test_product();
        product.set_min(4);
        product.set_max(2);
        assert_eq!(
            product.validate().unwrap_err(),
            DomainError::validation("min must be less than max")
        );
    }
}
