//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Two value objects with the same values are equal.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// - **Value Object**: no identity (two value objects with same values are equal)
/// - **Entity**: has identity (a `Part` with id 3 stays part 3 after a rename)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Inventory level together with its permitted bounds.
///
/// Entities store these three numbers without checking them; `validate` is the
/// boundary check a form layer runs before handing values to the registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    pub stock: i32,
    pub min: i32,
    pub max: i32,
}

impl ValueObject for StockLevels {}

impl StockLevels {
    pub fn new(stock: i32, min: i32, max: i32) -> Self {
        Self { stock, min, max }
    }

    /// `min <= max` and `min <= stock <= max`.
    pub fn validate(&self) -> DomainResult<()> {
        if self.min > self.max {
            return Err(DomainError::validation("min must be less than max"));
        }
        if !self.is_within_bounds() {
            return Err(DomainError::validation(
                "inventory must be between min and max",
            ));
        }
        Ok(())
    }

    pub fn is_within_bounds(&self) -> bool {
        self.min <= self.stock && self.stock <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_inside_bounds_are_valid() {
        assert!(StockLevels::new(10, 1, 20).validate().is_ok());
        assert!(StockLevels::new(5, 5, 5).validate().is_ok());
    }

    #[test]
    fn min_above_max_is_rejected_first() {
        let err = StockLevels::new(50, 30, 10).validate().unwrap_err();
        assert_eq!(err, DomainError::validation("min must be less than max"));
    }

    #[test]
    fn stock_outside_bounds_is_rejected() {
        let err = StockLevels::new(25, 1, 20).validate().unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("inventory must be between min and max")
        );
        assert!(!StockLevels::new(0, 1, 20).is_within_bounds());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: validation accepts exactly the ordered triples.
            #[test]
            fn validate_matches_ordering(stock in -50i32..50, min in -50i32..50, max in -50i32..50) {
                let levels = StockLevels::new(stock, min, max);
                let ordered = min <= stock && stock <= max;
                prop_assert_eq!(levels.validate().is_ok(), ordered);
            }
        }
    }
}
