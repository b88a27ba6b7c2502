use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, PartId, StockLevels};

/// Where a part comes from, with the data specific to that origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartSource {
    /// Made on one of our own machines.
    InHouse { machine_id: i32 },
    /// Bought from an outside company.
    Outsourced { company_name: String },
}

/// A component used to build products.
///
/// Constructors and setters accept any values; run [`Part::validate`] at the
/// input boundary when the numbers come from a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    id: PartId,
    name: String,
    price: f64,
    stock: i32,
    min: i32,
    max: i32,
    source: PartSource,
}

impl Part {
    pub fn new(
        id: PartId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        source: PartSource,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            source,
        }
    }

    pub fn in_house(
        id: PartId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        machine_id: i32,
    ) -> Self {
        Self::new(id, name, price, stock, min, max, PartSource::InHouse { machine_id })
    }

    pub fn outsourced(
        id: PartId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        company_name: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            name,
            price,
            stock,
            min,
            max,
            PartSource::Outsourced {
                company_name: company_name.into(),
            },
        )
    }

    pub fn id_typed(&self) -> PartId {
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

    pub fn source(&self) -> &PartSource {
        &self.source
    }

    /// Switch the part between in-house and outsourced.
    pub fn set_source(&mut self, source: PartSource) {
        self.source = source;
    }

    pub fn is_in_house(&self) -> bool {
        matches!(self.source, PartSource::InHouse { .. })
    }

    pub fn machine_id(&self) -> Option<i32> {
        match self.source {
            PartSource::InHouse { machine_id } => Some(machine_id),
            PartSource::Outsourced { .. } => None,
        }
    }

    /// Only meaningful for in-house parts; returns `false` (and changes
    /// nothing) for an outsourced part.
    pub fn set_machine_id(&mut self, machine_id: i32) -> bool {
        match &mut self.source {
            PartSource::InHouse { machine_id: current } => {
                *current = machine_id;
                true
            }
            PartSource::Outsourced { .. } => false,
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        match &self.source {
            PartSource::Outsourced { company_name } => Some(company_name),
            PartSource::InHouse { .. } => None,
        }
    }

    /// Only meaningful for outsourced parts; returns `false` (and changes
    /// nothing) for an in-house part.
    pub fn set_company_name(&mut self, company_name: impl Into<String>) -> bool {
        match &mut self.source {
            PartSource::Outsourced { company_name: current } => {
                *current = company_name.into();
                true
            }
            PartSource::InHouse { .. } => false,
        }
    }

    pub fn levels(&self) -> StockLevels {
        StockLevels::new(self.stock, self.min, self.max)
    }

    /// Boundary validation for values entered by a user.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(
                "price must be a finite, non-negative amount",
            ));
        }
        if let PartSource::Outsourced { company_name } = &self.source {
            if company_name.trim().is_empty() {
                return Err(DomainError::validation("company name cannot be empty"));
            }
        }
        self.levels().validate()
    }
}

impl Entity for Part {
    type Id = PartId;

    fn id(&self) -> PartId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
