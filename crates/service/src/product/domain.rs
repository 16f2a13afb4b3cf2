use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Stored product (business view). `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// Creation input; carries no id so an unassigned product can't reach a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl NewProduct {
    pub fn with_id(self, id: i32) -> Product {
        Product { id, name: self.name, description: self.description, price: self.price }
    }
}

impl TryFrom<models::product::Model> for Product {
    type Error = ServiceError;

    fn try_from(m: models::product::Model) -> Result<Self, Self::Error> {
        let price = m.decoded_price()?;
        Ok(Product { id: m.id, name: m.name, description: m.description, price })
    }
}
