use std::str::FromStr;

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Exact decimal text, e.g. `"9.99"`.
    pub price: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column encoding for prices. Keeps scale, so `9.90` stays `9.90`.
pub fn encode_price(price: Decimal) -> String {
    price.to_string()
}

pub fn decode_price(raw: &str) -> Result<Decimal, ModelError> {
    Decimal::from_str(raw.trim()).map_err(|e| ModelError::Corrupt { column: "price", reason: e.to_string() })
}

impl Model {
    pub fn decoded_price(&self) -> Result<Decimal, ModelError> {
        decode_price(&self.price)
    }
}
