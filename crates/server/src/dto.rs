//! Wire representations of products.
//!
//! Field names match the public JSON contract (`productID`, `name`, `description`, `price`)
//! and are kept apart from `service::product` types so either side can change shape alone.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use service::product::{NewProduct, Product};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    #[serde(rename = "productID")]
    pub product_id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self { product_id: p.id, name: p.name, description: p.description, price: p.price }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(max = 100, message = "Name cannot exceed 100 characters."))]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters."))]
    pub description: String,
    #[serde(deserialize_with = "json_number")]
    pub price: Decimal,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(r: CreateProductRequest) -> Self {
        NewProduct { name: r.name, description: r.description, price: r.price }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[serde(rename = "productID")]
    pub product_id: i32,
    #[validate(length(max = 100, message = "Name cannot exceed 100 characters."))]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters."))]
    pub description: String,
    #[serde(deserialize_with = "json_number")]
    pub price: Decimal,
}

impl From<UpdateProductRequest> for Product {
    fn from(r: UpdateProductRequest) -> Self {
        Product { id: r.product_id, name: r.name, description: r.description, price: r.price }
    }
}

/// `description` is optional on the wire: absent and `null` both mean empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        v.to_string()
            .parse::<Decimal>()
            .map_err(|_| E::invalid_value(de::Unexpected::Float(v), &self))
    }
}

/// `price` must be a JSON number; quoted decimals are rejected.
fn json_number<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(NumberVisitor)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn response_uses_wire_field_names() {
        let p = Product { id: 3, name: "Widget".into(), description: "D".into(), price: Decimal::new(999, 2) };
        let v = serde_json::to_value(ProductResponse::from(p)).unwrap();
        assert_eq!(v, json!({"productID": 3, "name": "Widget", "description": "D", "price": 9.99}));
    }

    #[test]
    fn description_may_be_absent_or_null() {
        let a: CreateProductRequest = serde_json::from_value(json!({"name": "A", "price": 1})).unwrap();
        assert_eq!(a.description, "");
        let b: CreateProductRequest =
            serde_json::from_value(json!({"name": "B", "description": null, "price": 2.5})).unwrap();
        assert_eq!(b.description, "");
        assert_eq!(b.price, Decimal::new(25, 1));
    }

    #[test]
    fn price_must_be_a_json_number() {
        let quoted = serde_json::from_value::<CreateProductRequest>(json!({"name": "A", "price": "9.99"}));
        assert!(quoted.is_err());
        let quoted = serde_json::from_value::<UpdateProductRequest>(
            json!({"productID": 1, "name": "A", "price": "1"}),
        );
        assert!(quoted.is_err());

        let exact: CreateProductRequest = serde_json::from_value(json!({"name": "A", "price": 9.99})).unwrap();
        assert_eq!(exact.price, Decimal::new(999, 2));
        let negative: CreateProductRequest = serde_json::from_value(json!({"name": "A", "price": -3})).unwrap();
        assert_eq!(negative.price, Decimal::from(-3));
    }

    #[test]
    fn update_request_reads_product_id() {
        let r: UpdateProductRequest = serde_json::from_value(
            json!({"productID": 7, "name": "N", "description": "D", "price": 0}),
        )
        .unwrap();
        let p = Product::from(r);
        assert_eq!(p.id, 7);
        assert_eq!(p.price, Decimal::ZERO);
    }
}
