//! Service layer providing the product operation contract on top of a pluggable store.
//! - `product::repository` defines the storage seam and its failure semantics.
//! - `product::service` is the business layer consumed by the HTTP transport.

pub mod errors;
pub mod product;
