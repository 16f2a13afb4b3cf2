use async_trait::async_trait;

use super::domain::{NewProduct, Product};
use crate::errors::ServiceError;

/// Repository abstraction for product persistence.
///
/// The only error class is a backing-store failure. Absence is never an error.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All stored products in insertion order; empty when none exist.
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError>;
    /// Stores `product` under a freshly assigned id and returns the stored value.
    async fn add(&self, product: NewProduct) -> Result<Product, ServiceError>;
    /// Replaces the product with the same id. Returns `false` (and creates nothing) when absent.
    async fn update(&self, product: Product) -> Result<bool, ServiceError>;
    /// Returns whether a product was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Misbehaving repositories for exercising failure paths in tests and doc examples
pub mod mock {
    use super::*;

    /// Every call fails as if the store were unreachable.
    #[derive(Debug, Clone)]
    pub struct FailingProductRepository {
        pub reason: String,
    }

    impl Default for FailingProductRepository {
        fn default() -> Self {
            Self { reason: "store unavailable".into() }
        }
    }

    impl FailingProductRepository {
        fn fail<T>(&self) -> Result<T, ServiceError> {
            Err(ServiceError::Db(self.reason.clone()))
        }
    }

    #[async_trait]
    impl ProductRepository for FailingProductRepository {
        async fn list(&self) -> Result<Vec<Product>, ServiceError> { self.fail() }
        async fn get(&self, _id: i32) -> Result<Option<Product>, ServiceError> { self.fail() }
        async fn add(&self, _product: NewProduct) -> Result<Product, ServiceError> { self.fail() }
        async fn update(&self, _product: Product) -> Result<bool, ServiceError> { self.fail() }
        async fn delete(&self, _id: i32) -> Result<bool, ServiceError> { self.fail() }
    }

    /// Every call panics; stands in for a programming defect below the transport.
    #[derive(Debug, Clone, Default)]
    pub struct PanickingProductRepository;

    #[async_trait]
    impl ProductRepository for PanickingProductRepository {
        async fn list(&self) -> Result<Vec<Product>, ServiceError> { panic!("list exploded") }
        async fn get(&self, _id: i32) -> Result<Option<Product>, ServiceError> { panic!("get exploded") }
        async fn add(&self, _product: NewProduct) -> Result<Product, ServiceError> { panic!("add exploded") }
        async fn update(&self, _product: Product) -> Result<bool, ServiceError> { panic!("update exploded") }
        async fn delete(&self, _id: i32) -> Result<bool, ServiceError> { panic!("delete exploded") }
    }
}
