use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::product::domain::{NewProduct, Product};
use crate::product::repository::ProductRepository;

#[derive(Debug, Default)]
struct Rows {
    /// Last id handed out; ids are never reused, even after deletion.
    last_id: i32,
    by_id: BTreeMap<i32, Product>,
}

/// Process-lifetime product store.
///
/// One lock guards both the id counter and the rows, and every operation takes it once,
/// so concurrent writers to the same id can't interleave a read with a write. Ids grow
/// monotonically, so ascending key order is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: RwLock<Rows>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = self.rows.read().await;
        Ok(rows.by_id.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let rows = self.rows.read().await;
        Ok(rows.by_id.get(&id).cloned())
    }

    async fn add(&self, product: NewProduct) -> Result<Product, ServiceError> {
        let mut rows = self.rows.write().await;
        let id = rows
            .last_id
            .checked_add(1)
            .ok_or_else(|| ServiceError::Db("product id space exhausted".into()))?;
        rows.last_id = id;
        let stored = product.with_id(id);
        rows.by_id.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, product: Product) -> Result<bool, ServiceError> {
        let mut rows = self.rows.write().await;
        match rows.by_id.get_mut(&product.id) {
            Some(slot) => {
                *slot = product;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let mut rows = self.rows.write().await;
        Ok(rows.by_id.remove(&id).is_some())
    }
}
