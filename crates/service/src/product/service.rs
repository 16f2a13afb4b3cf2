use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{NewProduct, Product};
use super::repository::ProductRepository;
use crate::errors::ServiceError;

/// Product business service independent of web framework.
///
/// Today every operation delegates straight to the repository; rules such as price
/// auditing belong here rather than in the transport or the store. Repository failures
/// are returned unchanged.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        self.repo.get(id).await
    }

    /// Store a new product and return it with its assigned id.
    ///
    /// # Examples
    /// ```
    /// use service::product::{NewProduct, ProductService, repo::InMemoryProductRepository};
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::new()));
    /// let input = NewProduct { name: "Widget".into(), description: "D".into(), price: rust_decimal::Decimal::new(999, 2) };
    /// let created = tokio_test::block_on(svc.add(input)).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(tokio_test::block_on(svc.get(1)).unwrap(), Some(created));
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let created = self.repo.add(input).await?;
        info!(product_id = created.id, price = %created.price, "product_created");
        Ok(created)
    }

    /// Replace every field of an existing product. A missing id is a silent no-op.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn update(&self, product: Product) -> Result<(), ServiceError> {
        let id = product.id;
        if self.repo.update(product).await? {
            info!(product_id = id, "product_updated");
        } else {
            debug!(product_id = id, "update target absent; nothing changed");
        }
        Ok(())
    }

    /// Remove a product if present; removing an absent id succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.delete(id).await? {
            info!(product_id = id, "product_deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::product::repo::InMemoryProductRepository;
    use crate::product::repository::mock::FailingProductRepository;

    fn svc() -> ProductService<InMemoryProductRepository> {
        ProductService::new(Arc::new(InMemoryProductRepository::new()))
    }

    fn input(name: &str) -> NewProduct {
        NewProduct { name: name.into(), description: "D1".into(), price: Decimal::new(10, 0) }
    }

    #[tokio::test]
    async fn list_returns_all_products() -> Result<(), anyhow::Error> {
        let svc = svc();
        assert!(svc.list().await?.is_empty());
        let a = svc.add(input("A")).await?;
        let b = svc.add(input("B")).await?;
        assert_eq!(svc.list().await?, vec![a, b]);
        Ok(())
    }

    #[tokio::test]
    async fn get_returns_none_when_missing() -> Result<(), anyhow::Error> {
        assert_eq!(svc().get(99).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_ids_succeed_without_effect() -> Result<(), anyhow::Error> {
        let svc = svc();
        svc.update(input("Ghost").with_id(5)).await?;
        svc.delete(5).await?;
        svc.delete(5).await?;
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn repository_failures_propagate_unchanged() {
        let repo: Arc<dyn ProductRepository> = Arc::new(FailingProductRepository { reason: "DB error".into() });
        let svc = ProductService::new(repo);

        let err = svc.add(input("A")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(ref msg) if msg == "DB error"));
        assert!(matches!(svc.list().await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.get(1).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.update(input("A").with_id(1)).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.delete(1).await, Err(ServiceError::Db(_))));
    }
}
