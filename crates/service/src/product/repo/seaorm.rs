use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use models::product;

use crate::errors::ServiceError;
use crate::product::domain::{NewProduct, Product};
use crate::product::repository::ProductRepository;

/// SeaORM-backed repository implementation.
///
/// Ids come from the engine's auto-increment column. Update and delete are single
/// statements keyed by id, so no read-then-write window exists on this side.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let row = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        row.map(Product::try_from).transpose()
    }

    async fn add(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let am = product::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            price: Set(product::encode_price(input.price)),
        };
        let created = am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Product::try_from(created)
    }

    async fn update(&self, p: Product) -> Result<bool, ServiceError> {
        let res = product::Entity::update_many()
            .col_expr(product::Column::Name, Expr::value(p.name))
            .col_expr(product::Column::Description, Expr::value(p.description))
            .col_expr(product::Column::Price, Expr::value(product::encode_price(p.price)))
            .filter(product::Column::Id.eq(p.id))
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use rust_decimal::Decimal;

    use super::*;

    async fn repo() -> Result<SeaOrmProductRepository, anyhow::Error> {
        let db = models::db::connect_sqlite_memory().await?;
        migration::Migrator::up(&db, None).await?;
        Ok(SeaOrmProductRepository::new(db))
    }

    fn widget() -> NewProduct {
        NewProduct { name: "Widget".into(), description: "D".into(), price: Decimal::new(999, 2) }
    }

    #[tokio::test]
    async fn product_crud_against_sqlite() -> Result<(), anyhow::Error> {
        let repo = repo().await?;
        assert!(repo.list().await?.is_empty());

        let added = repo.add(widget()).await?;
        assert_eq!(repo.get(added.id).await?, Some(widget().with_id(added.id)));

        let mut changed = added.clone();
        changed.name = "Gadget".into();
        changed.price = Decimal::ZERO;
        assert!(repo.update(changed.clone()).await?);
        assert_eq!(repo.get(added.id).await?, Some(changed));

        assert!(repo.delete(added.id).await?);
        assert!(!repo.delete(added.id).await?);
        assert!(repo.get(added.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_row_creates_nothing() -> Result<(), anyhow::Error> {
        let repo = repo().await?;
        let ghost = widget().with_id(77);
        assert!(!repo.update(ghost).await?);
        assert!(repo.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_follows_insertion_order() -> Result<(), anyhow::Error> {
        let repo = repo().await?;
        for name in ["A", "B", "C"] {
            repo.add(NewProduct { name: name.into(), ..widget() }).await?;
        }
        let names: Vec<_> = repo.list().await?.into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["A", "B", "C"]);
        Ok(())
    }
}
