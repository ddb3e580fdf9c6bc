//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Listing with optional name filter, newest first
//! - CRUD operations returning wire records with the category expanded
//!
//! ## Category Expansion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Records Are Built                                │
//! │                                                                         │
//! │  products p LEFT JOIN categories c ON c.id = p.category_id              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRow { product: Product, category_name: Option<String> }         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRecord { ..., category: {"id": "c1", "name": "Apparel"} }       │
//! │                                                                         │
//! │  Deleted category → FK sets category_id NULL → "category": null         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::error::{DbError, DbResult};
use storefront_core::{Category, NewProduct, Product, ProductChanges, ProductRecord};

const SELECT_RECORD: &str = r#"
    SELECT
        p.id,
        p.name,
        p.description,
        p.price_cents,
        p.category_id,
        p.quantity,
        p.brand,
        p.image,
        p.count_in_stock,
        p.created_at,
        p.updated_at,
        c.name AS category_name
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// A product row joined with its category name.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    #[sqlx(flatten)]
    product: Product,
    category_name: Option<String>,
}

impl ProductRow {
    fn into_record(self) -> ProductRecord {
        let category = match (&self.product.category_id, self.category_name) {
            (Some(id), Some(name)) => Some(Category {
                id: id.clone(),
                name,
            }),
            _ => None,
        };
        self.product.into_record(category)
    }
}

/// Filters for [`ProductRepository::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring of the product name.
    pub keyword: Option<String>,
    /// Maximum number of products to return.
    pub limit: Option<u32>,
}

impl ProductQuery {
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let newest = repo.list(&ProductQuery::default().limit(6)).await?;
/// let shirt = repo.get_record("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists product records, most recently created first.
    pub async fn list(&self, query: &ProductQuery) -> DbResult<Vec<ProductRecord>> {
        let keyword = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty());
        // SQLite treats a negative LIMIT as "no limit"
        let limit = query.limit.map(i64::from).unwrap_or(-1);

        debug!(keyword = ?keyword, limit = %limit, "Listing products");

        let sql = format!(
            "{SELECT_RECORD}
            WHERE (?1 IS NULL OR instr(lower(p.name), lower(?1)) > 0)
            ORDER BY p.rowid DESC
            LIMIT ?2"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(keyword)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed products");
        Ok(rows.into_iter().map(ProductRow::into_record).collect())
    }

    /// Gets a stored product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id, name, description, price_cents, category_id, quantity,
                brand, image, count_in_stock, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product record (category expanded) by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(ProductRecord))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_record(&self, id: &str) -> DbResult<Option<ProductRecord>> {
        let sql = format!("{SELECT_RECORD} WHERE p.id = ?1");

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ProductRow::into_record))
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(ProductRecord)` - Inserted product
    /// * `Err(DbError::NotFound)` - The category doesn't exist
    pub async fn insert(&self, product: &NewProduct) -> DbResult<ProductRecord> {
        debug!(name = %product.name, "Inserting product");

        let id = generate_id();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_cents, category_id, quantity,
                brand, image, count_in_stock, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            "#,
        )
        .bind(&id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(&product.category_id)
        .bind(product.quantity)
        .bind(&product.brand)
        .bind(&product.image)
        .bind(product.count_in_stock)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| missing_category(e, &product.category_id))?;

        self.get_record(&id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", &id))
    }

    /// Updates an existing product.
    ///
    /// Absent category, stock and image leave the stored values alone.
    ///
    /// ## Returns
    /// * `Ok(ProductRecord)` - The updated record
    /// * `Err(DbError::NotFound)` - Product or category doesn't exist
    pub async fn update(&self, id: &str, changes: &ProductChanges) -> DbResult<ProductRecord> {
        debug!(id = %id, "Updating product");

        let now = Utc::now();
        let (replace_image, image) = match &changes.image {
            Some(image) => (true, image.clone()),
            None => (false, None),
        };

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                category_id = COALESCE(?5, category_id),
                quantity = ?6,
                brand = ?7,
                image = CASE WHEN ?8 THEN ?9 ELSE image END,
                count_in_stock = COALESCE(?10, count_in_stock),
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price.cents())
        .bind(&changes.category_id)
        .bind(changes.quantity)
        .bind(&changes.brand)
        .bind(replace_image)
        .bind(image)
        .bind(changes.count_in_stock)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match &changes.category_id {
            Some(category_id) => missing_category(e, category_id),
            None => DbError::from(e),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_record(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product and returns the record it had.
    pub async fn delete(&self, id: &str) -> DbResult<ProductRecord> {
        debug!(id = %id, "Deleting product");

        let mut tx = self.pool.begin().await?;

        let sql = format!("{SELECT_RECORD} WHERE p.id = ?1");
        let record = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .map(ProductRow::into_record)
            .ok_or_else(|| DbError::not_found("Product", id))?;

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(record)
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// A foreign key failure on products can only mean an unknown category.
fn missing_category(err: sqlx::Error, category_id: &str) -> DbError {
    match DbError::from(err) {
        DbError::ForeignKeyViolation { .. } => DbError::not_found("Category", category_id),
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use storefront_core::{CategoryRef, Money};

    async fn db_with_category() -> (Database, Category) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db.categories().insert("Apparel").await.unwrap();
        (db, category)
    }

    fn new_product(name: &str, category_id: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "Cotton".to_string(),
            price: Money::from_major(20),
            category_id: category_id.to_string(),
            quantity: 1,
            brand: "Acme".to_string(),
            image: None,
            count_in_stock: 5,
        }
    }

    fn changes(price: Money) -> ProductChanges {
        ProductChanges {
            name: "Shirt".to_string(),
            description: "Cotton".to_string(),
            price,
            category_id: None,
            quantity: 1,
            brand: "Acme".to_string(),
            image: None,
            count_in_stock: None,
        }
    }

    #[tokio::test]
    async fn test_insert_returns_expanded_record() {
        let (db, category) = db_with_category().await;

        let record = db.products().insert(&new_product("Shirt", &category.id)).await.unwrap();
        assert_eq!(record.name, "Shirt");
        assert_eq!(record.price.cents(), 2000);
        assert_eq!(record.category, Some(CategoryRef::Expanded(category)));
        assert_eq!(record.count_in_stock, 5);
        assert!(record.created_at.is_some());
    }

    #[tokio::test]
    async fn test_insert_with_unknown_category() {
        let (db, _) = db_with_category().await;

        let err = db.products().insert(&new_product("Shirt", "nope")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Category"));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filters() {
        let (db, category) = db_with_category().await;
        let repo = db.products();
        repo.insert(&new_product("Red Shirt", &category.id)).await.unwrap();
        repo.insert(&new_product("Hat", &category.id)).await.unwrap();
        repo.insert(&new_product("Blue shirt", &category.id)).await.unwrap();

        let all = repo.list(&ProductQuery::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Blue shirt", "Hat", "Red Shirt"]);

        let shirts = repo.list(&ProductQuery::default().keyword("SHIRT")).await.unwrap();
        assert_eq!(shirts.len(), 2);

        let newest = repo.list(&ProductQuery::default().limit(1)).await.unwrap();
        assert_eq!(newest[0].name, "Blue shirt");

        let blank = repo.list(&ProductQuery::default().keyword("  ")).await.unwrap();
        assert_eq!(blank.len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_absent_fields() {
        let (db, category) = db_with_category().await;
        let repo = db.products();
        let mut product = new_product("Shirt", &category.id);
        product.image = Some("/uploads/shirt.png".to_string());
        let created = repo.insert(&product).await.unwrap();

        let updated = repo.update(&created.id, &changes(Money::from_major(25))).await.unwrap();
        assert_eq!(updated.price.cents(), 2500);
        assert_eq!(updated.category_id(), Some(category.id.as_str()));
        assert_eq!(updated.count_in_stock, 5);
        assert_eq!(updated.image.as_deref(), Some("/uploads/shirt.png"));
    }

    #[tokio::test]
    async fn test_update_replaces_and_clears() {
        let (db, category) = db_with_category().await;
        let other = db.categories().insert("Hats").await.unwrap();
        let repo = db.products();
        let created = repo.insert(&new_product("Shirt", &category.id)).await.unwrap();

        let mut edit = changes(Money::from_major(20));
        edit.category_id = Some(other.id.clone());
        edit.count_in_stock = Some(0);
        edit.image = Some(None);
        let updated = repo.update(&created.id, &edit).await.unwrap();

        assert_eq!(updated.category_id(), Some(other.id.as_str()));
        assert_eq!(updated.count_in_stock, 0);
        assert_eq!(updated.image, None);
    }

    #[tokio::test]
    async fn test_update_errors() {
        let (db, category) = db_with_category().await;
        let repo = db.products();

        let err = repo.update("missing", &changes(Money::zero())).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Product"));

        let created = repo.insert(&new_product("Shirt", &category.id)).await.unwrap();
        let mut edit = changes(Money::zero());
        edit.category_id = Some("nope".to_string());
        let err = repo.update(&created.id, &edit).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Category"));
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected_by_schema() {
        let (db, category) = db_with_category().await;
        let repo = db.products();
        let created = repo.insert(&new_product("Shirt", &category.id)).await.unwrap();

        let err = repo.update(&created.id, &changes(Money::from_cents(-1))).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }

    #[tokio::test]
    async fn test_delete_returns_record() {
        let (db, category) = db_with_category().await;
        let repo = db.products();
        let created = repo.insert(&new_product("Shirt", &category.id)).await.unwrap();

        let removed = repo.delete(&created.id).await.unwrap();
        assert_eq!(removed.name, "Shirt");
        assert!(repo.get_record(&created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&created.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_deleting_category_nulls_product_category() {
        let (db, category) = db_with_category().await;
        let created = db.products().insert(&new_product("Shirt", &category.id)).await.unwrap();

        db.categories().delete(&category.id).await.unwrap();

        let record = db.products().get_record(&created.id).await.unwrap().unwrap();
        assert_eq!(record.category, None);
        let stored = db.products().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.category_id, None);
    }
}
