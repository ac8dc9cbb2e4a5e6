use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::category::models::CategoryId;
use crate::domain::file::models::FileId;
use crate::domain::pagination::Page;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductFilter;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: i32,
    category_id: Uuid,
    image_file_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
            category_id: CategoryId(row.category_id),
            image_file_id: FileId(row.image_file_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, name, description, price, stock, category_id, image_file_id,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(product.id.0)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category_id.0)
        .bind(product.image_file_id.0)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, stock, category_id, image_file_id,
                   created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(row.map(Product::from))
    }

    async fn find_and_count(&self, filter: &ProductFilter) -> Result<Page<Product>, ProductError> {
        let category_id = filter.category_id.map(|id| id.0);

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, stock, category_id, image_file_id,
                   created_at, updated_at
            FROM products
            WHERE ($1::uuid IS NULL OR category_id = $1)
              AND ($2::numeric IS NULL OR price >= $2)
              AND ($3::numeric IS NULL OR price <= $3)
            ORDER BY price DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(category_id)
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(i64::from(filter.pagination.limit))
        .bind(i64::from(filter.pagination.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE ($1::uuid IS NULL OR category_id = $1)
              AND ($2::numeric IS NULL OR price >= $2)
              AND ($3::numeric IS NULL OR price <= $3)
            "#,
        )
        .bind(category_id)
        .bind(filter.min_price)
        .bind(filter.max_price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(Page {
            items: rows.into_iter().map(Product::from).collect(),
            total: total as u64,
        })
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, stock = $5,
                category_id = $6, image_file_id = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(product.id.0)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category_id.0)
        .bind(product.image_file_id.0)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.id.to_string()));
        }

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
