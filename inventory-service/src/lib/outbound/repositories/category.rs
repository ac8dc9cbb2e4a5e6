use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryFilter;
use crate::domain::category::models::CategoryId;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::pagination::Page;

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    slug: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId(row.id),
            name: row.name,
            slug: row.slug,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: Category) -> Result<Category, CategoryError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(category.id.0)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        Ok(category)
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, CategoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, description, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(Category::from))
    }

    async fn find_and_count(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Page<Category>, CategoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, description, created_at, updated_at
            FROM categories
            WHERE ($1::text IS NULL OR slug ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&filter.slug)
        .bind(&filter.name)
        .bind(i64::from(filter.pagination.limit))
        .bind(i64::from(filter.pagination.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM categories
            WHERE ($1::text IS NULL OR slug ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
            "#,
        )
        .bind(&filter.slug)
        .bind(&filter.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        Ok(Page {
            items: rows.into_iter().map(Category::from).collect(),
            total: total as u64,
        })
    }

    async fn update(&self, category: Category) -> Result<Category, CategoryError> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, slug = $3, description = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(category.id.0)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CategoryError::NotFound(category.id.to_string()));
        }

        Ok(category)
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), CategoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CategoryError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn has_products(&self, id: &CategoryId) -> Result<bool, CategoryError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM products WHERE category_id = $1)
            "#,
        )
        .bind(id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))
    }
}
