use async_trait::async_trait;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryFilter;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CreateCategoryCommand;
use crate::domain::category::models::UpdateCategoryCommand;
use crate::domain::pagination::Page;

/// Port for category domain service operations.
#[async_trait]
pub trait CategoryServicePort: Send + Sync + 'static {
    async fn create_category(
        &self,
        command: CreateCategoryCommand,
    ) -> Result<Category, CategoryError>;

    async fn list_categories(
        &self,
        filter: CategoryFilter,
    ) -> Result<Page<Category>, CategoryError>;

    /// # Errors
    /// * `NotFound` - Category does not exist
    async fn get_category(&self, id: &CategoryId) -> Result<Category, CategoryError>;

    async fn update_category(
        &self,
        id: &CategoryId,
        command: UpdateCategoryCommand,
    ) -> Result<Category, CategoryError>;

    /// # Errors
    /// * `NotFound` - Category does not exist
    /// * `HasLinkedProducts` - Products still reference this category
    async fn delete_category(&self, id: &CategoryId) -> Result<(), CategoryError>;
}

/// Persistence operations for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    async fn create(&self, category: Category) -> Result<Category, CategoryError>;

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, CategoryError>;

    /// Filtered page of categories together with the unpaginated total.
    async fn find_and_count(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Page<Category>, CategoryError>;

    async fn update(&self, category: Category) -> Result<Category, CategoryError>;

    async fn delete(&self, id: &CategoryId) -> Result<(), CategoryError>;

    /// Whether any product still references the category.
    async fn has_products(&self, id: &CategoryId) -> Result<bool, CategoryError>;
}
