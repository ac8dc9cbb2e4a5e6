use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::slugify;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryFilter;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CreateCategoryCommand;
use crate::domain::category::models::UpdateCategoryCommand;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::category::ports::CategoryServicePort;
use crate::domain::pagination::Page;

const MIN_NAME_LENGTH: usize = 2;

/// Domain service implementation for category operations.
pub struct CategoryService<CR>
where
    CR: CategoryRepository,
{
    repository: Arc<CR>,
}

impl<CR> CategoryService<CR>
where
    CR: CategoryRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }

    fn validate_name(name: &str) -> Result<(), CategoryError> {
        if name.trim().len() < MIN_NAME_LENGTH {
            return Err(CategoryError::NameTooShort {
                min: MIN_NAME_LENGTH,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<CR> CategoryServicePort for CategoryService<CR>
where
    CR: CategoryRepository,
{
    async fn create_category(
        &self,
        command: CreateCategoryCommand,
    ) -> Result<Category, CategoryError> {
        Self::validate_name(&command.name)?;

        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            slug: slugify(&command.name),
            name: command.name,
            description: command.description,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(category).await
    }

    async fn list_categories(
        &self,
        filter: CategoryFilter,
    ) -> Result<Page<Category>, CategoryError> {
        self.repository.find_and_count(&filter).await
    }

    async fn get_category(&self, id: &CategoryId) -> Result<Category, CategoryError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id.to_string()))
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        command: UpdateCategoryCommand,
    ) -> Result<Category, CategoryError> {
        let mut category = self.get_category(id).await?;

        if let Some(new_name) = command.name {
            Self::validate_name(&new_name)?;
            category.slug = slugify(&new_name);
            category.name = new_name;
        }

        if let Some(new_description) = command.description {
            category.description = Some(new_description);
        }

        category.updated_at = Utc::now();

        self.repository.update(category).await
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), CategoryError> {
        let category = self.get_category(id).await?;

        if self.repository.has_products(&category.id).await? {
            return Err(CategoryError::HasLinkedProducts);
        }

        self.repository.delete(&category.id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestCategoryRepository {}

        #[async_trait]
        impl CategoryRepository for TestCategoryRepository {
            async fn create(&self, category: Category) -> Result<Category, CategoryError>;
            async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, CategoryError>;
            async fn find_and_count(&self, filter: &CategoryFilter) -> Result<Page<Category>, CategoryError>;
            async fn update(&self, category: Category) -> Result<Category, CategoryError>;
            async fn delete(&self, id: &CategoryId) -> Result<(), CategoryError>;
            async fn has_products(&self, id: &CategoryId) -> Result<bool, CategoryError>;
        }
    }

    fn test_category() -> Category {
        let now = Utc::now();
        Category {
            id: CategoryId::new(),
            name: "Electronics".to_string(),
            slug: "electronics".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_category_slugifies_name() {
        let mut repository = MockTestCategoryRepository::new();

        repository
            .expect_create()
            .withf(|c| c.name == "Home & Garden" && c.slug == "home-garden")
            .times(1)
            .returning(|c| Ok(c));

        let service = CategoryService::new(Arc::new(repository));

        let category = service
            .create_category(CreateCategoryCommand {
                name: "Home & Garden".to_string(),
                description: Some("Outdoor things".to_string()),
            })
            .await
            .expect("create failed");

        assert_eq!(category.slug, "home-garden");
    }

    #[tokio::test]
    async fn test_create_category_rejects_short_name() {
        let mut repository = MockTestCategoryRepository::new();
        repository.expect_create().times(0);

        let service = CategoryService::new(Arc::new(repository));

        let result = service
            .create_category(CreateCategoryCommand {
                name: "X".to_string(),
                description: None,
            })
            .await;

        assert!(matches!(result, Err(CategoryError::NameTooShort { .. })));
    }

    #[tokio::test]
    async fn test_get_category_not_found() {
        let mut repository = MockTestCategoryRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = CategoryService::new(Arc::new(repository));

        let result = service.get_category(&CategoryId::new()).await;
        assert!(matches!(result, Err(CategoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_category_reslugifies_on_rename() {
        let existing = test_category();
        let id = existing.id;

        let mut repository = MockTestCategoryRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(|c| c.name == "Small Appliances" && c.slug == "small-appliances")
            .times(1)
            .returning(|c| Ok(c));

        let service = CategoryService::new(Arc::new(repository));

        let updated = service
            .update_category(
                &id,
                UpdateCategoryCommand {
                    name: Some("Small Appliances".to_string()),
                    description: None,
                },
            )
            .await
            .expect("update failed");

        assert_eq!(updated.slug, "small-appliances");
    }

    #[tokio::test]
    async fn test_delete_category_with_products_fails() {
        let existing = test_category();
        let id = existing.id;

        let mut repository = MockTestCategoryRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_has_products()
            .times(1)
            .returning(|_| Ok(true));
        repository.expect_delete().times(0);

        let service = CategoryService::new(Arc::new(repository));

        let result = service.delete_category(&id).await;
        assert!(matches!(result, Err(CategoryError::HasLinkedProducts)));
    }

    #[tokio::test]
    async fn test_delete_category_success() {
        let existing = test_category();
        let id = existing.id;

        let mut repository = MockTestCategoryRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_has_products()
            .times(1)
            .returning(|_| Ok(false));
        repository.expect_delete().times(1).returning(|_| Ok(()));

        let service = CategoryService::new(Arc::new(repository));

        service.delete_category(&id).await.expect("delete failed");
    }
}
