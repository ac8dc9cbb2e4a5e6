use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::category::ports::CategoryRepository;
use crate::domain::file::ports::FileServicePort;
use crate::domain::pagination::Page;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductFilter;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

/// Bucket holding product images.
pub const PRODUCT_BUCKET: &str = "product";

/// Domain service implementation for product operations.
///
/// Coordinates the product repository with the category repository (reference
/// checks) and the file service (image lifecycle).
pub struct ProductService<PR, CR, FS>
where
    PR: ProductRepository,
    CR: CategoryRepository,
    FS: FileServicePort,
{
    repository: Arc<PR>,
    categories: Arc<CR>,
    files: Arc<FS>,
}

impl<PR, CR, FS> ProductService<PR, CR, FS>
where
    PR: ProductRepository,
    CR: CategoryRepository,
    FS: FileServicePort,
{
    pub fn new(repository: Arc<PR>, categories: Arc<CR>, files: Arc<FS>) -> Self {
        Self {
            repository,
            categories,
            files,
        }
    }

    async fn ensure_category_exists(
        &self,
        id: &crate::domain::category::models::CategoryId,
    ) -> Result<(), ProductError> {
        let exists = self
            .categories
            .find_by_id(id)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?
            .is_some();

        if !exists {
            return Err(ProductError::CategoryNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<PR, CR, FS> ProductServicePort for ProductService<PR, CR, FS>
where
    PR: ProductRepository,
    CR: CategoryRepository,
    FS: FileServicePort,
{
    async fn create_product(
        &self,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        let image = command.image.ok_or(ProductError::ImageRequired)?;

        self.ensure_category_exists(&command.category_id).await?;

        let uploaded = self.files.store_upload(image, PRODUCT_BUCKET).await?;

        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: command.name,
            description: command.description,
            price: command.price,
            stock: command.stock,
            category_id: command.category_id,
            image_file_id: uploaded.id,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(product).await
    }

    async fn list_products(&self, filter: ProductFilter) -> Result<Page<Product>, ProductError> {
        self.repository.find_and_count(&filter).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))
    }

    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.get_product(id).await?;

        if let Some(new_category_id) = command.category_id {
            self.ensure_category_exists(&new_category_id).await?;
            product.category_id = new_category_id;
        }

        // The old file can only go once the product row points at the new one
        let mut replaced_image = None;
        if let Some(image) = command.image {
            let uploaded = self.files.store_upload(image, PRODUCT_BUCKET).await?;
            replaced_image = Some(product.image_file_id);
            product.image_file_id = uploaded.id;
        }

        if let Some(new_name) = command.name {
            product.name = new_name;
        }
        if let Some(new_description) = command.description {
            product.description = Some(new_description);
        }
        if let Some(new_price) = command.price {
            product.price = new_price;
        }
        if let Some(new_stock) = command.stock {
            product.stock = new_stock;
        }

        product.updated_at = Utc::now();

        let product = self.repository.update(product).await?;

        if let Some(old_image_id) = replaced_image {
            self.files.remove(&old_image_id).await?;
        }

        Ok(product)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError> {
        let product = self.get_product(id).await?;

        // Row first: the image file is still referenced until the product is gone
        self.repository.delete(id).await?;

        self.files.remove(&product.image_file_id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::category::errors::CategoryError;
    use crate::domain::category::models::Category;
    use crate::domain::category::models::CategoryFilter;
    use crate::domain::category::models::CategoryId;
    use crate::domain::file::errors::FileError;
    use crate::domain::file::models::FileId;
    use crate::domain::file::models::FileKind;
    use crate::domain::file::models::StoredFile;
    use crate::domain::file::models::UploadCommand;

    mock! {
        pub TestProductRepository {}

        #[async_trait]
        impl ProductRepository for TestProductRepository {
            async fn create(&self, product: Product) -> Result<Product, ProductError>;
            async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;
            async fn find_and_count(&self, filter: &ProductFilter) -> Result<Page<Product>, ProductError>;
            async fn update(&self, product: Product) -> Result<Product, ProductError>;
            async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
        }
    }

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

    mock! {
        pub TestFileService {}

        #[async_trait]
        impl FileServicePort for TestFileService {
            async fn store_upload(&self, command: UploadCommand, bucket: &str) -> Result<StoredFile, FileError>;
            async fn bulk_store(&self, commands: Vec<UploadCommand>, bucket: &str) -> Result<Vec<StoredFile>, FileError>;
            async fn get_file(&self, id: &FileId) -> Result<StoredFile, FileError>;
            async fn remove(&self, id: &FileId) -> Result<(), FileError>;
            async fn bulk_remove(&self, ids: &[FileId]) -> Result<(), FileError>;
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

    fn stored_file(id: FileId) -> StoredFile {
        StoredFile {
            id,
            filename: "photo.png".to_string(),
            bucket: PRODUCT_BUCKET.to_string(),
            path: format!("{}.png", id),
            mime_type: "image/png".to_string(),
            size: 3,
            kind: FileKind::Image,
            created_at: Utc::now(),
        }
    }

    fn image() -> UploadCommand {
        UploadCommand {
            filename: "photo.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn create_command(category_id: CategoryId, image: Option<UploadCommand>) -> CreateProductCommand {
        CreateProductCommand {
            name: "iPhone 15".to_string(),
            description: None,
            price: Decimal::new(99999, 2),
            stock: 50,
            category_id,
            image,
        }
    }

    fn test_product(category_id: CategoryId, image_file_id: FileId) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::new(),
            name: "iPhone 15".to_string(),
            description: None,
            price: Decimal::new(99999, 2),
            stock: 50,
            category_id,
            image_file_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_product_success() {
        let category = test_category();
        let category_id = category.id;
        let file_id = FileId::new();

        let mut repository = MockTestProductRepository::new();
        let mut categories = MockTestCategoryRepository::new();
        let mut files = MockTestFileService::new();

        categories
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(category.clone())));
        files
            .expect_store_upload()
            .withf(|_, bucket| bucket == PRODUCT_BUCKET)
            .times(1)
            .returning(move |_, _| Ok(stored_file(file_id)));
        repository
            .expect_create()
            .withf(move |p| p.image_file_id == file_id && p.stock == 50)
            .times(1)
            .returning(|p| Ok(p));

        let service =
            ProductService::new(Arc::new(repository), Arc::new(categories), Arc::new(files));

        let product = service
            .create_product(create_command(category_id, Some(image())))
            .await
            .expect("create failed");

        assert_eq!(product.category_id, category_id);
    }

    #[tokio::test]
    async fn test_create_product_requires_image() {
        let repository = MockTestProductRepository::new();
        let categories = MockTestCategoryRepository::new();
        let files = MockTestFileService::new();

        let service =
            ProductService::new(Arc::new(repository), Arc::new(categories), Arc::new(files));

        let result = service
            .create_product(create_command(CategoryId::new(), None))
            .await;

        assert!(matches!(result, Err(ProductError::ImageRequired)));
    }

    #[tokio::test]
    async fn test_create_product_unknown_category() {
        let repository = MockTestProductRepository::new();
        let mut categories = MockTestCategoryRepository::new();
        let mut files = MockTestFileService::new();

        categories
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        files.expect_store_upload().times(0);

        let service =
            ProductService::new(Arc::new(repository), Arc::new(categories), Arc::new(files));

        let result = service
            .create_product(create_command(CategoryId::new(), Some(image())))
            .await;

        assert!(matches!(result, Err(ProductError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_product_replaces_image() {
        let category_id = CategoryId::new();
        let old_file_id = FileId::new();
        let new_file_id = FileId::new();
        let existing = test_product(category_id, old_file_id);
        let product_id = existing.id;

        let mut repository = MockTestProductRepository::new();
        let categories = MockTestCategoryRepository::new();
        let mut files = MockTestFileService::new();

        let found = existing.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        files
            .expect_remove()
            .withf(move |id| *id == old_file_id)
            .times(1)
            .returning(|_| Ok(()));
        files
            .expect_store_upload()
            .times(1)
            .returning(move |_, _| Ok(stored_file(new_file_id)));
        repository
            .expect_update()
            .withf(move |p| p.image_file_id == new_file_id)
            .times(1)
            .returning(|p| Ok(p));

        let service =
            ProductService::new(Arc::new(repository), Arc::new(categories), Arc::new(files));

        let updated = service
            .update_product(
                &product_id,
                UpdateProductCommand {
                    image: Some(image()),
                    ..Default::default()
                },
            )
            .await
            .expect("update failed");

        assert_eq!(updated.image_file_id, new_file_id);
    }

    #[tokio::test]
    async fn test_delete_product_removes_image() {
        let category_id = CategoryId::new();
        let file_id = FileId::new();
        let existing = test_product(category_id, file_id);
        let product_id = existing.id;

        let mut repository = MockTestProductRepository::new();
        let categories = MockTestCategoryRepository::new();
        let mut files = MockTestFileService::new();

        let found = existing.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        files
            .expect_remove()
            .withf(move |id| *id == file_id)
            .times(1)
            .returning(|_| Ok(()));
        repository.expect_delete().times(1).returning(|_| Ok(()));

        let service =
            ProductService::new(Arc::new(repository), Arc::new(categories), Arc::new(files));

        service
            .delete_product(&product_id)
            .await
            .expect("delete failed");
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut repository = MockTestProductRepository::new();
        let categories = MockTestCategoryRepository::new();
        let files = MockTestFileService::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service =
            ProductService::new(Arc::new(repository), Arc::new(categories), Arc::new(files));

        let result = service.get_product(&ProductId::new()).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
