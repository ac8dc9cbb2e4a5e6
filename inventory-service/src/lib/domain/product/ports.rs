use async_trait::async_trait;

use crate::domain::pagination::Page;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductFilter;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;

/// Port for product domain service operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `ImageRequired` - No image upload in the request
    /// * `CategoryNotFound` - Referenced category does not exist
    async fn create_product(&self, command: CreateProductCommand)
        -> Result<Product, ProductError>;

    async fn list_products(&self, filter: ProductFilter) -> Result<Page<Product>, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    /// Partial update; a new image replaces and deletes the previous one.
    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Deletes the product and its stored image.
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError>;
}

/// Persistence operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    /// Filtered page ordered by price descending, with the unpaginated total.
    async fn find_and_count(&self, filter: &ProductFilter) -> Result<Page<Product>, ProductError>;

    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
}
