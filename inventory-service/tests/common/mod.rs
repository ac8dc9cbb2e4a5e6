use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenIssuer;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use inventory_service::domain::auth::errors::AuthError;
use inventory_service::domain::auth::models::RefreshToken;
use inventory_service::domain::auth::models::RefreshTokenId;
use inventory_service::domain::auth::models::User;
use inventory_service::domain::auth::models::UserId;
use inventory_service::domain::auth::models::Username;
use inventory_service::domain::auth::ports::RefreshTokenRepository;
use inventory_service::domain::auth::ports::SystemClock;
use inventory_service::domain::auth::ports::UserRepository;
use inventory_service::domain::auth::service::AuthService;
use inventory_service::domain::category::errors::CategoryError;
use inventory_service::domain::category::models::Category;
use inventory_service::domain::category::models::CategoryFilter;
use inventory_service::domain::category::models::CategoryId;
use inventory_service::domain::category::ports::CategoryRepository;
use inventory_service::domain::category::service::CategoryService;
use inventory_service::domain::file::errors::FileError;
use inventory_service::domain::file::models::FileId;
use inventory_service::domain::file::models::StoredFile;
use inventory_service::domain::file::ports::FileRepository;
use inventory_service::domain::file::ports::ObjectStore;
use inventory_service::domain::file::service::FileService;
use inventory_service::domain::pagination::Page;
use inventory_service::domain::product::errors::ProductError;
use inventory_service::domain::product::models::Product;
use inventory_service::domain::product::models::ProductFilter;
use inventory_service::domain::product::models::ProductId;
use inventory_service::domain::product::ports::ProductRepository;
use inventory_service::domain::product::service::ProductService;
use inventory_service::inbound::http::router::create_router;
use inventory_service::inbound::http::router::AppState;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Shared in-memory tables backing every repository of one test app.
#[derive(Default)]
pub struct InMemoryDb {
    pub users: Mutex<Vec<User>>,
    pub refresh_tokens: Mutex<Vec<RefreshToken>>,
    pub categories: Mutex<Vec<Category>>,
    pub products: Mutex<Vec<Product>>,
    pub files: Mutex<Vec<StoredFile>>,
    pub blobs: Mutex<HashMap<String, Vec<u8>>>,
}

pub struct InMemoryUserRepository(pub Arc<InMemoryDb>);

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.0.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == *id)
            .cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == *username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }
}

pub struct InMemoryRefreshTokenRepository(pub Arc<InMemoryDb>);

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, AuthError> {
        self.0.refresh_tokens.lock().unwrap().push(token.clone());
        Ok(token)
    }

    async fn find_valid_for_user(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<RefreshToken>, AuthError> {
        Ok(self
            .0
            .refresh_tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == *user_id && t.expires_at > now)
            .cloned()
            .collect())
    }

    async fn revoke(&self, id: &RefreshTokenId) -> Result<(), AuthError> {
        self.0.refresh_tokens.lock().unwrap().retain(|t| t.id != *id);
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> Result<(), AuthError> {
        self.0
            .refresh_tokens
            .lock()
            .unwrap()
            .retain(|t| t.user_id != *user_id);
        Ok(())
    }
}

pub struct InMemoryCategoryRepository(pub Arc<InMemoryDb>);

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: Category) -> Result<Category, CategoryError> {
        self.0.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, CategoryError> {
        Ok(self
            .0
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn find_and_count(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Page<Category>, CategoryError> {
        let categories = self.0.categories.lock().unwrap();
        let matches: Vec<Category> = categories
            .iter()
            .filter(|c| {
                filter
                    .slug
                    .as_deref()
                    .map_or(true, |s| c.slug.contains(&s.to_lowercase()))
                    && filter
                        .name
                        .as_deref()
                        .map_or(true, |n| c.name.to_lowercase().contains(&n.to_lowercase()))
            })
            .cloned()
            .collect();

        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(filter.pagination.offset() as usize)
            .take(filter.pagination.limit as usize)
            .collect();

        Ok(Page { items, total })
    }

    async fn update(&self, category: Category) -> Result<Category, CategoryError> {
        let mut categories = self.0.categories.lock().unwrap();
        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => {
                *existing = category.clone();
                Ok(category)
            }
            None => Err(CategoryError::NotFound(category.id.to_string())),
        }
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), CategoryError> {
        let mut categories = self.0.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != *id);
        if categories.len() == before {
            return Err(CategoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn has_products(&self, id: &CategoryId) -> Result<bool, CategoryError> {
        Ok(self
            .0
            .products
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.category_id == *id))
    }
}

pub struct InMemoryProductRepository(pub Arc<InMemoryDb>);

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        self.0.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self
            .0
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *id)
            .cloned())
    }

    async fn find_and_count(&self, filter: &ProductFilter) -> Result<Page<Product>, ProductError> {
        let products = self.0.products.lock().unwrap();
        let mut matches: Vec<Product> = products
            .iter()
            .filter(|p| {
                filter.category_id.map_or(true, |c| p.category_id == c)
                    && filter.min_price.map_or(true, |min| p.price >= min)
                    && filter.max_price.map_or(true, |max| p.price <= max)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.price.cmp(&a.price));

        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(filter.pagination.offset() as usize)
            .take(filter.pagination.limit as usize)
            .collect();

        Ok(Page { items, total })
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.0.products.lock().unwrap();
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(product)
            }
            None => Err(ProductError::NotFound(product.id.to_string())),
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let mut products = self.0.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != *id);
        if products.len() == before {
            return Err(ProductError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

pub struct InMemoryFileRepository(pub Arc<InMemoryDb>);

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn create(&self, file: StoredFile) -> Result<StoredFile, FileError> {
        self.0.files.lock().unwrap().push(file.clone());
        Ok(file)
    }

    async fn find_by_id(&self, id: &FileId) -> Result<Option<StoredFile>, FileError> {
        Ok(self
            .0
            .files
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == *id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[FileId]) -> Result<Vec<StoredFile>, FileError> {
        Ok(self
            .0
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| ids.contains(&f.id))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &FileId) -> Result<(), FileError> {
        let mut files = self.0.files.lock().unwrap();
        let before = files.len();
        files.retain(|f| f.id != *id);
        if files.len() == before {
            return Err(FileError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[FileId]) -> Result<(), FileError> {
        self.0.files.lock().unwrap().retain(|f| !ids.contains(&f.id));
        Ok(())
    }
}

pub struct InMemoryObjectStore(pub Arc<InMemoryDb>);

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        _mime_type: &str,
        bytes: &[u8],
    ) -> Result<(), FileError> {
        self.0
            .blobs
            .lock()
            .unwrap()
            .insert(format!("{}/{}", bucket, path), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), FileError> {
        self.0
            .blobs
            .lock()
            .unwrap()
            .remove(&format!("{}/{}", bucket, path));
        Ok(())
    }
}

/// Test application that spawns the real router over in-memory adapters.
pub struct TestApp {
    pub address: String,
    pub db: Arc<InMemoryDb>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let db = Arc::new(InMemoryDb::default());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_issuer = Arc::new(TokenIssuer::new(TEST_SECRET));

        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository(Arc::clone(&db))),
            Arc::new(InMemoryRefreshTokenRepository(Arc::clone(&db))),
            SystemClock,
            Arc::clone(&token_issuer),
            Duration::minutes(15),
        ));
        let category_service = Arc::new(CategoryService::new(Arc::new(InMemoryCategoryRepository(
            Arc::clone(&db),
        ))));
        let file_service = Arc::new(FileService::new(
            Arc::new(InMemoryFileRepository(Arc::clone(&db))),
            Arc::new(InMemoryObjectStore(Arc::clone(&db))),
        ));
        let product_service = Arc::new(ProductService::new(
            Arc::new(InMemoryProductRepository(Arc::clone(&db))),
            Arc::new(InMemoryCategoryRepository(Arc::clone(&db))),
            file_service,
        ));

        let state = AppState {
            auth_service,
            category_service,
            product_service,
            token_issuer,
        };

        let router = create_router(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            db,
            api_client: reqwest::Client::new(),
        }
    }

    /// Register a user and return (access token, refresh token).
    pub async fn register_user(&self, username: &str, email: &str, password: &str) -> (String, String) {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["tokens"]["accessToken"]
                .as_str()
                .unwrap()
                .to_string(),
            body["data"]["tokens"]["refreshToken"]
                .as_str()
                .unwrap()
                .to_string(),
        )
    }

    /// Create a category through the API and return its id.
    pub async fn create_category(&self, token: &str, name: &str) -> String {
        let response = self
            .post_authenticated("/api/categories", token)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Create a product with an inline PNG payload and return its id.
    pub async fn create_product(
        &self,
        token: &str,
        category_id: &str,
        name: &str,
        price: &str,
    ) -> String {
        let form = reqwest::multipart::Form::new()
            .text("name", name.to_string())
            .text("price", price.to_string())
            .text("stock", "5")
            .text("categoryId", category_id.to_string())
            .part(
                "image",
                reqwest::multipart::Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
                    .file_name("photo.png")
                    .mime_str("image/png")
                    .unwrap(),
            );

        let response = self
            .post_authenticated("/api/products", token)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}
