use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::category::errors::CategoryError;
use crate::domain::file::errors::FileError;
use crate::domain::pagination::Page;
use crate::domain::pagination::Pagination;
use crate::domain::product::errors::ProductError;

pub mod create_category;
pub mod create_product;
pub mod delete_category;
pub mod delete_product;
pub mod get_category;
pub mod get_product;
pub mod list_categories;
pub mod list_products;
pub mod login;
pub mod logout;
pub mod product_form;
pub mod refresh;
pub mod register;
pub mod update_category;
pub mod update_product;

/// Successful response envelope: HTTP status plus `{success, message, data}`,
/// with `meta` present only on paginated listings.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: &str, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, data)))
    }

    pub fn paginated(status: StatusCode, message: &str, data: T, meta: PageMeta) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::paginated(message, data, meta)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    message: String,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<PageMeta>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
            meta: None,
        }
    }

    pub fn paginated(message: &str, data: T, meta: PageMeta) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
            meta: Some(meta),
        }
    }
}

/// Pagination block echoed back on listing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl PageMeta {
    pub fn of<T>(pagination: &Pagination, page: &Page<T>) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total: page.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// Wrap an infrastructure failure: log the cause, return a generic 500.
    fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!("Internal error: {}", cause);
        Self::InternalServerError("Internal server error".to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists(_) | AuthError::UsernameAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            AuthError::InvalidCredentials | AuthError::InvalidRefreshToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::UserNotFound(_) | AuthError::RefreshTokenNotFound => {
                ApiError::NotFound(err.to_string())
            }
            AuthError::InvalidUserId(_)
            | AuthError::InvalidUsername(_)
            | AuthError::InvalidEmail(_) => ApiError::UnprocessableEntity(err.to_string()),
            AuthError::DatabaseError(_) | AuthError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::InvalidCategoryId(_) => ApiError::BadRequest(err.to_string()),
            CategoryError::NameTooShort { .. } => ApiError::UnprocessableEntity(err.to_string()),
            CategoryError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CategoryError::HasLinkedProducts => ApiError::BadRequest(err.to_string()),
            CategoryError::DatabaseError(_) | CategoryError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::InvalidProductId(_) | ProductError::ImageRequired => {
                ApiError::BadRequest(err.to_string())
            }
            ProductError::NotFound(_) | ProductError::CategoryNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ProductError::File(file_err) => ApiError::from(file_err),
            ProductError::DatabaseError(_) | ProductError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<FileError> for ApiError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::InvalidFileId(_) | FileError::InvalidUpload => {
                ApiError::BadRequest(err.to_string())
            }
            FileError::NotFound(_) => ApiError::NotFound(err.to_string()),
            FileError::StorageError(_) | FileError::DatabaseError(_) | FileError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

/// Failure envelope: `{success: false, statusCode, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    success: bool,
    #[serde(rename = "statusCode")]
    status_code: u16,
    message: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            success: false,
            status_code: status_code.as_u16(),
            message,
        }
    }
}
