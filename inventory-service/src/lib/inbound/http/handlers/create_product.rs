use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;

use super::product_form::parse_product_form;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::models::CreateProductCommand;
use crate::inbound::http::messages::ProductData;
use crate::inbound::http::router::AppState;

/// Create a product from a multipart form; the image part is mandatory.
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let form = parse_product_form(multipart).await?;

    let command = CreateProductCommand {
        name: form
            .name
            .ok_or_else(|| ApiError::BadRequest("Missing field: name".to_string()))?,
        description: form.description,
        price: form
            .price
            .ok_or_else(|| ApiError::BadRequest("Missing field: price".to_string()))?,
        stock: form
            .stock
            .ok_or_else(|| ApiError::BadRequest("Missing field: stock".to_string()))?,
        category_id: form
            .category_id
            .ok_or_else(|| ApiError::BadRequest("Missing field: categoryId".to_string()))?,
        image: form.image,
    };

    state
        .product_service
        .create_product(command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "Product created successfully",
                product.into(),
            )
        })
}
