use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::product_form::parse_product_form;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::inbound::http::messages::ProductData;
use crate::inbound::http::router::AppState;

/// Partially update a product; a new image part replaces the stored one.
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    multipart: Multipart,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id =
        ProductId::from_string(&product_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let form = parse_product_form(multipart).await?;

    let command = UpdateProductCommand {
        name: form.name,
        description: form.description,
        price: form.price,
        stock: form.stock,
        category_id: form.category_id,
        image: form.image,
    };

    state
        .product_service
        .update_product(&product_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| {
            ApiSuccess::new(
                StatusCode::OK,
                "Product updated successfully",
                product.into(),
            )
        })
}
