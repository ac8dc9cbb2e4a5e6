use axum::extract::Multipart;
use rust_decimal::Decimal;

use super::ApiError;
use crate::domain::category::models::CategoryId;
use crate::domain::file::models::UploadCommand;

/// Fields accepted by the product multipart form.
///
/// Everything is optional at parse time; each handler enforces which fields
/// it actually requires.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category_id: Option<CategoryId>,
    pub image: Option<UploadCommand>,
}

pub async fn parse_product_form(mut multipart: Multipart) -> Result<ProductForm, ApiError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        match field_name.as_str() {
            "name" => form.name = Some(text(field).await?),
            "description" => form.description = Some(text(field).await?),
            "price" => {
                let raw = text(field).await?;
                let price = raw
                    .parse::<Decimal>()
                    .map_err(|_| ApiError::BadRequest(format!("Invalid price: {}", raw)))?;
                form.price = Some(price);
            }
            "stock" => {
                let raw = text(field).await?;
                let stock = raw
                    .parse::<i32>()
                    .map_err(|_| ApiError::BadRequest(format!("Invalid stock: {}", raw)))?;
                form.stock = Some(stock);
            }
            "categoryId" => {
                let raw = text(field).await?;
                let category_id = CategoryId::from_string(&raw)
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                form.category_id = Some(category_id);
            }
            "image" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid image upload: {}", e)))?
                    .to_vec();

                form.image = Some(UploadCommand {
                    filename,
                    mime_type,
                    bytes,
                });
            }
            // Unknown fields are ignored rather than rejected
            _ => {}
        }
    }

    Ok(form)
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {}", e)))
}
