use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::UpdateCategoryCommand;
use crate::inbound::http::messages::CategoryData;
use crate::inbound::http::router::AppState;

pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(body): Json<UpdateCategoryRequestBody>,
) -> Result<ApiSuccess<CategoryData>, ApiError> {
    let category_id =
        CategoryId::from_string(&category_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let command = UpdateCategoryCommand {
        name: body.name,
        description: body.description,
    };

    state
        .category_service
        .update_category(&category_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref category| {
            ApiSuccess::new(
                StatusCode::OK,
                "Category updated successfully",
                category.into(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct UpdateCategoryRequestBody {
    name: Option<String>,
    description: Option<String>,
}
