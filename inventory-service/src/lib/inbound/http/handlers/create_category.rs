use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::category::models::CreateCategoryCommand;
use crate::inbound::http::messages::CategoryData;
use crate::inbound::http::router::AppState;

pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequestBody>,
) -> Result<ApiSuccess<CategoryData>, ApiError> {
    let command = CreateCategoryCommand {
        name: body.name,
        description: body.description,
    };

    state
        .category_service
        .create_category(command)
        .await
        .map_err(ApiError::from)
        .map(|ref category| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "Category created successfully",
                category.into(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCategoryRequestBody {
    name: String,
    description: Option<String>,
}
