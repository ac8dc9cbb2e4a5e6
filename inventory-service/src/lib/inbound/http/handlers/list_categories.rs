use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PageMeta;
use crate::domain::category::models::CategoryFilter;
use crate::domain::pagination::Pagination;
use crate::inbound::http::messages::CategoryData;
use crate::inbound::http::router::AppState;

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<ApiSuccess<Vec<CategoryData>>, ApiError> {
    let pagination = Pagination::new(query.page, query.limit);
    let filter = CategoryFilter {
        slug: query.slug,
        name: query.name,
        pagination,
    };

    let page = state
        .category_service
        .list_categories(filter)
        .await
        .map_err(ApiError::from)?;

    let data = page.items.iter().map(CategoryData::from).collect();

    Ok(ApiSuccess::paginated(
        StatusCode::OK,
        "Categories fetched successfully",
        data,
        PageMeta::of(&pagination, &page),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ListCategoriesQuery {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
