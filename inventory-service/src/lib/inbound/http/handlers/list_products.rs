use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PageMeta;
use crate::domain::category::models::CategoryId;
use crate::domain::pagination::Pagination;
use crate::domain::product::models::ProductFilter;
use crate::inbound::http::messages::ProductData;
use crate::inbound::http::router::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<ApiSuccess<Vec<ProductData>>, ApiError> {
    let category_id = query
        .category_id
        .as_deref()
        .map(CategoryId::from_string)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let pagination = Pagination::new(query.page, query.limit);
    let filter = ProductFilter {
        category_id,
        min_price: query.min_price,
        max_price: query.max_price,
        pagination,
    };

    let page = state
        .product_service
        .list_products(filter)
        .await
        .map_err(ApiError::from)?;

    let data = page.items.iter().map(ProductData::from).collect();

    Ok(ApiSuccess::paginated(
        StatusCode::OK,
        "Products fetched successfully",
        data,
        PageMeta::of(&pagination, &page),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub category_id: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
