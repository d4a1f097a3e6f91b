use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use siting_core::{Store, Warehouse};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CityFilter {
    pub city: Option<String>,
}

pub(super) async fn list_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(filter): Query<CityFilter>,
) -> Json<ApiResponse<Vec<Store>>> {
    let data = match filter.city.as_deref() {
        Some(city) => state.catalog.stores_in_city(city).cloned().collect(),
        None => state.catalog.stores().to_vec(),
    };

    Json(ApiResponse::new(data, req_id.0))
}

pub(super) async fn list_warehouses(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(filter): Query<CityFilter>,
) -> Json<ApiResponse<Vec<Warehouse>>> {
    let data = match filter.city.as_deref() {
        Some(city) => state.catalog.warehouses_in_city(city).cloned().collect(),
        None => state.catalog.warehouses().to_vec(),
    };

    Json(ApiResponse::new(data, req_id.0))
}
