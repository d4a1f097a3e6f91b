use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::Deserialize;
use siting_core::{select_warehouse, Criterion, Selection, SelectionError};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

/// Body of `POST /api/v1/warehouses/optimal`.
///
/// The camelCase aliases keep older browser clients working.
#[derive(Debug, Deserialize)]
pub(super) struct OptimalWarehouseRequest {
    #[serde(default, alias = "selectedStoreIds")]
    pub selected_store_ids: Vec<i64>,
    #[serde(default, alias = "optimizationCriterion")]
    pub optimization_criterion: Option<String>,
}

pub(super) async fn optimal_warehouse(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<OptimalWarehouseRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Selection>>, ApiError> {
    let Json(body) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.body_text()))?;

    let criterion: Criterion = body
        .optimization_criterion
        .as_deref()
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                "optimization_criterion is required",
            )
        })?
        .parse()
        .map_err(|e| map_selection_error(req_id.0.clone(), &e))?;

    let selection = select_warehouse(&state.catalog, &body.selected_store_ids, criterion)
        .map_err(|e| map_selection_error(req_id.0.clone(), &e))?;

    tracing::info!(
        request_id = %req_id.0,
        criterion = %criterion,
        city = %selection.city,
        warehouse_id = selection.warehouse.id,
        "optimal warehouse selected"
    );

    Ok(Json(ApiResponse::new(selection, req_id.0)))
}

fn map_selection_error(request_id: String, error: &SelectionError) -> ApiError {
    let code = match error {
        SelectionError::EmptyStoreSelection
        | SelectionError::UnresolvedStores
        | SelectionError::InvalidCriterion(_) => "validation_error",
        SelectionError::NoCandidates { .. } => "no_selection",
    };
    tracing::info!(request_id = %request_id, error = %error, "warehouse selection rejected");
    ApiError::new(request_id, code, error.to_string())
}
