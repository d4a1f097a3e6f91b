use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use siting_weather::WeatherReport;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
}

pub(super) async fn get_weather(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<WeatherReport>>, ApiError> {
    let Query(query) = query.map_err(|e| {
        ApiError::new(req_id.0.clone(), "validation_error", e.body_text())
    })?;

    if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lon) {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "lat must be within [-90, 90] and lon within [-180, 180]",
        ));
    }

    let Some(client) = state.weather.as_ref() else {
        return Err(ApiError::new(
            req_id.0,
            "service_unavailable",
            "weather lookups are not configured",
        ));
    };

    let report = client.current(query.lat, query.lon).await.map_err(|e| {
        tracing::error!(error = %e, lat = query.lat, lon = query.lon, "weather lookup failed");
        ApiError::new(req_id.0.clone(), "upstream_error", "weather lookup failed")
    })?;

    Ok(Json(ApiResponse::new(report, req_id.0)))
}
