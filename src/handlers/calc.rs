// src/handlers/calc.rs
use chrono::Utc;
use log::{error, info};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::CalculationRequest;
use crate::services::calculations::calculate_metrics;
use crate::services::market_store::MarketStore;

pub async fn preview(
    request: CalculationRequest,
    store: Arc<MarketStore>,
) -> Result<Json, Rejection> {
    info!(
        "Handling calculation preview for report {} / {}",
        request.report_id, request.location_group_id
    );
    if let Some(rve_date) = request.rve_date {
        if rve_date > Utc::now().date_naive() {
            info!("Object is not commissioned yet (RVE {})", rve_date);
        }
    }

    match calculate_metrics(&store, &request) {
        Ok(result) => Ok(warp::reply::json(&result)),
        Err(e) => {
            error!("Calculation rejected: {}", e);
            Err(warp::reject::custom(ApiError::from(e)))
        }
    }
}
