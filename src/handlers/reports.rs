// src/handlers/reports.rs
use log::info;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::services::market_store::MarketStore;

pub async fn get_reports(store: Arc<MarketStore>) -> Result<Json, Rejection> {
    info!("Handling request to list active reports");
    Ok(warp::reply::json(&store.active_reports()))
}

pub async fn get_location_groups(store: Arc<MarketStore>) -> Result<Json, Rejection> {
    info!("Handling request to list location groups");
    Ok(warp::reply::json(&store.location_groups()))
}

pub async fn get_scenarios(store: Arc<MarketStore>) -> Result<Json, Rejection> {
    info!("Handling request to list scenarios");
    Ok(warp::reply::json(&store.scenarios()))
}
