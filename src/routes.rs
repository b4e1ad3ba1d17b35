// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;
use log::info;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{LengthRequired, MethodNotAllowed, PayloadTooLarge, Rejection};
use warp::{Filter, Reply};

use crate::handlers::calc::preview;
use crate::handlers::error::ApiError;
use crate::handlers::reports::{get_location_groups, get_reports, get_scenarios};
use crate::services::market_store::MarketStore;

const MAX_BODY_BYTES: u64 = 16 * 1024;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status();
        message = api_error.message.clone();
    } else if let Some(body_error) = err.find::<BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        message = format!("Invalid request body: {}", body_error);
    } else if err.find::<PayloadTooLarge>().is_some() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = "Request body too large".to_string();
    } else if err.find::<LengthRequired>().is_some() {
        code = StatusCode::LENGTH_REQUIRED;
        message = "Content-Length header required".to_string();
    } else if err.find::<MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    store: Arc<MarketStore>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let store_filter = warp::any().map(move || store.clone());

    let preview_route = warp::path!("api" / "v1" / "calc" / "preview")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(store_filter.clone())
        .and_then(preview);

    let reports_route = warp::path!("api" / "v1" / "reports")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_reports);

    let location_groups_route = warp::path!("api" / "v1" / "reports" / "location-groups")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_location_groups);

    let scenarios_route = warp::path!("api" / "v1" / "reports" / "scenarios")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_scenarios);

    info!("All routes configured successfully.");

    preview_route
        .or(reports_route)
        .or(location_groups_route)
        .or(scenarios_route)
        .recover(handle_rejection)
}
