// src/bin/calc_preview.rs
//! Runs one calculation offline: `calc_preview <request.json> [cash_flows.csv]`.
use anyhow::{Context, Result};
use dotenv::dotenv;
use log::info;
use std::env;
use std::fs::{self, File};

use matchacalc::config::Settings;
use matchacalc::models::CalculationRequest;
use matchacalc::services::calculations::calculate_metrics;
use matchacalc::services::export::write_cash_flows_csv;
use matchacalc::services::market_store::MarketStore;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut args = env::args().skip(1);
    let request_path = args
        .next()
        .context("usage: calc_preview <request.json> [cash_flows.csv]")?;
    let csv_path = args.next();

    let settings = Settings::from_env()?;
    let store = MarketStore::load(&settings.market_data_path, settings.scenarios_path.as_deref())?;

    let request: CalculationRequest = serde_json::from_str(
        &fs::read_to_string(&request_path)
            .with_context(|| format!("failed to read {}", request_path))?,
    )
    .with_context(|| format!("failed to parse {}", request_path))?;

    let result = calculate_metrics(&store, &request)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(path) = csv_path {
        let file = File::create(&path).with_context(|| format!("failed to create {}", path))?;
        write_cash_flows_csv(file, &result.cash_flows)?;
        info!("Cash flows written to {}", path);
    }

    Ok(())
}
