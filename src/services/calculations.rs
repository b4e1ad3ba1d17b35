// src/services/calculations.rs
use log::{debug, info};

use crate::error::CalcError;
use crate::models::{
    CalculationInput, CalculationRequest, CalculationResult, DynamicMetrics, MarketDataPoint,
    PropertyClass, ScenarioAdjustment, ScenarioId, StaticMetrics,
};

use super::formulas::{
    cash_flow_schedule, doubling_time, npv, payback_rent_and_sale, payback_rent_only,
    sale_profit, total_rent_income, DEFAULT_MAX_YEARS,
};
use super::irr::{irr, DEFAULT_PRECISION};
use super::market_store::MarketStore;

/// Longest holding period a caller may request.
pub const MAX_HOLDING_YEARS: i64 = 15;

fn share_of(amount: f64, purchase_price: f64) -> f64 {
    if purchase_price > 0.0 {
        amount / purchase_price
    } else {
        0.0
    }
}

fn validate_input(input: &CalculationInput) -> Result<(), CalcError> {
    if !input.purchase_price.is_finite() || input.purchase_price <= 0.0 {
        return Err(CalcError::validation(
            "purchase_price",
            format!("must be a positive number, got {}", input.purchase_price),
        ));
    }
    if !input.area.is_finite() || input.area <= 0.0 {
        return Err(CalcError::validation(
            "area",
            format!("must be a positive number, got {}", input.area),
        ));
    }
    if input.holding_years < 1 {
        return Err(CalcError::validation("holding_years", "must be at least 1"));
    }
    if let Some(rate) = input.discount_rate {
        if !rate.is_finite() || rate <= -1.0 {
            return Err(CalcError::validation(
                "discount_rate",
                format!("must be a finite rate above -100%, got {}", rate),
            ));
        }
    }
    Ok(())
}

/// Computes every metric for one purchase under one market row and scenario.
///
/// Pure: the same arguments always produce the same result.
pub fn compute_metrics(
    input: &CalculationInput,
    market_data: &MarketDataPoint,
    scenario: &ScenarioAdjustment,
) -> Result<CalculationResult, CalcError> {
    validate_input(input)?;

    let CalculationInput {
        purchase_price,
        area,
        holding_years,
        discount_rate,
    } = *input;
    let rent_start = market_data.rent_start;
    let rent_growth = market_data.rent_growth_annual * scenario.rent_growth_multiplier;
    let price_growth = market_data.price_growth_annual * scenario.price_growth_multiplier;
    debug!(
        "Scenario {} on {}/{}: rent growth {:.4}, price growth {:.4}",
        scenario.id,
        market_data.location_group_id,
        market_data.property_class,
        rent_growth,
        price_growth
    );

    let static_metrics = StaticMetrics {
        payback_rent_years: payback_rent_only(
            purchase_price,
            area,
            rent_start,
            rent_growth,
            DEFAULT_MAX_YEARS,
        ),
        payback_rent_and_sale_years: payback_rent_and_sale(
            purchase_price,
            area,
            rent_start,
            rent_growth,
            price_growth,
            DEFAULT_MAX_YEARS,
        ),
        double_price_years: doubling_time(price_growth),
    };

    let rent_income_total = total_rent_income(area, rent_start, rent_growth, holding_years);
    let sale_profit = sale_profit(purchase_price, price_growth, holding_years as f64);
    let total_profit = rent_income_total + sale_profit;

    // Without a cost of capital there is no meaningful NPV.
    let npv = discount_rate.map(|rate| {
        npv(purchase_price, area, rent_start, rent_growth, price_growth, holding_years, rate)
    });

    let irr = irr(
        purchase_price,
        area,
        rent_start,
        rent_growth,
        price_growth,
        holding_years,
        DEFAULT_PRECISION,
    );

    let cash_flows = cash_flow_schedule(
        purchase_price,
        area,
        rent_start,
        rent_growth,
        price_growth,
        holding_years,
    );

    Ok(CalculationResult {
        static_metrics,
        dynamic_metrics: DynamicMetrics {
            holding_years,
            rent_income_total,
            rent_income_yield_percent: share_of(rent_income_total, purchase_price),
            sale_profit,
            sale_profit_percent: share_of(sale_profit, purchase_price),
            total_profit,
            total_profit_percent: share_of(total_profit, purchase_price),
            npv,
            irr_percent: irr,
        },
        cash_flows,
    })
}

/// Checks the request's bounds and converts it into engine input, so a bad
/// field is reported before any lookup.
pub fn input_from_request(request: &CalculationRequest) -> Result<CalculationInput, CalcError> {
    if !(1..=MAX_HOLDING_YEARS).contains(&request.holding_years) {
        return Err(CalcError::validation(
            "holding_years",
            format!("must be between 1 and {}, got {}", MAX_HOLDING_YEARS, request.holding_years),
        ));
    }
    let discount_rate = match request.wacc {
        Some(wacc) if !(0.0..=100.0).contains(&wacc) => {
            return Err(CalcError::validation(
                "wacc",
                format!("must be a percentage between 0 and 100, got {}", wacc),
            ));
        }
        Some(wacc) => Some(wacc / 100.0),
        None => None,
    };
    let input = CalculationInput {
        purchase_price: request.purchase_price,
        area: request.area,
        holding_years: request.holding_years as u32,
        discount_rate,
    };
    validate_input(&input)?;
    Ok(input)
}

/// Resolves the request's market row and scenario from `store`, then computes.
pub fn calculate_metrics(
    store: &MarketStore,
    request: &CalculationRequest,
) -> Result<CalculationResult, CalcError> {
    let scenario_id: ScenarioId = request.scenario_id.parse()?;
    let property_class = match request.property_class.as_deref() {
        Some(raw) => raw.parse::<PropertyClass>()?,
        None => PropertyClass::default(),
    };
    let input = input_from_request(request)?;

    let market_data = store
        .market_data(request.report_id, &request.location_group_id, property_class)
        .ok_or_else(|| {
            CalcError::not_found(format!(
                "market data for report_id={}, location_group_id={}, property_class={}",
                request.report_id, request.location_group_id, property_class
            ))
        })?;
    let scenario = store
        .scenario(scenario_id)
        .ok_or_else(|| CalcError::not_found(format!("scenario {}", scenario_id)))?;

    info!(
        "Calculating {} years on report {} / {} / {} ({})",
        input.holding_years,
        request.report_id,
        request.location_group_id,
        property_class,
        scenario_id
    );
    compute_metrics(&input, market_data, scenario)
}
