// src/services/formulas.rs
//! Time-value-of-money formulas for a rented-then-resold property.
//!
//! The first holding year is assumed to be spent on fit-out and lease-up, so it
//! earns half the nominal annual rent. From year 2 rent compounds at the growth
//! rate, with year 2 itself at exponent 0.

use crate::models::CashFlowEntry;

/// Search horizon for the payback functions, in whole years.
pub const DEFAULT_MAX_YEARS: u32 = 50;

/// Rent collected during `year` (1-based). Year 0 is the purchase and earns nothing.
pub fn rent_income_year(year: u32, area: f64, rent_start: f64, rent_growth: f64) -> f64 {
    match year {
        0 => 0.0,
        1 => 0.5 * area * rent_start,
        _ => area * rent_start * (1.0 + rent_growth).powi(year as i32 - 2),
    }
}

/// Rent collected over years `1..=holding_years`. Zero years collects nothing.
pub fn total_rent_income(area: f64, rent_start: f64, rent_growth: f64, holding_years: u32) -> f64 {
    (1..=holding_years)
        .map(|year| rent_income_year(year, area, rent_start, rent_growth))
        .sum()
}

/// Market value after `years` of appreciation. Fractional years are allowed.
pub fn sale_price(purchase_price: f64, price_growth: f64, years: f64) -> f64 {
    purchase_price * (1.0 + price_growth).powf(years)
}

pub fn sale_profit(purchase_price: f64, price_growth: f64, years: f64) -> f64 {
    sale_price(purchase_price, price_growth, years) - purchase_price
}

/// Years of rent needed to recover the purchase price, interpolated linearly
/// inside the crossing year. Returns `max_years` when rent never catches up.
pub fn payback_rent_only(
    purchase_price: f64,
    area: f64,
    rent_start: f64,
    rent_growth: f64,
    max_years: u32,
) -> f64 {
    let mut accumulated = 0.0;
    for year in 1..=max_years {
        let rent = rent_income_year(year, area, rent_start, rent_growth);
        let previous = accumulated;
        accumulated += rent;
        if accumulated >= purchase_price {
            if rent <= 0.0 {
                // Only reachable when nothing was owed in the first place.
                return (year - 1) as f64;
            }
            return (year - 1) as f64 + (purchase_price - previous) / rent;
        }
    }
    max_years as f64
}

/// Years until collected rent plus current resale value reaches twice the
/// purchase price. Returns `max_years` when the target is never reached.
///
/// From year 2 on the crossing is interpolated over the growth of the combined
/// value between the two boundary years. A crossing inside year 1 uses a
/// coarser half-year approximation against the year-1 sale price.
pub fn payback_rent_and_sale(
    purchase_price: f64,
    area: f64,
    rent_start: f64,
    rent_growth: f64,
    price_growth: f64,
    max_years: u32,
) -> f64 {
    let target = 2.0 * purchase_price;

    let rent_year_1 = rent_income_year(1, area, rent_start, rent_growth);
    let sale_year_1 = sale_price(purchase_price, price_growth, 1.0);
    if rent_year_1 + sale_year_1 >= target {
        if rent_year_1 >= target {
            return 1.0;
        }
        if sale_year_1 > 0.0 {
            return 1.0 + (target - rent_year_1) / sale_year_1 * 0.5;
        }
        return 1.0;
    }

    let mut accumulated_rent = rent_year_1;
    let mut previous_total = rent_year_1 + sale_year_1;
    for year in 2..=max_years {
        accumulated_rent += rent_income_year(year, area, rent_start, rent_growth);
        let total = accumulated_rent + sale_price(purchase_price, price_growth, year as f64);
        if total >= target {
            let growth = total - previous_total;
            if growth > 0.0 {
                return (year - 1) as f64 + (target - previous_total) / growth;
            }
            return year as f64;
        }
        previous_total = total;
    }
    max_years as f64
}

/// Years for the price to double; `+inf` when prices do not grow.
pub fn doubling_time(price_growth: f64) -> f64 {
    if price_growth <= 0.0 {
        return f64::INFINITY;
    }
    std::f64::consts::LN_2 / (1.0 + price_growth).ln()
}

/// Undiscounted cash flows for years `0..=holding_years`.
///
/// Year 0 is the purchase outlay, the last year collects rent plus the sale
/// proceeds, every year in between collects rent only.
pub fn cash_flow_schedule(
    purchase_price: f64,
    area: f64,
    rent_start: f64,
    rent_growth: f64,
    price_growth: f64,
    holding_years: u32,
) -> Vec<CashFlowEntry> {
    (0..=holding_years)
        .map(|year| {
            let amount = if year == 0 {
                -purchase_price
            } else if year == holding_years {
                rent_income_year(year, area, rent_start, rent_growth)
                    + sale_price(purchase_price, price_growth, year as f64)
            } else {
                rent_income_year(year, area, rent_start, rent_growth)
            };
            CashFlowEntry { year, amount }
        })
        .collect()
}

/// Sum of the schedule's cash flows discounted at `discount_rate`.
pub fn discounted_sum(cash_flows: &[CashFlowEntry], discount_rate: f64) -> f64 {
    cash_flows
        .iter()
        .map(|cf| cf.amount / (1.0 + discount_rate).powi(cf.year as i32))
        .sum()
}

pub fn npv(
    purchase_price: f64,
    area: f64,
    rent_start: f64,
    rent_growth: f64,
    price_growth: f64,
    holding_years: u32,
    discount_rate: f64,
) -> f64 {
    let flows = cash_flow_schedule(
        purchase_price,
        area,
        rent_start,
        rent_growth,
        price_growth,
        holding_years,
    );
    discounted_sum(&flows, discount_rate)
}
