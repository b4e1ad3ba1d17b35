use matchacalc::services::formulas::{
    cash_flow_schedule, discounted_sum, doubling_time, npv, payback_rent_and_sale,
    payback_rent_only, sale_price, sale_profit, total_rent_income, DEFAULT_MAX_YEARS,
};
use matchacalc::services::irr::{irr, DEFAULT_PRECISION};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol * expected.abs().max(1.0),
        "expected {} got {}",
        expected,
        actual
    );
}

#[test]
fn single_year_rent_is_half_of_annual() {
    assert_eq!(total_rent_income(150.0, 45_000.0, 0.05, 1), 0.5 * 150.0 * 45_000.0);
    assert_eq!(total_rent_income(150.0, 45_000.0, 0.25, 1), 0.5 * 150.0 * 45_000.0);
}

#[test]
fn total_rent_compounds_from_year_two() {
    // 0.5 + 1 + 1.1 + 1.21 times the annual rent.
    let total = total_rent_income(10.0, 100.0, 0.1, 4);
    assert_close(total, 1_000.0 * (0.5 + 1.0 + 1.1 + 1.21), 1e-12);
}

#[test]
fn zero_elapsed_years_leave_price_unchanged() {
    for &(price, growth) in &[(1_000_000.0, 0.08), (5.0, -0.3), (42.0, 0.0)] {
        assert_eq!(sale_price(price, growth, 0.0), price);
        assert_eq!(sale_profit(price, growth, 0.0), 0.0);
    }
}

#[test]
fn doubling_time_doubles_the_price() {
    for &growth in &[0.01, 0.05, 0.08, 0.5] {
        let t = doubling_time(growth);
        assert_close(sale_price(3_000_000.0, growth, t), 6_000_000.0, 1e-9);
    }
}

#[test]
fn no_growth_never_doubles() {
    assert_eq!(doubling_time(0.0), f64::INFINITY);
    assert_eq!(doubling_time(-0.02), f64::INFINITY);
}

#[test]
fn payback_rent_interpolates_inside_the_crossing_year() {
    // 50 in year 1 then 100 a year: 950 after year 10, 1050 after year 11.
    let t = payback_rent_only(1_000.0, 1.0, 100.0, 0.0, DEFAULT_MAX_YEARS);
    assert_close(t, 10.5, 1e-12);
}

#[test]
fn payback_rent_reports_horizon_when_never_reached() {
    let t = payback_rent_only(1_000_000.0, 1.0, 10.0, 0.0, DEFAULT_MAX_YEARS);
    assert_eq!(t, DEFAULT_MAX_YEARS as f64);
}

#[test]
fn payback_rent_never_grows_with_more_rent() {
    let mut previous = f64::INFINITY;
    for step in 1..=60 {
        let rent_start = step as f64 * 2_500.0;
        let t = payback_rent_only(50_000_000.0, 150.0, rent_start, 0.05, DEFAULT_MAX_YEARS);
        assert!(t <= previous, "rent {} gave {} after {}", rent_start, t, previous);
        previous = t;
    }
}

#[test]
fn payback_rent_and_sale_interpolates_over_combined_growth() {
    // No appreciation: combined value is 1050 + 100 * (year - 1), target 2000.
    let t = payback_rent_and_sale(1_000.0, 1.0, 100.0, 0.0, 0.0, DEFAULT_MAX_YEARS);
    assert_close(t, 10.5, 1e-12);
}

#[test]
fn payback_rent_and_sale_uses_sale_growth_in_denominator() {
    let (price, area, rent, g_r, g_p) = (1_000.0, 1.0, 60.0, 0.0, 0.05);
    let t = payback_rent_and_sale(price, area, rent, g_r, g_p, DEFAULT_MAX_YEARS);
    let combined =
        |year: u32| total_rent_income(area, rent, g_r, year) + sale_price(price, g_p, year as f64);
    let year = (2..=DEFAULT_MAX_YEARS).find(|&y| combined(y) >= 2.0 * price).unwrap();
    let expected = (year - 1) as f64
        + (2.0 * price - combined(year - 1)) / (combined(year) - combined(year - 1));
    assert_close(t, expected, 1e-12);
}

// Year-1 crossings take a half-year shortcut instead of the interpolation used
// from year 2 on. Pinned here as a special case, not as a reference value.
#[test]
fn payback_rent_and_sale_year_one_special_case() {
    let t = payback_rent_and_sale(1_000.0, 1.0, 100.0, 0.0, 1.5, DEFAULT_MAX_YEARS);
    // rent 50, sale 2500, target 2000
    assert_close(t, 1.0 + (2_000.0 - 50.0) / 2_500.0 * 0.5, 1e-12);

    // Rent alone already covers the target.
    let t = payback_rent_and_sale(1_000.0, 1.0, 10_000.0, 0.0, 0.0, DEFAULT_MAX_YEARS);
    assert_eq!(t, 1.0);
}

#[test]
fn schedule_has_one_entry_per_year() {
    for holding_years in 1..=15 {
        let flows = cash_flow_schedule(50_000_000.0, 150.0, 45_000.0, 0.05, 0.08, holding_years);
        assert_eq!(flows.len(), holding_years as usize + 1);
        for (i, cf) in flows.iter().enumerate() {
            assert_eq!(cf.year, i as u32);
        }
        assert_eq!(flows[0].amount, -50_000_000.0);
    }
}

#[test]
fn schedule_discounts_to_npv() {
    for holding_years in [1u32, 2, 7, 15] {
        let flows = cash_flow_schedule(50_000_000.0, 150.0, 45_000.0, 0.05, 0.08, holding_years);
        for &rate in &[0.0, 0.05, 0.12, 0.3, 1.5] {
            let expected = npv(50_000_000.0, 150.0, 45_000.0, 0.05, 0.08, holding_years, rate);
            let manual: f64 = flows
                .iter()
                .map(|cf| cf.amount / (1.0 + rate).powi(cf.year as i32))
                .sum();
            assert_close(manual, expected, 1e-9);
            assert_close(discounted_sum(&flows, rate), expected, 1e-12);
        }
    }
}

#[test]
fn npv_matches_hand_computation() {
    // Rent 500, 1000, 1100; sale 10000 * 1.1^3 in year 3.
    let value = npv(10_000.0, 1.0, 1_000.0, 0.1, 0.1, 3, 0.1);
    let expected = -10_000.0 + 500.0 / 1.1 + 1_000.0 / 1.21 + (1_100.0 + 13_310.0) / 1.331;
    assert_close(value, expected, 1e-12);
}

#[test]
fn one_year_hold_sells_in_the_terminal_year() {
    let value = npv(1_000.0, 1.0, 100.0, 0.0, 0.1, 1, 0.0);
    assert_close(value, -1_000.0 + 50.0 + 1_100.0, 1e-12);
}

#[test]
fn zero_return_purchase_has_no_irr() {
    let rate = irr(1_000_000.0, 100.0, 0.0, 0.0, 0.0, 5, DEFAULT_PRECISION);
    assert!(rate.abs() < 1e-12);
}

#[test]
fn irr_zeroes_the_npv() {
    let (price, area, rent, g_r, g_p, years) = (50_000_000.0, 150.0, 45_000.0, 0.05, 0.08, 7);
    let rate = irr(price, area, rent, g_r, g_p, years, DEFAULT_PRECISION);
    assert!(rate > 0.0 && rate < 1.0, "irr = {}", rate);
    assert!(npv(price, area, rent, g_r, g_p, years, rate).abs() < price * 2e-3);
    assert!(npv(price, area, rent, g_r, g_p, years, rate - 0.01) > 0.0);
    assert!(npv(price, area, rent, g_r, g_p, years, rate + 0.01) < 0.0);
}
