// src/services/irr.rs
use log::debug;

use super::formulas::npv;

/// Default bisection tolerance, 0.01 percentage points.
pub const DEFAULT_PRECISION: f64 = 0.0001;

/// Stand-in for a zero rate when checking whether the deal ever breaks even.
const BREAK_EVEN_PROBE_RATE: f64 = 0.0001;

/// Upper bracket past which the search stops and reports the bracket itself.
const MAX_RATE: f64 = 10.0;

/// Internal rate of return found by bisection on the NPV curve.
///
/// Two in-band sentinels: `0.0` when NPV is already non-positive at a rate of
/// about zero (the purchase never earns back its price), and the first bracket
/// above `MAX_RATE` when NPV stays positive that far out.
pub fn irr(
    purchase_price: f64,
    area: f64,
    rent_start: f64,
    rent_growth: f64,
    price_growth: f64,
    holding_years: u32,
    precision: f64,
) -> f64 {
    let npv_at = |rate: f64| {
        npv(
            purchase_price,
            area,
            rent_start,
            rent_growth,
            price_growth,
            holding_years,
            rate,
        )
    };

    if npv_at(BREAK_EVEN_PROBE_RATE) <= 0.0 {
        debug!("NPV is non-positive at a near-zero rate, reporting IRR as 0");
        return 0.0;
    }

    let mut low = 0.0;
    let mut high = 1.0;
    while npv_at(high) > 0.0 {
        high *= 2.0;
        if high > MAX_RATE {
            debug!("NPV still positive at {:.0}%, capping IRR", high * 100.0);
            return high;
        }
    }

    while high - low > precision {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at(mid);
        if npv_mid.abs() < precision {
            return mid;
        }
        if npv_mid > 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }

    (low + high) / 2.0
}
