// src/models.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

/// Office class as published in broker market reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PropertyClass {
    #[serde(rename = "A_Prime")]
    APrime,
    #[default]
    A,
    #[serde(rename = "B_plus")]
    BPlus,
    B,
}

impl PropertyClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyClass::APrime => "A_Prime",
            PropertyClass::A => "A",
            PropertyClass::BPlus => "B_plus",
            PropertyClass::B => "B",
        }
    }
}

impl fmt::Display for PropertyClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyClass {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A_Prime" => Ok(PropertyClass::APrime),
            "A" => Ok(PropertyClass::A),
            "B_plus" => Ok(PropertyClass::BPlus),
            "B" => Ok(PropertyClass::B),
            other => {
                warn!("Rejecting unknown property class {:?}", other);
                Err(CalcError::validation(
                    "property_class",
                    format!(
                        "unknown property class {:?}, expected one of A_Prime, A, B_plus, B",
                        other
                    ),
                ))
            }
        }
    }
}

/// Pessimistic / base / optimistic market outlook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioId {
    Pes,
    Base,
    Opt,
}

impl ScenarioId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::Pes => "pes",
            ScenarioId::Base => "base",
            ScenarioId::Opt => "opt",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pes" => Ok(ScenarioId::Pes),
            "base" => Ok(ScenarioId::Base),
            "opt" => Ok(ScenarioId::Opt),
            other => {
                warn!("Rejecting unknown scenario id {:?}", other);
                Err(CalcError::validation(
                    "scenario_id",
                    format!("unknown scenario {:?}, expected one of pes, base, opt", other),
                ))
            }
        }
    }
}

/// One row of a market report: growth assumptions for a location group and class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataPoint {
    pub location_group_id: String,
    pub property_class: PropertyClass,
    /// Annual rent per m², currency/m²/year.
    pub rent_start: f64,
    pub rent_growth_annual: f64,
    pub price_growth_annual: f64,
    #[serde(default, alias = "price_per_m2_start")]
    pub price_per_area_start: Option<f64>,
    #[serde(default)]
    pub vacancy_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAdjustment {
    pub id: ScenarioId,
    #[serde(default)]
    pub name: String,
    pub rent_growth_multiplier: f64,
    pub price_growth_multiplier: f64,
    #[serde(default)]
    pub discount_rate_adjustment: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketReport {
    pub id: u32,
    pub provider: String,
    pub title: String,
    pub period: String,
    pub file_url: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationGroup {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Per-request parameters of a calculation. Rates are fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationInput {
    pub purchase_price: f64,
    pub area: f64,
    pub holding_years: u32,
    pub discount_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub year: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticMetrics {
    pub payback_rent_years: f64,
    pub payback_rent_and_sale_years: f64,
    /// `+inf` (serialised as `null`) when prices do not grow.
    pub double_price_years: f64,
}

/// Percent fields hold fractions over the whole holding period, not annualised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicMetrics {
    pub holding_years: u32,
    pub rent_income_total: f64,
    pub rent_income_yield_percent: f64,
    pub sale_profit: f64,
    pub sale_profit_percent: f64,
    pub total_profit: f64,
    pub total_profit_percent: f64,
    pub npv: Option<f64>,
    pub irr_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub static_metrics: StaticMetrics,
    pub dynamic_metrics: DynamicMetrics,
    pub cash_flows: Vec<CashFlowEntry>,
}

/// Body of `POST /api/v1/calc/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub purchase_price: f64,
    pub area: f64,
    pub location_group_id: String,
    /// Commissioning date; informational only. Accepts `2027-03-01` as well as
    /// a full timestamp, of which only the date is kept.
    #[serde(default, deserialize_with = "deserialize_rve_date")]
    pub rve_date: Option<NaiveDate>,
    pub holding_years: i64,
    pub scenario_id: String,
    pub report_id: u32,
    #[serde(default)]
    pub property_class: Option<String>,
    /// Buyer's cost of capital in percent (12 means 12%). NPV is skipped without it.
    #[serde(default)]
    pub wacc: Option<f64>,
}

fn deserialize_rve_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<String>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(timestamp.date_naive()));
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(timestamp.date()));
    }
    Err(serde::de::Error::custom(format!(
        "rve_date must be a date (YYYY-MM-DD) or an RFC 3339 timestamp, got {:?}",
        raw
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(rve_date: &str) -> Result<CalculationRequest, serde_json::Error> {
        serde_json::from_value(serde_json::json!({
            "purchase_price": 1000.0,
            "area": 10.0,
            "location_group_id": "big_city",
            "rve_date": rve_date,
            "holding_years": 3,
            "scenario_id": "base",
            "report_id": 1
        }))
    }

    #[test]
    fn rve_date_accepts_date_and_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2027, 3, 1);
        assert_eq!(parse("2027-03-01").unwrap().rve_date, expected);
        assert_eq!(parse("2027-03-01T10:30:00+03:00").unwrap().rve_date, expected);
        assert_eq!(parse("2027-03-01T10:30:00").unwrap().rve_date, expected);
        assert!(parse("01.03.2027").is_err());
    }

    #[test]
    fn rve_date_may_be_null_or_missing() {
        let request: CalculationRequest = serde_json::from_value(serde_json::json!({
            "purchase_price": 1000.0,
            "area": 10.0,
            "location_group_id": "big_city",
            "rve_date": null,
            "holding_years": 3,
            "scenario_id": "base",
            "report_id": 1
        }))
        .unwrap();
        assert_eq!(request.rve_date, None);
    }
}
