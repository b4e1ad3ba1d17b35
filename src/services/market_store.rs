// src/services/market_store.rs
use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::models::{
    LocationGroup, MarketDataPoint, MarketReport, PropertyClass, ScenarioAdjustment, ScenarioId,
};

/// One report as it appears in the market data file.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketReportFile {
    #[serde(default)]
    pub id: Option<u32>,
    pub provider: String,
    pub title: String,
    pub period: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub values: Vec<MarketDataPoint>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MarketKey {
    report_id: u32,
    location_group_id: String,
    property_class: PropertyClass,
}

/// Read-only market data and scenario catalogue, built once at startup and
/// shared by reference with every request.
#[derive(Debug, Default)]
pub struct MarketStore {
    reports: Vec<MarketReport>,
    values: HashMap<MarketKey, MarketDataPoint>,
    location_groups: Vec<LocationGroup>,
    scenarios: Vec<ScenarioAdjustment>,
}

impl MarketStore {
    pub fn new(reports: Vec<MarketReportFile>, scenarios: Vec<ScenarioAdjustment>) -> Result<Self> {
        let mut store = MarketStore {
            location_groups: default_location_groups(),
            ..Default::default()
        };

        for (index, report) in reports.into_iter().enumerate() {
            let report_id = report.id.unwrap_or(index as u32 + 1);
            if store.reports.iter().any(|r| r.id == report_id) {
                bail!("duplicate report id {}", report_id);
            }

            for value in report.values {
                if !value.rent_start.is_finite() || value.rent_start <= 0.0 {
                    bail!(
                        "report {} / {} / {}: rent_start must be positive, got {}",
                        report_id,
                        value.location_group_id,
                        value.property_class,
                        value.rent_start
                    );
                }
                if !store.location_groups.iter().any(|g| g.id == value.location_group_id) {
                    warn!(
                        "Report {} references unknown location group {}",
                        report_id, value.location_group_id
                    );
                }
                let key = MarketKey {
                    report_id,
                    location_group_id: value.location_group_id.clone(),
                    property_class: value.property_class,
                };
                if store.values.contains_key(&key) {
                    bail!(
                        "report {} has more than one value for {} / {}",
                        report_id,
                        key.location_group_id,
                        key.property_class
                    );
                }
                store.values.insert(key, value);
            }

            store.reports.push(MarketReport {
                id: report_id,
                provider: report.provider,
                title: report.title,
                period: report.period,
                file_url: report.file_url,
                active: report.active,
            });
        }

        for scenario in scenarios {
            if store.scenarios.iter().any(|s| s.id == scenario.id) {
                bail!("duplicate scenario {}", scenario.id);
            }
            store.scenarios.push(scenario);
        }

        Ok(store)
    }

    /// Loads reports from `market_path` and scenarios from `scenarios_path`,
    /// falling back to the seeded scenarios when no path is given.
    pub fn load(market_path: &Path, scenarios_path: Option<&Path>) -> Result<Self> {
        info!("Loading market data from {}", market_path.display());
        let content = fs::read_to_string(market_path)
            .with_context(|| format!("failed to read {}", market_path.display()))?;
        let reports: Vec<MarketReportFile> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", market_path.display()))?;

        let scenarios = match scenarios_path {
            Some(path) => {
                info!("Loading scenarios from {}", path.display());
                let content = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => {
                info!("No scenarios file configured, using seeded scenarios");
                default_scenarios()
            }
        };

        let store = Self::new(reports, scenarios)?;
        info!(
            "Market store ready: {} reports, {} values, {} scenarios",
            store.reports.len(),
            store.values.len(),
            store.scenarios.len()
        );
        Ok(store)
    }

    pub fn market_data(
        &self,
        report_id: u32,
        location_group_id: &str,
        property_class: PropertyClass,
    ) -> Option<&MarketDataPoint> {
        self.values.get(&MarketKey {
            report_id,
            location_group_id: location_group_id.to_string(),
            property_class,
        })
    }

    pub fn scenario(&self, id: ScenarioId) -> Option<&ScenarioAdjustment> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn active_reports(&self) -> Vec<&MarketReport> {
        self.reports.iter().filter(|r| r.active).collect()
    }

    pub fn location_groups(&self) -> &[LocationGroup] {
        &self.location_groups
    }

    pub fn scenarios(&self) -> &[ScenarioAdjustment] {
        &self.scenarios
    }
}

pub fn default_scenarios() -> Vec<ScenarioAdjustment> {
    [
        (ScenarioId::Pes, "Pessimistic", 0.8),
        (ScenarioId::Base, "Base", 1.0),
        (ScenarioId::Opt, "Optimistic", 1.2),
    ]
    .into_iter()
    .map(|(id, name, multiplier)| ScenarioAdjustment {
        id,
        name: name.to_string(),
        rent_growth_multiplier: multiplier,
        price_growth_multiplier: multiplier,
        discount_rate_adjustment: None,
    })
    .collect()
}

pub fn default_location_groups() -> Vec<LocationGroup> {
    [
        ("moscow_city", "Moscow City", "Premium location"),
        ("big_city", "Big City", "Upscale location"),
        ("center_ttk", "Centre inside TTK", "Central location"),
        ("mkad_outside_ttk", "Inside MKAD outside TTK", "Peripheral location"),
        ("outside_mkad", "Outside MKAD", "Remote location"),
    ]
    .into_iter()
    .map(|(id, name, description)| LocationGroup {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
    })
    .collect()
}
