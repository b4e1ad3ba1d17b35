// src/config.rs
use log::warn;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 3030;
const DEFAULT_MARKET_DATA_PATH: &str = "config/market_data.json";
const DEFAULT_SCENARIOS_PATH: &str = "config/scenarios.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub market_data_path: PathBuf,
    /// `None` means the seeded scenarios are used.
    pub scenarios_path: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from the environment. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a number, got {:?}: {}", raw, e))?,
            Err(_) => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let market_data_path = env::var("MARKET_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MARKET_DATA_PATH));

        let scenarios_path = match env::var("SCENARIOS_PATH") {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) if Path::new(DEFAULT_SCENARIOS_PATH).exists() => {
                Some(PathBuf::from(DEFAULT_SCENARIOS_PATH))
            }
            Err(_) => None,
        };

        Ok(Settings {
            port,
            market_data_path,
            scenarios_path,
        })
    }
}
