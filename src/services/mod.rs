// src/services/mod.rs
pub mod calculations;
pub mod export;
pub mod formulas;
pub mod irr;
pub mod market_store;
