// src/handlers/mod.rs
pub mod calc;
pub mod error;
pub mod reports;
