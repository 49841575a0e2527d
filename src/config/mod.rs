//! Configuration loading and management for the stipend engine.
//!
//! Policy constants (flat tax estimate, overtime rule, contract length) and
//! request boundary settings (rent fallback, validation limits) live in YAML
//! files so they can be tuned without touching derivation logic.
//!
//! # Example
//!
//! ```no_run
//! use stipend_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Overtime multiplier: {}", config.policy().overtime.multiplier);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BoundaryConfig, ContractPolicy, OvertimePolicy, PolicyConfig, TaxPolicy, ValidationLimits,
};
