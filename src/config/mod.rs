// src/config/mod.rs

pub mod error;
pub mod parameters;
pub mod scenario;

pub use error::LoadError;
pub use parameters::RunParameters;
pub use scenario::parse_scenario;
