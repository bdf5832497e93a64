//! Input files: market history and tax rule-sets

pub mod loader;
pub mod rules;

pub use loader::{load_price_history, parse_price_history};
pub use rules::{ConfigError, load_rules, parse_rules};
