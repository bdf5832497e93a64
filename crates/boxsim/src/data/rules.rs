//! Tax rule-set files (YAML).
//!
//! Every field is optional; anything left out keeps the built-in 2026 value.
//!
//! ```yaml
//! box3_2026:
//!   presumed_return: 0.0604
//! box2:
//!   distribution_brackets:
//!     - { threshold: 0.0, rate: 0.245 }
//!     - { threshold: 68843.0, rate: 0.31 }
//! ```

use std::fs;
use std::path::Path;

use boxsim_core::TaxRules;

/// Error types for rule-set loading
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a rule-set from YAML text
pub fn parse_rules(yaml: &str) -> Result<TaxRules, ConfigError> {
    serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Read and parse a rule-set file
pub fn load_rules(path: &Path) -> Result<TaxRules, ConfigError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("Failed to read {}: {e}", path.display())))?;
    let rules = parse_rules(&content)?;
    tracing::info!(path = %path.display(), "Loaded tax rules");
    Ok(rules)
}
