//! Integration tests for the boxsim simulation engine
//!
//! Tests are organized by topic:
//! - `tax_systems` - Balance ordering and tax bookkeeping across every regime
//! - `sampling` - Market history to return windows
//! - `comparisons` - Runner, regime switches and statistics end to end

mod tax_systems;
