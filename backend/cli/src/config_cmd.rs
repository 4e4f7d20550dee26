//! `chatrelay config`: show the effective configuration, secrets masked.

use anyhow::Result;
use chatrelay_config::{redact, validate, RelayConfig};

pub fn run(config: &RelayConfig) -> Result<()> {
    let value = redact(&serde_json::to_value(config)?);
    println!("{}", serde_yaml::to_string(&value)?);

    let report = validate(config);
    for warning in &report.warnings {
        println!("  🟡 {}: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("  🔴 {}: {}", error.path, error.message);
    }

    if report.is_valid() {
        println!("✅ Configuration is valid.");
    } else {
        println!("❌ Configuration has errors.");
    }
    Ok(())
}
