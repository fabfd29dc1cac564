use serde::Deserialize;
use std::collections::BTreeMap;

/// Provider payload: `{"success": true, "timestamp": 1700000000, "quotes": {"USDEUR": 0.9}}`.
#[derive(Debug, Deserialize)]
pub struct RateSnapshot {
    pub success: bool,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub quotes: BTreeMap<String, f64>,
}
