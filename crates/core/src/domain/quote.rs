use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub current: f64,
    pub previous_close: f64,
    pub daily_change: f64,
    pub daily_change_pct: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub day_open: f64,
}
