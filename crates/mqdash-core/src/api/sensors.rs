//! Sensor data endpoints (real-time view).

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::ApiClient;

/// One sensor reading. `timestamp` is the backend's ISO-8601 string,
/// passed through for display rather than reinterpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorData {
    pub id: u32,
    pub device_id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub unit: Option<String>,
    pub timestamp: String,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub alert_status: Option<String>,
}

impl SensorData {
    /// True when the reading sits outside its configured bounds.
    pub fn is_alerting(&self) -> bool {
        matches!(self.alert_status.as_deref(), Some("alert" | "warning"))
    }
}

impl ApiClient {
    /// The live snapshot across all devices.
    pub async fn list_sensors(&self) -> Result<Vec<SensorData>> {
        self.get_json("/api/sensors").await
    }
}
