//! Device endpoints.
//!
//! Types mirror the backend's JSON models.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{Ack, ApiClient};
use crate::api::sensors::SensorData;

/// A managed device as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: u32,
    pub name: String,
    pub device_type: String,
    pub status: String,
    pub location: Option<String>,
    pub mqtt_config_id: Option<u32>,
    pub topic_config_id: Option<u32>,
}

/// Payload for registering a new device.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceCreate {
    pub name: String,
    pub device_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mqtt_config_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_config_id: Option<u32>,
}

/// Partial update; absent fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mqtt_config_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_config_id: Option<u32>,
}

/// One point of a device's sensor history.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub unit: Option<String>,
    pub timestamp: String,
}

impl ApiClient {
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        self.get_json("/api/devices").await
    }

    pub async fn get_device(&self, id: u32) -> Result<Device> {
        self.get_json(&format!("/api/devices/{id}")).await
    }

    pub async fn create_device(&self, device: &DeviceCreate) -> Result<Device> {
        self.post_json("/api/devices", device).await
    }

    pub async fn update_device(&self, id: u32, update: &DeviceUpdate) -> Result<Device> {
        self.put_json(&format!("/api/devices/{id}"), update).await
    }

    pub async fn delete_device(&self, id: u32) -> Result<Ack> {
        self.delete_json(&format!("/api/devices/{id}")).await
    }

    /// Latest sensor readings for one device.
    pub async fn device_sensors(&self, id: u32) -> Result<Vec<SensorData>> {
        self.get_json(&format!("/api/devices/{id}/sensors")).await
    }

    /// Historical readings for one device.
    pub async fn device_history(&self, id: u32) -> Result<Vec<HistoryPoint>> {
        self.get_json(&format!("/api/devices/{id}/history")).await
    }
}
