//! MQTT broker configuration endpoints.
//!
//! The broker protocol itself is the backend's concern; the client only
//! manages the stored configurations.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{Ack, ApiClient};

/// A stored broker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    pub id: u32,
    pub name: String,
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MqttConfigCreate {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MqttConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Result of asking the backend to test-connect a broker config.
#[derive(Debug, Deserialize)]
pub struct MqttTestResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl ApiClient {
    pub async fn list_mqtt_configs(&self) -> Result<Vec<MqttConfig>> {
        self.get_json("/api/mqtt-configs").await
    }

    pub async fn get_mqtt_config(&self, id: u32) -> Result<MqttConfig> {
        self.get_json(&format!("/api/mqtt-configs/{id}")).await
    }

    pub async fn create_mqtt_config(&self, config: &MqttConfigCreate) -> Result<MqttConfig> {
        self.post_json("/api/mqtt-configs", config).await
    }

    pub async fn update_mqtt_config(
        &self,
        id: u32,
        update: &MqttConfigUpdate,
    ) -> Result<MqttConfig> {
        self.put_json(&format!("/api/mqtt-configs/{id}"), update).await
    }

    pub async fn delete_mqtt_config(&self, id: u32) -> Result<Ack> {
        self.delete_json(&format!("/api/mqtt-configs/{id}")).await
    }

    /// Makes one config active; the backend deactivates the others.
    pub async fn activate_mqtt_config(&self, id: u32) -> Result<Ack> {
        self.post_empty(&format!("/api/mqtt-configs/{id}/activate")).await
    }

    /// Asks the backend to attempt a connection with this config.
    pub async fn test_mqtt_config(&self, id: u32) -> Result<MqttTestResult> {
        self.post_empty(&format!("/api/mqtt-configs/{id}/test")).await
    }
}
