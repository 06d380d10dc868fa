//! Topic configuration endpoints.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{Ack, ApiClient};

/// A stored topic configuration: what the backend subscribes to and where
/// it publishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicConfig {
    pub id: u32,
    pub name: String,
    pub subscribe_topics: Vec<String>,
    pub publish_topic: String,
    pub is_active: bool,
    pub mqtt_config_id: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicConfigCreate {
    pub name: String,
    pub subscribe_topics: Vec<String>,
    pub publish_topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mqtt_config_id: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TopicConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe_topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mqtt_config_id: Option<u32>,
}

impl ApiClient {
    pub async fn list_topic_configs(&self) -> Result<Vec<TopicConfig>> {
        self.get_json("/api/topic-configs").await
    }

    pub async fn get_topic_config(&self, id: u32) -> Result<TopicConfig> {
        self.get_json(&format!("/api/topic-configs/{id}")).await
    }

    /// The currently active config, if any.
    pub async fn active_topic_config(&self) -> Result<Option<TopicConfig>> {
        self.get_json("/api/topic-configs/active").await
    }

    pub async fn create_topic_config(&self, config: &TopicConfigCreate) -> Result<TopicConfig> {
        self.post_json("/api/topic-configs", config).await
    }

    pub async fn update_topic_config(
        &self,
        id: u32,
        update: &TopicConfigUpdate,
    ) -> Result<TopicConfig> {
        self.put_json(&format!("/api/topic-configs/{id}"), update).await
    }

    pub async fn delete_topic_config(&self, id: u32) -> Result<Ack> {
        self.delete_json(&format!("/api/topic-configs/{id}")).await
    }

    /// Makes one config active; the backend deactivates the others.
    pub async fn activate_topic_config(&self, id: u32) -> Result<Ack> {
        self.post_empty(&format!("/api/topic-configs/{id}/activate")).await
    }
}
