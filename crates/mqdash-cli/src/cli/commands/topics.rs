//! Topic config command handlers.

use anyhow::Result;
use mqdash_core::api::topics::TopicConfigCreate;

use crate::cli::App;

pub async fn add(
    app: &App,
    name: String,
    subscribe_topics: Vec<String>,
    publish_topic: String,
    mqtt_config: Option<u32>,
) -> Result<()> {
    let config = app
        .client
        .create_topic_config(&TopicConfigCreate {
            name,
            subscribe_topics,
            publish_topic,
            mqtt_config_id: mqtt_config,
        })
        .await?;

    println!("Added topic config {} (id {})", config.name, config.id);
    Ok(())
}

pub async fn activate(app: &App, id: u32) -> Result<()> {
    app.client.activate_topic_config(id).await?;
    println!("Topic config {id} is now active");
    Ok(())
}

pub async fn rm(app: &App, id: u32) -> Result<()> {
    app.client.delete_topic_config(id).await?;
    println!("Removed topic config {id}");
    Ok(())
}
