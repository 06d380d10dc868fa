//! MQTT broker config command handlers.

use anyhow::Result;
use mqdash_core::api::mqtt::MqttConfigCreate;

use crate::cli::App;

pub async fn add(
    app: &App,
    name: String,
    server: String,
    port: u16,
    username: String,
    password: String,
) -> Result<()> {
    let config = app
        .client
        .create_mqtt_config(&MqttConfigCreate {
            name,
            server,
            port,
            username,
            password,
        })
        .await?;

    println!("Added broker config {} (id {})", config.name, config.id);
    Ok(())
}

pub async fn activate(app: &App, id: u32) -> Result<()> {
    app.client.activate_mqtt_config(id).await?;
    println!("Broker config {id} is now active");
    Ok(())
}

pub async fn test(app: &App, id: u32) -> Result<()> {
    let result = app.client.test_mqtt_config(id).await?;
    if result.success {
        println!("Connection OK");
    } else {
        println!("Connection failed: {}", result.message);
    }
    Ok(())
}

pub async fn rm(app: &App, id: u32) -> Result<()> {
    app.client.delete_mqtt_config(id).await?;
    println!("Removed broker config {id}");
    Ok(())
}
