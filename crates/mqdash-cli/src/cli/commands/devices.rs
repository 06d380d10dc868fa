//! Device command handlers.
//!
//! Read commands go through the navigation surface (the detail view is a
//! routed page); mutations call the API directly.

use anyhow::{Context, Result};
use mqdash_core::api::devices::DeviceCreate;
use mqdash_core::routes::{RouteParams, ViewId};

use super::open;
use crate::cli::App;

fn device_path(app: &App, view: ViewId, id: u32) -> Result<String> {
    let mut params = RouteParams::new();
    params.insert("id".to_string(), id.to_string());
    app.nav
        .table()
        .path_for(view, &params)
        .context("build device path")
}

pub async fn show(app: &App, id: u32) -> Result<()> {
    let path = device_path(app, ViewId::DeviceDetail, id)?;
    open::run(app, &path).await
}

pub async fn history(app: &App, id: u32) -> Result<()> {
    let history = app.client.device_history(id).await?;
    if history.is_empty() {
        println!("No history for device {id}");
        return Ok(());
    }

    let mut table = crate::views::table(&["Time", "Type", "Value", "Unit"]);
    for point in &history {
        table.add_row(vec![
            point.timestamp.clone(),
            point.kind.clone(),
            format!("{:.2}", point.value),
            point.unit.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn add(
    app: &App,
    name: String,
    device_type: String,
    location: Option<String>,
    mqtt_config: Option<u32>,
    topic_config: Option<u32>,
) -> Result<()> {
    let device = app
        .client
        .create_device(&DeviceCreate {
            name,
            device_type,
            location,
            mqtt_config_id: mqtt_config,
            topic_config_id: topic_config,
        })
        .await?;

    println!("Registered device {} (id {})", device.name, device.id);
    Ok(())
}

pub async fn rm(app: &App, id: u32) -> Result<()> {
    app.client.delete_device(id).await?;
    println!("Removed device {id}");
    Ok(())
}
