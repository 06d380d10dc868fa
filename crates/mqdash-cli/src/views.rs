//! The host view layer.
//!
//! Renders whatever the navigation guard permitted. Views only read; every
//! backend call they make flows through the core pipeline, so an expired
//! session surfaces here as a normal error after the automatic recovery.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use mqdash_core::nav::Location;
use mqdash_core::routes::ViewId;

use crate::cli::App;

/// Builds a table with the shared look used across views.
pub fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}

/// Renders the view at a resolved location.
pub async fn render(app: &App, location: &Location) -> Result<()> {
    match location.view {
        ViewId::Login => {
            println!("Not logged in. Run `mqdash login --username <user>` to sign in.");
            Ok(())
        }
        ViewId::Dashboard => dashboard(app).await,
        ViewId::DeviceList => device_list(app).await,
        ViewId::DeviceDetail => device_detail(app, location).await,
        ViewId::DeviceNew => {
            println!("Register devices with `mqdash devices add <name> --type <type>`.");
            Ok(())
        }
        ViewId::DeviceEdit => device_edit(app, location).await,
        ViewId::RealTimeData => realtime(app).await,
        ViewId::MqttConfig => mqtt_configs(app).await,
        ViewId::TopicConfig => topic_configs(app).await,
        ViewId::SubscribeOptions => subscribe_options(app).await,
    }
}

fn param_id(location: &Location) -> Result<u32> {
    let raw = location
        .params
        .get("id")
        .context("route is missing its id param")?;
    raw.parse()
        .with_context(|| format!("device id must be numeric, got '{raw}'"))
}

async fn dashboard(app: &App) -> Result<()> {
    let devices = app.client.list_devices().await?;
    let online = devices.iter().filter(|d| d.status == "online").count();

    println!("== {} ==", ViewId::Dashboard.title());
    println!("Devices: {} total, {} online", devices.len(), online);

    match app.client.active_topic_config().await? {
        Some(active) => println!("Active topic config: {}", active.name),
        None => println!("Active topic config: none"),
    }

    let brokers = app.client.list_mqtt_configs().await?;
    match brokers.iter().find(|b| b.is_active) {
        Some(active) => println!("Active broker: {} ({}:{})", active.name, active.server, active.port),
        None => println!("Active broker: none"),
    }
    Ok(())
}

async fn device_list(app: &App) -> Result<()> {
    let devices = app.client.list_devices().await?;
    if devices.is_empty() {
        println!("No devices registered");
        return Ok(());
    }

    let mut table = table(&["ID", "Name", "Type", "Status", "Location"]);
    for device in &devices {
        table.add_row(vec![
            device.id.to_string(),
            device.name.clone(),
            device.device_type.clone(),
            device.status.clone(),
            device.location.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn device_detail(app: &App, location: &Location) -> Result<()> {
    let id = param_id(location)?;
    let device = app.client.get_device(id).await?;

    println!("== {} ==", device.name);
    println!("Type:     {}", device.device_type);
    println!("Status:   {}", device.status);
    if let Some(location) = &device.location {
        println!("Location: {location}");
    }

    let sensors = app.client.device_sensors(id).await?;
    if sensors.is_empty() {
        println!("No readings yet");
        return Ok(());
    }

    let mut table = table(&["Sensor", "Value", "Unit", "Alert", "Updated"]);
    for sensor in &sensors {
        table.add_row(vec![
            sensor.kind.clone(),
            format!("{:.2}", sensor.value),
            sensor.unit.clone().unwrap_or_default(),
            if sensor.is_alerting() { "!" } else { "" }.to_string(),
            sensor.timestamp.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn device_edit(app: &App, location: &Location) -> Result<()> {
    let id = param_id(location)?;
    let device = app.client.get_device(id).await?;
    println!(
        "Editing {} (id {}): pass new values to the backend with the API, e.g.\n  mqdash devices rm {} && mqdash devices add <name> --type <type>",
        device.name, device.id, device.id
    );
    Ok(())
}

async fn realtime(app: &App) -> Result<()> {
    let sensors = app.client.list_sensors().await?;

    println!(
        "== {} == (as of {})",
        ViewId::RealTimeData.title(),
        chrono::Local::now().format("%H:%M:%S")
    );
    if sensors.is_empty() {
        println!("No sensor data");
        return Ok(());
    }

    let mut table = table(&["Device", "Sensor", "Value", "Unit", "Alert", "Time"]);
    for sensor in &sensors {
        table.add_row(vec![
            sensor.device_id.to_string(),
            sensor.kind.clone(),
            format!("{:.2}", sensor.value),
            sensor.unit.clone().unwrap_or_default(),
            if sensor.is_alerting() { "!" } else { "" }.to_string(),
            sensor.timestamp.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn mqtt_configs(app: &App) -> Result<()> {
    let configs = app.client.list_mqtt_configs().await?;
    if configs.is_empty() {
        println!("No broker configs");
        return Ok(());
    }

    let mut table = table(&["ID", "Name", "Server", "Port", "User", "Active"]);
    for config in &configs {
        table.add_row(vec![
            config.id.to_string(),
            config.name.clone(),
            config.server.clone(),
            config.port.to_string(),
            config.username.clone(),
            if config.is_active { "*" } else { "" }.to_string(),
        ]);
    }
    // Passwords are never rendered.
    println!("{table}");
    Ok(())
}

async fn topic_configs(app: &App) -> Result<()> {
    let configs = app.client.list_topic_configs().await?;
    if configs.is_empty() {
        println!("No topic configs");
        return Ok(());
    }

    let mut table = table(&["ID", "Name", "Subscribe", "Publish", "Active"]);
    for config in &configs {
        table.add_row(vec![
            config.id.to_string(),
            config.name.clone(),
            config.subscribe_topics.join(", "),
            config.publish_topic.clone(),
            if config.is_active { "*" } else { "" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn subscribe_options(app: &App) -> Result<()> {
    match app.client.active_topic_config().await? {
        Some(active) => {
            println!("== {} == ({})", ViewId::SubscribeOptions.title(), active.name);
            for topic in &active.subscribe_topics {
                println!("  {topic}");
            }
        }
        None => println!("No active topic config"),
    }
    Ok(())
}
