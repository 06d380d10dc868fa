//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mqdash_core::api::ApiClient;
use mqdash_core::config::Config;
use mqdash_core::nav::Navigator;
use mqdash_core::routes::RouteTable;
use mqdash_core::session::SessionStore;

mod commands;

#[derive(Parser)]
#[command(name = "mqdash")]
#[command(version)]
#[command(about = "Device-management dashboard client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in to the backend (password read from stdin)
    Login {
        /// Account to authenticate as
        #[arg(short, long)]
        username: String,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show connection and session state
    Status,

    /// Navigate to a dashboard path and render the resolved view
    Open {
        /// Target path, e.g. /devices or /devices/42
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Browse and manage devices
    Devices {
        #[command(subcommand)]
        command: DeviceCommands,
    },

    /// Manage MQTT broker configurations
    Mqtt {
        #[command(subcommand)]
        command: MqttCommands,
    },

    /// Manage topic configurations
    Topics {
        #[command(subcommand)]
        command: TopicCommands,
    },

    /// Show the live sensor snapshot
    Realtime,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum DeviceCommands {
    /// List all devices
    List,
    /// Show one device with its latest readings
    Show {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Show a device's reading history
    History {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Register a new device
    Add {
        /// Device name
        #[arg(value_name = "NAME")]
        name: String,
        /// Device type, e.g. sensor or gateway
        #[arg(short = 't', long = "type")]
        device_type: String,
        /// Physical location
        #[arg(short, long)]
        location: Option<String>,
        /// Associated MQTT config id
        #[arg(long)]
        mqtt_config: Option<u32>,
        /// Associated topic config id
        #[arg(long)]
        topic_config: Option<u32>,
    },
    /// Remove a device
    Rm {
        #[arg(value_name = "ID")]
        id: u32,
    },
}

#[derive(clap::Subcommand)]
enum MqttCommands {
    /// List broker configurations
    List,
    /// Add a broker configuration
    Add {
        #[arg(value_name = "NAME")]
        name: String,
        /// Broker host
        #[arg(short, long)]
        server: String,
        /// Broker port
        #[arg(short, long, default_value = "1883")]
        port: u16,
        /// Broker username
        #[arg(short, long, default_value = "")]
        username: String,
        /// Broker password
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Make a configuration the active one
    Activate {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Test-connect a configuration
    Test {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Remove a configuration
    Rm {
        #[arg(value_name = "ID")]
        id: u32,
    },
}

#[derive(clap::Subcommand)]
enum TopicCommands {
    /// List topic configurations
    List,
    /// Add a topic configuration
    Add {
        #[arg(value_name = "NAME")]
        name: String,
        /// Topic filters to subscribe to (repeatable)
        #[arg(short, long = "subscribe", value_name = "TOPIC")]
        subscribe_topics: Vec<String>,
        /// Topic to publish commands on
        #[arg(short = 'p', long = "publish", value_name = "TOPIC")]
        publish_topic: String,
        /// Associated MQTT config id
        #[arg(long)]
        mqtt_config: Option<u32>,
    },
    /// Make a configuration the active one
    Activate {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Remove a configuration
    Rm {
        #[arg(value_name = "ID")]
        id: u32,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Point the client at a different backend
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

/// Everything a command needs: the pipeline plus its shared state.
pub struct App {
    pub client: ApiClient,
    pub session: Arc<SessionStore>,
    pub nav: Arc<Navigator>,
}

fn build_app(config: &Config) -> Result<App> {
    let session = Arc::new(SessionStore::open());
    let nav = Arc::new(Navigator::new(
        RouteTable::new(),
        Arc::clone(&session),
        config.enable_token_auth,
    ));
    let client = ApiClient::new(config, Arc::clone(&session), Arc::clone(&nav))
        .context("build API client")?;
    Ok(App {
        client,
        session,
        nav,
    })
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("MQDASH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Config subcommands work without a backend connection.
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(url),
        };
    }

    let config = Config::load().context("load config")?;
    let app = build_app(&config)?;

    // default to the dashboard view
    let Some(command) = cli.command else {
        return commands::open::run(&app, "/dashboard").await;
    };

    match command {
        Commands::Login { username } => commands::auth::login(&app, &username).await,
        Commands::Logout => commands::auth::logout(&app).await,
        Commands::Status => commands::status::run(&app, &config),
        Commands::Open { path } => commands::open::run(&app, &path).await,
        Commands::Devices { command } => match command {
            DeviceCommands::List => commands::open::run(&app, "/devices").await,
            DeviceCommands::Show { id } => commands::devices::show(&app, id).await,
            DeviceCommands::History { id } => commands::devices::history(&app, id).await,
            DeviceCommands::Add {
                name,
                device_type,
                location,
                mqtt_config,
                topic_config,
            } => {
                commands::devices::add(&app, name, device_type, location, mqtt_config, topic_config)
                    .await
            }
            DeviceCommands::Rm { id } => commands::devices::rm(&app, id).await,
        },
        Commands::Mqtt { command } => match command {
            MqttCommands::List => commands::open::run(&app, "/mqtt-config").await,
            MqttCommands::Add {
                name,
                server,
                port,
                username,
                password,
            } => commands::mqtt::add(&app, name, server, port, username, password).await,
            MqttCommands::Activate { id } => commands::mqtt::activate(&app, id).await,
            MqttCommands::Test { id } => commands::mqtt::test(&app, id).await,
            MqttCommands::Rm { id } => commands::mqtt::rm(&app, id).await,
        },
        Commands::Topics { command } => match command {
            TopicCommands::List => commands::open::run(&app, "/topic-config").await,
            TopicCommands::Add {
                name,
                subscribe_topics,
                publish_topic,
                mqtt_config,
            } => commands::topics::add(&app, name, subscribe_topics, publish_topic, mqtt_config)
                .await,
            TopicCommands::Activate { id } => commands::topics::activate(&app, id).await,
            TopicCommands::Rm { id } => commands::topics::rm(&app, id).await,
        },
        Commands::Realtime => commands::open::run(&app, "/realtime-data").await,
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
