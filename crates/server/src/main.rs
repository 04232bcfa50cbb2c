use std::sync::Arc;

use ember_server::config::ServerConfig;
use ember_server::dashboard::{self, DashboardState};
use ember_server::events::EventBus;
use ember_server::map::MapRegistry;
use ember_server::net::{ConnectionTable, Inbound};
use ember_server::protocol::CURRENT_PROTOCOL;
use ember_server::server::Server;

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .init();

    tracing::info!("Ember -- Bedrock protocol {} server", CURRENT_PROTOCOL);

    let maps = Arc::new(MapRegistry::new());

    // Start live dashboard (non-blocking, runs on its own tasks).
    let dashboard = Arc::new(DashboardState::new(Arc::clone(&maps)));
    let dash = Arc::clone(&dashboard);
    let dashboard_port = config.dashboard_port;
    tokio::spawn(async move {
        dashboard::server::start(dash, dashboard_port).await;
    });

    // Network tasks feed the tick loop through one bounded queue and get
    // replies back through the connection table.
    let (inbound, inbound_rx) = Inbound::channel(config.queue_capacity, Arc::clone(&dashboard));
    let connections = Arc::new(ConnectionTable::new());

    let server = Server::new(
        config.clone(),
        Box::new(ember_server::rules::standard()),
        EventBus::with_default_policies(),
        Arc::clone(&connections) as _,
        Arc::clone(&dashboard),
    );

    tracing::info!("Starting server on {}", config.bind);

    tokio::select! {
        result = ember_server::net::listener::run(inbound, connections, &config.bind) => {
            if let Err(e) = result {
                tracing::error!("Server error: {:#}", e);
            }
        }
        _ = server.run(inbound_rx) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received, shutting down...");
        }
    }
}
