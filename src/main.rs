//! hogwarp-chat - standalone HogWarp chat relay
//!
//! Stands in for the game host: reads host events as JSON lines on stdin,
//! routes chat through the plugin, and writes each delivery as a JSON line
//! on stdout. Logs go to stderr.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::AsyncWriteExt;
use tokio::signal;
use tracing::{debug, error, info, warn};

use hogwarp_chat::common::HostEvent;
use hogwarp_chat::config::{env::get_config_path, load_and_validate};
use hogwarp_chat::host::{ChannelSpawner, ChatPlugin, Plugin, SharedRoster};
use hogwarp_chat::relay::{ChannelBundle, RelayHandle, RelayService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("hogwarp-chat v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  Say distance: {}", config.chat.distances.say);
    info!("  Shout distance: {}", config.chat.distances.shout);
    info!("  Whisper distance: {}", config.chat.distances.whisper);
    info!("  Override: {}", config.chat.chat_msg_override);
    info!("  Roster: {} player(s)", config.roster.len());

    // ============================================================
    // Wire the plugin to the relay loop
    // ============================================================
    let channels = ChannelBundle::new();
    let roster = SharedRoster::with_players(config.roster.clone());

    let mut plugin = ChatPlugin::new(Arc::new(roster.clone()), &config.chat);
    plugin.post_load(&ChannelSpawner::new(channels.host.delivery_tx));
    info!("{} v{} by {}", plugin.name(), plugin.version(), plugin.author());

    let handle = RelayHandle::new(channels.host.request_tx);
    let service = RelayService::new(plugin, roster, channels.relay);
    let relay_task = tokio::spawn(service.run());

    // ============================================================
    // Deliveries -> stdout
    // ============================================================
    let output_task = {
        let mut delivery_rx = channels.host.delivery_rx;
        tokio::spawn(async move {
            let mut stdout = tokio::io::stdout();
            while let Some(delivery) = delivery_rx.recv().await {
                let mut line = match serde_json::to_string(&delivery) {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Failed to encode delivery: {}", e);
                        continue;
                    }
                };
                line.push('\n');
                if let Err(e) = stdout.write_all(line.as_bytes()).await {
                    error!("Failed to write delivery: {}", e);
                    break;
                }
            }
            if let Err(e) = stdout.flush().await {
                debug!("Failed to flush stdout: {}", e);
            }
            info!("Delivery output ended");
        })
    };

    // ============================================================
    // stdin -> relay
    // ============================================================
    // A plain thread: a blocking stdin read cannot be cancelled, and an
    // unjoined thread does not hold up process exit.
    std::thread::spawn(move || read_host_events(handle));

    // Ctrl+C / SIGTERM stops the relay even while stdin is still open
    let shutdown_tx = channels.control.shutdown_tx;
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received - stopping relay...");
        if let Err(e) = shutdown_tx.send(true) {
            debug!("Shutdown channel closed (relay already stopped): {}", e);
        }
    });

    match relay_task.await {
        Ok(plugin) => {
            info!("Relay stopped");
            // Dropping the plugin releases the display actor and closes output
            drop(plugin);
        }
        Err(e) => warn!("Relay task panicked: {}", e),
    }

    let timeout = tokio::time::Duration::from_secs(5);
    if tokio::time::timeout(timeout, output_task).await.is_err() {
        warn!("Timed out flushing deliveries");
    }

    info!("Exiting...");
    Ok(())
}

/// Forward stdin JSON lines to the relay until EOF.
fn read_host_events(handle: RelayHandle) {
    let stdin = std::io::stdin();
    for (number, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<HostEvent>(trimmed) {
            Ok(event) => {
                if handle.submit(event.into()).is_err() {
                    debug!("Relay stopped, no longer reading stdin");
                    return;
                }
            }
            Err(e) => warn!("Skipping malformed input on line {}: {}", number + 1, e),
        }
    }
    info!("stdin closed");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
