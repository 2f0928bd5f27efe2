//! Relay channel management.
//!
//! Groups the channels connecting the host side, the serial relay loop,
//! and shutdown control.

use tokio::sync::{mpsc, watch};

use crate::common::messages::Delivery;
use crate::relay::service::RelayRequest;

/// Channels for the relay loop.
pub struct RelaySideChannels {
    /// Receiver for requests (relay loop listens).
    pub request_rx: mpsc::UnboundedReceiver<RelayRequest>,
    /// Receiver for shutdown signal (relay loop listens).
    pub shutdown_rx: watch::Receiver<bool>,
}

/// Channels for the host side.
pub struct HostChannels {
    /// Sender for requests into the relay loop.
    pub request_tx: mpsc::UnboundedSender<RelayRequest>,
    /// Sender handed to the display actor spawner.
    pub delivery_tx: mpsc::UnboundedSender<Delivery>,
    /// Receiver for rendered deliveries.
    pub delivery_rx: mpsc::UnboundedReceiver<Delivery>,
}

/// Control channels for shutdown coordination.
pub struct ControlChannels {
    /// Sender to trigger shutdown.
    pub shutdown_tx: watch::Sender<bool>,
}

/// Bundle of all channels used by the relay.
pub struct ChannelBundle {
    pub relay: RelaySideChannels,
    pub host: HostChannels,
    pub control: ControlChannels,
}

impl ChannelBundle {
    pub fn new() -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            relay: RelaySideChannels {
                request_rx,
                shutdown_rx,
            },
            host: HostChannels {
                request_tx,
                delivery_tx,
                delivery_rx,
            },
            control: ControlChannels { shutdown_tx },
        }
    }
}

impl Default for ChannelBundle {
    fn default() -> Self {
        Self::new()
    }
}
