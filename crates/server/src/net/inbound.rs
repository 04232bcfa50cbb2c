//! Hand-off from network tasks to the tick loop.
//!
//! One bounded FIFO channel carries every connection's events, so frames from
//! a single connection reach the tick loop in arrival order. Buffer
//! submission never blocks: a full queue drops the frame and counts it.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::dashboard::DashboardState;

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkEvent {
    Opened { conn_id: u64, addr: SocketAddr },
    Buffer { conn_id: u64, bytes: Bytes },
    Closed { conn_id: u64 },
}

/// Producer side of the queue, cloned into every connection task.
#[derive(Clone)]
pub struct Inbound {
    tx: mpsc::Sender<NetworkEvent>,
    dashboard: Arc<DashboardState>,
}

impl Inbound {
    pub fn channel(
        capacity: usize,
        dashboard: Arc<DashboardState>,
    ) -> (Self, mpsc::Receiver<NetworkEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx, dashboard }, rx)
    }

    /// Queue one received frame. Returns false if it was dropped.
    pub fn submit_buffer(&self, conn_id: u64, bytes: Bytes) -> bool {
        match self.tx.try_send(NetworkEvent::Buffer { conn_id, bytes }) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dashboard.metrics.record_buffer_dropped();
                tracing::warn!("Inbound queue full, dropping frame from connection {}", conn_id);
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!("Inbound queue closed, dropping frame from connection {}", conn_id);
                false
            }
        }
    }

    /// Lifecycle notifications wait for room: they must not be lost.
    pub async fn opened(&self, conn_id: u64, addr: SocketAddr) -> bool {
        self.tx.send(NetworkEvent::Opened { conn_id, addr }).await.is_ok()
    }

    pub async fn closed(&self, conn_id: u64) -> bool {
        self.tx.send(NetworkEvent::Closed { conn_id }).await.is_ok()
    }
}
