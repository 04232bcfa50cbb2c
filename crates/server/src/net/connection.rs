//! Per-client connection task and the table of outbound channels.

use std::net::SocketAddr;

use anyhow::Result;
use bytes::Bytes;
use dashmap::DashMap;
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use super::framing::{read_frame, write_frame};
use super::{Inbound, Outbound};
use crate::protocol::ClientboundPacket;

/// Encoded packets waiting to be written to each open connection.
#[derive(Default)]
pub struct ConnectionTable {
    senders: DashMap<u64, mpsc::UnboundedSender<Bytes>>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and get the receiving end of its write queue.
    pub fn register(&self, conn_id: u64) -> mpsc::UnboundedReceiver<Bytes> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.insert(conn_id, tx);
        rx
    }

    pub fn remove(&self, conn_id: u64) {
        self.senders.remove(&conn_id);
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

impl Outbound for ConnectionTable {
    fn send_packet(&self, conn_id: u64, packet: ClientboundPacket) -> bool {
        match self.senders.get(&conn_id) {
            Some(tx) => tx.send(packet.encode()).is_ok(),
            None => false,
        }
    }

    fn broadcast(&self, packet: &ClientboundPacket) -> usize {
        let bytes = packet.encode();
        self.senders
            .iter()
            .filter(|entry| entry.value().send(bytes.clone()).is_ok())
            .count()
    }
}

/// Pump frames between one client and the tick loop until the client leaves.
///
/// Reads and writes run on separate tasks: a partially read frame is never
/// abandoned to service a write.
pub async fn handle(
    stream: TcpStream,
    addr: SocketAddr,
    conn_id: u64,
    inbound: Inbound,
    mut outgoing: mpsc::UnboundedReceiver<Bytes>,
) -> Result<()> {
    let (mut read, mut write) = stream.into_split();
    if !inbound.opened(conn_id, addr).await {
        return Ok(());
    }

    let writer = tokio::spawn(async move {
        while let Some(bytes) = outgoing.recv().await {
            write_frame(&mut write, &bytes).await?;
        }
        anyhow::Ok(())
    });

    let result = loop {
        match read_frame(&mut read).await {
            Ok(Some(bytes)) => {
                inbound.submit_buffer(conn_id, bytes);
            }
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
        if writer.is_finished() {
            break Ok(());
        }
    };

    writer.abort();
    inbound.closed(conn_id).await;
    result
}
