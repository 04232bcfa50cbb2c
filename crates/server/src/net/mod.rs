//! Transport: TCP listener, frame codec, the inbound hand-off queue and the
//! outbound connection table.
//!
//! Network tasks never touch player or entity state. They hand raw frames to
//! the tick loop through [`inbound::Inbound`] and receive encoded replies
//! through [`connection::ConnectionTable`].

pub mod connection;
pub mod framing;
pub mod inbound;
pub mod listener;

use crate::protocol::ClientboundPacket;

pub use connection::ConnectionTable;
pub use inbound::{Inbound, NetworkEvent};

/// Sink for packets the server sends. Never waits for the transport.
pub trait Outbound {
    /// Queue `packet` for one connection. Returns false if it is gone.
    fn send_packet(&self, conn_id: u64, packet: ClientboundPacket) -> bool;

    /// Queue `packet` for every open connection. Returns how many got it.
    fn broadcast(&self, packet: &ClientboundPacket) -> usize;
}
