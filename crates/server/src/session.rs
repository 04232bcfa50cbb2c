//! Per-connection decode → event → dispatch loop.
//!
//! A [`SessionAdapter`] owns its [`Player`] and nothing else. Everything a
//! handler may touch beyond the player is passed in per call through
//! [`Collaborators`], so the pipeline runs the same under the tick loop and
//! in tests.

use std::time::Instant;

use ember_engine::event::Event;

use crate::dashboard::Metrics;
use crate::dispatch::DispatchTable;
use crate::entity::EntityStore;
use crate::events::EventBus;
use crate::map::MapRegistry;
use crate::net::Outbound;
use crate::player::Player;
use crate::protocol;
use crate::rules::GameRules;

/// Process-wide state a handler may read or mutate, borrowed for one call.
pub struct Collaborators<'a> {
    pub entities: &'a mut EntityStore,
    pub maps: &'a MapRegistry,
    pub outbound: &'a dyn Outbound,
    pub rules: &'a mut dyn GameRules,
    pub events: &'a EventBus,
    pub dispatch: &'a DispatchTable,
    pub metrics: &'a Metrics,
    pub max_view_distance: i32,
}

/// What happened to one inbound buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// A handler claimed the packet.
    Handled,
    /// Decoded, but no handler claimed it.
    Unhandled,
    /// A receive observer vetoed the packet before dispatch.
    Cancelled,
    /// The buffer was malformed; nothing was mutated.
    DecodeFailed,
    /// The session is closed; the buffer was not looked at.
    Disconnected,
}

pub struct SessionAdapter {
    conn_id: u64,
    player: Player,
}

impl SessionAdapter {
    pub fn new(conn_id: u64, player: Player) -> Self {
        Self { conn_id, player }
    }

    pub fn conn_id(&self) -> u64 {
        self.conn_id
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn into_player(self) -> Player {
        self.player
    }

    /// Run one framed buffer through the pipeline.
    pub fn handle_incoming(&mut self, buffer: &[u8], ctx: &mut Collaborators<'_>) -> Disposition {
        if !self.player.is_connected() {
            ctx.metrics.record_dead_session_drop();
            return Disposition::Disconnected;
        }

        // ── Decode ──────────────────────────────────────────────────────
        let decoded = match protocol::decode(buffer) {
            Ok(d) => d,
            Err(e) => {
                ctx.metrics.record_decode_error();
                tracing::warn!(
                    "Dropping malformed packet from {}: {} [{}]",
                    self.player.name(),
                    e,
                    hex::encode(buffer)
                );
                return Disposition::DecodeFailed;
            }
        };
        let packet = &decoded.packet;
        ctx.metrics.record_received(packet.kind());

        let unread = decoded.unread(buffer);
        if !unread.is_empty() && !packet.may_have_unread_bytes() {
            ctx.metrics.record_trailing_bytes();
            tracing::debug!(
                "{} from {} left {} unread bytes: {}",
                packet.name(),
                self.player.name(),
                unread.len(),
                hex::encode(unread)
            );
        }

        let started = Instant::now();

        // ── Receive event ───────────────────────────────────────────────
        let mut ev = Event::new(&self.player, packet);
        let summary = ctx.events.packet_receive.call(&mut ev);
        ctx.metrics.record_observer_failures(summary.failures);
        if ev.is_cancelled() {
            ctx.metrics.record_cancelled();
            return Disposition::Cancelled;
        }

        // ── Dispatch ────────────────────────────────────────────────────
        let table = ctx.dispatch;
        let handled = match table.get(packet.kind()) {
            Some(handler) => handler(&mut self.player, packet, ctx),
            None => false,
        };
        ctx.metrics.record_dispatch(handled, started.elapsed());

        if handled {
            Disposition::Handled
        } else {
            tracing::debug!(
                "Unhandled {} from {}: {}",
                packet.name(),
                self.player.name(),
                hex::encode(buffer)
            );
            Disposition::Unhandled
        }
    }
}
