//! Event families the server raises, and the bus that holds their observers.

use ember_engine::event::{Event, HandlerList, Priority};

use crate::effect::{self, EffectReplacement, Living};
use crate::player::Player;
use crate::protocol::ServerboundPacket;

pub use crate::effect::EffectAddEvent;

/// Raised for every decoded packet before it reaches its handler. Cancelling
/// it drops the packet silently.
pub type PacketReceiveEvent<'a> = Event<'a, Player, ServerboundPacket>;

/// One observer list per event family. Built once at startup and shared
/// read-only with every session.
pub struct EventBus {
    pub packet_receive: HandlerList<Player, ServerboundPacket>,
    pub effect_add: HandlerList<dyn Living, EffectReplacement>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            packet_receive: HandlerList::new("PacketReceiveEvent"),
            effect_add: HandlerList::new("EffectAddEvent"),
        }
    }

    /// A bus with the server's built-in gameplay policies registered. They
    /// run at `Lowest` ahead of anything registered later, so every other
    /// observer sees their verdict.
    pub fn with_default_policies() -> Self {
        let mut bus = Self::new();
        bus.effect_add.register_ignore_cancelled(
            "reject_weaker_replacement",
            Priority::Lowest,
            effect::reject_weaker_replacement,
        );
        bus
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
