//! Gameplay collaborator the dispatch handlers delegate to.
//!
//! The packet pipeline only decides *whether* a packet is claimed; what chat
//! or inventory actually do is up to the [`GameRules`] implementation the
//! server is started with.

pub mod basic;

use crate::net::Outbound;
use crate::player::Player;
use crate::protocol::ServerboundPacket;

pub use basic::BasicRules;

pub trait GameRules {
    /// Deliver a chat line from `player`. Returns whether it was accepted.
    fn chat(&mut self, player: &Player, message: &str, outbound: &dyn Outbound) -> bool;

    /// Handle a packet kind whose semantics live outside the session core
    /// (inventory, interaction, commands, skins...). Returns whether the
    /// packet was claimed.
    fn delegate(
        &mut self,
        player: &mut Player,
        packet: &ServerboundPacket,
        outbound: &dyn Outbound,
    ) -> bool;
}

/// The rule set the binary runs with.
pub fn standard() -> BasicRules {
    BasicRules::default()
}
