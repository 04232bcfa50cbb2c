use crate::net::Outbound;
use crate::player::Player;
use crate::protocol::{ClientboundPacket, ServerboundPacket};

use super::GameRules;

/// Longest chat line relayed to other players.
pub const MAX_CHAT_LENGTH: usize = 512;

/// Relay chat to everyone and acknowledge the few delegated packets that need
/// no world state. Everything else stays unclaimed.
#[derive(Debug, Default)]
pub struct BasicRules {
    chat_lines: u64,
}

impl BasicRules {
    pub fn chat_lines(&self) -> u64 {
        self.chat_lines
    }
}

impl GameRules for BasicRules {
    fn chat(&mut self, player: &Player, message: &str, outbound: &dyn Outbound) -> bool {
        let message = message.trim();
        if message.is_empty() {
            return false;
        }
        if message.chars().count() > MAX_CHAT_LENGTH {
            tracing::warn!(
                "{} sent an over-long chat message ({} chars)",
                player.name(),
                message.chars().count()
            );
            return false;
        }

        tracing::info!("<{}> {}", player.name(), message);
        self.chat_lines += 1;
        outbound.broadcast(&ClientboundPacket::chat(player.name(), message));
        true
    }

    fn delegate(
        &mut self,
        _player: &mut Player,
        packet: &ServerboundPacket,
        _outbound: &dyn Outbound,
    ) -> bool {
        match packet {
            // No packs are offered, so any status the client reports is final.
            ServerboundPacket::ResourcePackClientResponse(_) => true,
            // No server-side windows are tracked.
            ServerboundPacket::ContainerClose(_) => true,
            _ => false,
        }
    }
}
