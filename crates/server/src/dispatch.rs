//! Packet kind → handler table and the handlers themselves.
//!
//! Every handler answers one question: was the packet claimed? `true` covers
//! both "did something" and "deliberately ignored" ([`inert`]); `false`
//! means nobody took it, and the session logs it for forensics. Kinds the
//! server does not support yet are wired to [`unimplemented`] so they keep
//! showing up in those logs.

use strum::{EnumCount, IntoEnumIterator};

use crate::entity::RiderInput;
use crate::form::decode_form_response;
use crate::player::Player;
use crate::protocol::packets::{Interact, TextType};
use crate::protocol::{ClientboundPacket, PacketKind, ServerboundPacket};
use crate::session::Collaborators;

pub type Handler = fn(&mut Player, &ServerboundPacket, &mut Collaborators<'_>) -> bool;

/// One handler slot per packet kind. An empty slot means "not handled".
#[derive(Clone)]
pub struct DispatchTable {
    handlers: [Option<Handler>; PacketKind::COUNT],
}

impl DispatchTable {
    /// Every slot filled with the server's handler for that kind.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for kind in PacketKind::iter() {
            table.handlers[kind.index()] = Some(standard_handler(kind));
        }
        table
    }

    pub fn empty() -> Self {
        Self {
            handlers: [None; PacketKind::COUNT],
        }
    }

    pub fn with(mut self, kind: PacketKind, handler: Handler) -> Self {
        self.handlers[kind.index()] = Some(handler);
        self
    }

    pub fn without(mut self, kind: PacketKind) -> Self {
        self.handlers[kind.index()] = None;
        self
    }

    pub fn get(&self, kind: PacketKind) -> Option<Handler> {
        self.handlers[kind.index()]
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_handler(kind: PacketKind) -> Handler {
    use PacketKind as K;
    match kind {
        K::Login => login,
        K::MovePlayer => move_player,
        K::Text => text,
        K::PlayerInput => player_input,
        K::RiderJump => rider_jump,
        K::MoveEntityAbsolute => move_entity_absolute,
        K::MapInfoRequest => map_info_request,
        K::RequestChunkRadius => request_chunk_radius,
        K::SetLocalPlayerAsInitialized => set_local_player_as_initialized,
        K::ModalFormResponse => modal_form_response,
        K::Interact => interact,

        K::ResourcePackClientResponse
        | K::ResourcePackChunkRequest
        | K::EntityEvent
        | K::InventoryTransaction
        | K::MobEquipment
        | K::BlockPickRequest
        | K::PlayerAction
        | K::Animate
        | K::ContainerClose
        | K::AdventureSettings
        | K::BlockEntityData
        | K::SetPlayerGameType
        | K::ItemFrameDropItem
        | K::CommandRequest
        | K::PlayerSkin
        | K::BookEdit
        | K::LevelSoundEvent => delegate,

        // Superseded by newer packets or carrying nothing the server uses.
        K::LevelSoundEventV1
        | K::MobArmorEquipment
        | K::EntityFall
        | K::PlayerHotbar
        | K::CraftingEvent
        | K::SetEntityMotion
        | K::NetworkStackLatency => inert,

        K::ClientToServerHandshake
        | K::EntityPickRequest
        | K::SpawnExperienceOrb
        | K::BossEvent
        | K::ShowCredits
        | K::CommandBlockUpdate
        | K::ServerSettingsRequest => unimplemented,
    }
}

// ── Shared handlers ──────────────────────────────────────────────────────

/// Claimed and deliberately ignored.
pub fn inert(_: &mut Player, _: &ServerboundPacket, _: &mut Collaborators<'_>) -> bool {
    true
}

/// Not supported yet; stays visible in the unhandled-packet log.
pub fn unimplemented(_: &mut Player, _: &ServerboundPacket, _: &mut Collaborators<'_>) -> bool {
    false
}

/// Hand the packet to the game rules.
pub fn delegate(
    player: &mut Player,
    packet: &ServerboundPacket,
    ctx: &mut Collaborators<'_>,
) -> bool {
    ctx.rules.delegate(player, packet, ctx.outbound)
}

// ── Session ──────────────────────────────────────────────────────────────

fn login(player: &mut Player, packet: &ServerboundPacket, _: &mut Collaborators<'_>) -> bool {
    let ServerboundPacket::Login(pk) = packet else {
        return false;
    };
    player.handle_login(pk)
}

fn set_local_player_as_initialized(
    player: &mut Player,
    packet: &ServerboundPacket,
    _: &mut Collaborators<'_>,
) -> bool {
    let ServerboundPacket::SetLocalPlayerAsInitialized(_) = packet else {
        return false;
    };
    player.mark_spawned();
    true
}

fn request_chunk_radius(
    player: &mut Player,
    packet: &ServerboundPacket,
    ctx: &mut Collaborators<'_>,
) -> bool {
    let ServerboundPacket::RequestChunkRadius(pk) = packet else {
        return false;
    };
    let radius = player.set_view_distance(pk.radius, ctx.max_view_distance);
    ctx.outbound
        .send_packet(player.conn_id(), ClientboundPacket::ChunkRadiusUpdated { radius });
    true
}

fn modal_form_response(
    player: &mut Player,
    packet: &ServerboundPacket,
    _: &mut Collaborators<'_>,
) -> bool {
    let ServerboundPacket::ModalFormResponse(pk) = packet else {
        return false;
    };
    match decode_form_response(&pk.form_data) {
        Ok(value) => player.on_form_submit(pk.form_id, value),
        Err(e) => {
            tracing::error!(
                "Failed to decode response to form {} from {}: {}",
                pk.form_id,
                player.name(),
                e
            );
            false
        }
    }
}

// ── Chat ─────────────────────────────────────────────────────────────────

fn text(player: &mut Player, packet: &ServerboundPacket, ctx: &mut Collaborators<'_>) -> bool {
    let ServerboundPacket::Text(pk) = packet else {
        return false;
    };
    if pk.text_type != TextType::Chat {
        return false;
    }
    ctx.rules.chat(player, &pk.message, ctx.outbound)
}

// ── Movement and riding ──────────────────────────────────────────────────

fn move_player(player: &mut Player, packet: &ServerboundPacket, _: &mut Collaborators<'_>) -> bool {
    let ServerboundPacket::MovePlayer(pk) = packet else {
        return false;
    };
    player.apply_movement(pk.position, [pk.pitch, pk.yaw, pk.head_yaw], pk.on_ground);
    true
}

fn player_input(
    player: &mut Player,
    packet: &ServerboundPacket,
    ctx: &mut Collaborators<'_>,
) -> bool {
    let ServerboundPacket::PlayerInput(pk) = packet else {
        return false;
    };
    let Some(vehicle) = player.riding() else {
        return false;
    };
    match ctx.entities.get_mut(vehicle) {
        Some(mount) if mount.is_alive() => {
            mount.on_riding_update(RiderInput {
                strafe: pk.motion_x,
                forward: pk.motion_y,
                jumping: pk.jumping,
                sneaking: pk.sneaking,
            });
            true
        }
        _ => false,
    }
}

fn rider_jump(
    player: &mut Player,
    packet: &ServerboundPacket,
    ctx: &mut Collaborators<'_>,
) -> bool {
    let ServerboundPacket::RiderJump(pk) = packet else {
        return false;
    };
    let Some(vehicle) = player.riding() else {
        return false;
    };
    match ctx.entities.get_mut(vehicle) {
        Some(mount) if mount.is_alive() && mount.kind.is_horse() => {
            mount.set_jump_power(pk.jump_strength);
            true
        }
        _ => false,
    }
}

/// Clients steer boats and minecarts by sending the vehicle's position.
fn move_entity_absolute(
    player: &mut Player,
    packet: &ServerboundPacket,
    ctx: &mut Collaborators<'_>,
) -> bool {
    let ServerboundPacket::MoveEntityAbsolute(pk) = packet else {
        return false;
    };
    let Some(vehicle) = player.riding() else {
        return false;
    };
    if vehicle.runtime_id() != pk.entity_runtime_id {
        return false;
    }
    match ctx.entities.get_mut(vehicle) {
        Some(mount) if mount.is_alive() => {
            mount.position = pk.position;
            mount.rotation = [pk.x_rot, pk.y_rot, pk.z_rot];
            true
        }
        _ => false,
    }
}

fn interact(player: &mut Player, packet: &ServerboundPacket, ctx: &mut Collaborators<'_>) -> bool {
    let ServerboundPacket::Interact(pk) = packet else {
        return false;
    };
    if pk.action == Interact::ACTION_LEAVE_VEHICLE {
        return match player.riding() {
            Some(vehicle) if vehicle.runtime_id() == pk.target_runtime_id => {
                player.dismount();
                true
            }
            _ => false,
        };
    }
    ctx.rules.delegate(player, packet, ctx.outbound)
}

// ── Maps ─────────────────────────────────────────────────────────────────

fn map_info_request(
    player: &mut Player,
    packet: &ServerboundPacket,
    ctx: &mut Collaborators<'_>,
) -> bool {
    let ServerboundPacket::MapInfoRequest(pk) = packet else {
        return false;
    };
    let Some(data) = ctx.maps.resolve(pk.map_id) else {
        return false;
    };
    ctx.outbound
        .send_packet(player.conn_id(), ClientboundPacket::map_item_data(&data));
    true
}
