//! Wire protocol: packet kinds, serverbound decoding, clientbound encoding.
//!
//! A serverbound buffer is a varuint32 header (packet id in the low 10 bits)
//! followed by the kind-specific body. [`decode`] turns a buffer into a
//! [`ServerboundPacket`] and reports how many bytes it consumed, so the
//! session adapter can flag unread trailing bytes.

pub mod clientbound;
pub mod kind;
pub mod packets;

use ember_engine::codec::error::DecodeResult;
use ember_engine::codec::{DecodeError, PacketReader};

pub use clientbound::ClientboundPacket;
pub use kind::{CURRENT_PROTOCOL, PACKET_ID_MASK, PacketKind};
use packets::*;

/// One decoded serverbound packet.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerboundPacket {
    Login(Login),
    ClientToServerHandshake(ClientToServerHandshake),
    ResourcePackClientResponse(ResourcePackClientResponse),
    Text(Text),
    MoveEntityAbsolute(MoveEntityAbsolute),
    MovePlayer(MovePlayer),
    RiderJump(RiderJump),
    LevelSoundEventV1(LevelSoundEventV1),
    EntityEvent(EntityEvent),
    InventoryTransaction(InventoryTransaction),
    MobEquipment(MobEquipment),
    MobArmorEquipment(MobArmorEquipment),
    Interact(Interact),
    BlockPickRequest(BlockPickRequest),
    EntityPickRequest(EntityPickRequest),
    PlayerAction(PlayerAction),
    EntityFall(EntityFall),
    SetEntityMotion(SetEntityMotion),
    Animate(Animate),
    ContainerClose(ContainerClose),
    PlayerHotbar(PlayerHotbar),
    CraftingEvent(CraftingEvent),
    AdventureSettings(AdventureSettings),
    BlockEntityData(BlockEntityData),
    PlayerInput(PlayerInput),
    SetPlayerGameType(SetPlayerGameType),
    SpawnExperienceOrb(SpawnExperienceOrb),
    MapInfoRequest(MapInfoRequest),
    RequestChunkRadius(RequestChunkRadius),
    ItemFrameDropItem(ItemFrameDropItem),
    BossEvent(BossEvent),
    ShowCredits(ShowCredits),
    CommandRequest(CommandRequest),
    CommandBlockUpdate(CommandBlockUpdate),
    ResourcePackChunkRequest(ResourcePackChunkRequest),
    PlayerSkin(PlayerSkin),
    BookEdit(BookEdit),
    ModalFormResponse(ModalFormResponse),
    ServerSettingsRequest(ServerSettingsRequest),
    SetLocalPlayerAsInitialized(SetLocalPlayerAsInitialized),
    NetworkStackLatency(NetworkStackLatency),
    LevelSoundEvent(LevelSoundEvent),
}

impl ServerboundPacket {
    pub fn kind(&self) -> PacketKind {
        match self {
            Self::Login(_) => PacketKind::Login,
            Self::ClientToServerHandshake(_) => PacketKind::ClientToServerHandshake,
            Self::ResourcePackClientResponse(_) => PacketKind::ResourcePackClientResponse,
            Self::Text(_) => PacketKind::Text,
            Self::MoveEntityAbsolute(_) => PacketKind::MoveEntityAbsolute,
            Self::MovePlayer(_) => PacketKind::MovePlayer,
            Self::RiderJump(_) => PacketKind::RiderJump,
            Self::LevelSoundEventV1(_) => PacketKind::LevelSoundEventV1,
            Self::EntityEvent(_) => PacketKind::EntityEvent,
            Self::InventoryTransaction(_) => PacketKind::InventoryTransaction,
            Self::MobEquipment(_) => PacketKind::MobEquipment,
            Self::MobArmorEquipment(_) => PacketKind::MobArmorEquipment,
            Self::Interact(_) => PacketKind::Interact,
            Self::BlockPickRequest(_) => PacketKind::BlockPickRequest,
            Self::EntityPickRequest(_) => PacketKind::EntityPickRequest,
            Self::PlayerAction(_) => PacketKind::PlayerAction,
            Self::EntityFall(_) => PacketKind::EntityFall,
            Self::SetEntityMotion(_) => PacketKind::SetEntityMotion,
            Self::Animate(_) => PacketKind::Animate,
            Self::ContainerClose(_) => PacketKind::ContainerClose,
            Self::PlayerHotbar(_) => PacketKind::PlayerHotbar,
            Self::CraftingEvent(_) => PacketKind::CraftingEvent,
            Self::AdventureSettings(_) => PacketKind::AdventureSettings,
            Self::BlockEntityData(_) => PacketKind::BlockEntityData,
            Self::PlayerInput(_) => PacketKind::PlayerInput,
            Self::SetPlayerGameType(_) => PacketKind::SetPlayerGameType,
            Self::SpawnExperienceOrb(_) => PacketKind::SpawnExperienceOrb,
            Self::MapInfoRequest(_) => PacketKind::MapInfoRequest,
            Self::RequestChunkRadius(_) => PacketKind::RequestChunkRadius,
            Self::ItemFrameDropItem(_) => PacketKind::ItemFrameDropItem,
            Self::BossEvent(_) => PacketKind::BossEvent,
            Self::ShowCredits(_) => PacketKind::ShowCredits,
            Self::CommandRequest(_) => PacketKind::CommandRequest,
            Self::CommandBlockUpdate(_) => PacketKind::CommandBlockUpdate,
            Self::ResourcePackChunkRequest(_) => PacketKind::ResourcePackChunkRequest,
            Self::PlayerSkin(_) => PacketKind::PlayerSkin,
            Self::BookEdit(_) => PacketKind::BookEdit,
            Self::ModalFormResponse(_) => PacketKind::ModalFormResponse,
            Self::ServerSettingsRequest(_) => PacketKind::ServerSettingsRequest,
            Self::SetLocalPlayerAsInitialized(_) => PacketKind::SetLocalPlayerAsInitialized,
            Self::NetworkStackLatency(_) => PacketKind::NetworkStackLatency,
            Self::LevelSoundEvent(_) => PacketKind::LevelSoundEvent,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether this packet may legitimately end before the buffer does.
    /// Only a login from a client on another protocol does.
    pub fn may_have_unread_bytes(&self) -> bool {
        match self {
            Self::Login(login) => login.may_have_unread_bytes(),
            _ => false,
        }
    }
}

/// Result of a successful [`decode`].
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub packet: ServerboundPacket,
    /// Bytes consumed, header included. Never exceeds the buffer length.
    pub consumed: usize,
}

impl Decoded {
    /// Bytes left after the packet's last field.
    pub fn unread<'b>(&self, buffer: &'b [u8]) -> &'b [u8] {
        &buffer[self.consumed..]
    }
}

/// Decode one framed buffer.
pub fn decode(buffer: &[u8]) -> DecodeResult<Decoded> {
    let mut r = PacketReader::new(buffer);
    let header = r.read_var_u32()?;
    let id = header & PACKET_ID_MASK;
    let kind = PacketKind::from_id(id).ok_or(DecodeError::UnknownPacketId(id))?;
    let packet = decode_body(kind, &mut r)?;
    Ok(Decoded {
        packet,
        consumed: r.offset(),
    })
}

fn decode_body(kind: PacketKind, r: &mut PacketReader<'_>) -> DecodeResult<ServerboundPacket> {
    use ServerboundPacket as P;
    Ok(match kind {
        PacketKind::Login => P::Login(Login::decode_body(r)?),
        PacketKind::ClientToServerHandshake => {
            P::ClientToServerHandshake(ClientToServerHandshake::decode_body(r)?)
        }
        PacketKind::ResourcePackClientResponse => {
            P::ResourcePackClientResponse(ResourcePackClientResponse::decode_body(r)?)
        }
        PacketKind::Text => P::Text(Text::decode_body(r)?),
        PacketKind::MoveEntityAbsolute => {
            P::MoveEntityAbsolute(MoveEntityAbsolute::decode_body(r)?)
        }
        PacketKind::MovePlayer => P::MovePlayer(MovePlayer::decode_body(r)?),
        PacketKind::RiderJump => P::RiderJump(RiderJump::decode_body(r)?),
        PacketKind::LevelSoundEventV1 => P::LevelSoundEventV1(LevelSoundEventV1::decode_body(r)?),
        PacketKind::EntityEvent => P::EntityEvent(EntityEvent::decode_body(r)?),
        PacketKind::InventoryTransaction => {
            P::InventoryTransaction(InventoryTransaction::decode_body(r)?)
        }
        PacketKind::MobEquipment => P::MobEquipment(MobEquipment::decode_body(r)?),
        PacketKind::MobArmorEquipment => P::MobArmorEquipment(MobArmorEquipment::decode_body(r)?),
        PacketKind::Interact => P::Interact(Interact::decode_body(r)?),
        PacketKind::BlockPickRequest => P::BlockPickRequest(BlockPickRequest::decode_body(r)?),
        PacketKind::EntityPickRequest => P::EntityPickRequest(EntityPickRequest::decode_body(r)?),
        PacketKind::PlayerAction => P::PlayerAction(PlayerAction::decode_body(r)?),
        PacketKind::EntityFall => P::EntityFall(EntityFall::decode_body(r)?),
        PacketKind::SetEntityMotion => P::SetEntityMotion(SetEntityMotion::decode_body(r)?),
        PacketKind::Animate => P::Animate(Animate::decode_body(r)?),
        PacketKind::ContainerClose => P::ContainerClose(ContainerClose::decode_body(r)?),
        PacketKind::PlayerHotbar => P::PlayerHotbar(PlayerHotbar::decode_body(r)?),
        PacketKind::CraftingEvent => P::CraftingEvent(CraftingEvent::decode_body(r)?),
        PacketKind::AdventureSettings => P::AdventureSettings(AdventureSettings::decode_body(r)?),
        PacketKind::BlockEntityData => P::BlockEntityData(BlockEntityData::decode_body(r)?),
        PacketKind::PlayerInput => P::PlayerInput(PlayerInput::decode_body(r)?),
        PacketKind::SetPlayerGameType => P::SetPlayerGameType(SetPlayerGameType::decode_body(r)?),
        PacketKind::SpawnExperienceOrb => {
            P::SpawnExperienceOrb(SpawnExperienceOrb::decode_body(r)?)
        }
        PacketKind::MapInfoRequest => P::MapInfoRequest(MapInfoRequest::decode_body(r)?),
        PacketKind::RequestChunkRadius => {
            P::RequestChunkRadius(RequestChunkRadius::decode_body(r)?)
        }
        PacketKind::ItemFrameDropItem => P::ItemFrameDropItem(ItemFrameDropItem::decode_body(r)?),
        PacketKind::BossEvent => P::BossEvent(BossEvent::decode_body(r)?),
        PacketKind::ShowCredits => P::ShowCredits(ShowCredits::decode_body(r)?),
        PacketKind::CommandRequest => P::CommandRequest(CommandRequest::decode_body(r)?),
        PacketKind::CommandBlockUpdate => {
            P::CommandBlockUpdate(CommandBlockUpdate::decode_body(r)?)
        }
        PacketKind::ResourcePackChunkRequest => {
            P::ResourcePackChunkRequest(ResourcePackChunkRequest::decode_body(r)?)
        }
        PacketKind::PlayerSkin => P::PlayerSkin(PlayerSkin::decode_body(r)?),
        PacketKind::BookEdit => P::BookEdit(BookEdit::decode_body(r)?),
        PacketKind::ModalFormResponse => P::ModalFormResponse(ModalFormResponse::decode_body(r)?),
        PacketKind::ServerSettingsRequest => {
            P::ServerSettingsRequest(ServerSettingsRequest::decode_body(r)?)
        }
        PacketKind::SetLocalPlayerAsInitialized => {
            P::SetLocalPlayerAsInitialized(SetLocalPlayerAsInitialized::decode_body(r)?)
        }
        PacketKind::NetworkStackLatency => {
            P::NetworkStackLatency(NetworkStackLatency::decode_body(r)?)
        }
        PacketKind::LevelSoundEvent => P::LevelSoundEvent(LevelSoundEvent::decode_body(r)?),
    })
}
