//! Serverbound packet bodies.
//!
//! Each struct decodes its fields in wire order. Sections that belong to
//! collaborators outside the session adapter (item stacks, NBT, JWT chains,
//! boss bar updates) are kept as opaque bytes so the cursor still accounts
//! for every byte.

use bytes::Bytes;
use ember_engine::codec::error::DecodeResult;
use ember_engine::codec::{DecodeError, PacketReader};
use uuid::Uuid;

use super::kind::CURRENT_PROTOCOL;

pub type Vec3 = [f32; 3];

/// Decodes one packet body (everything after the header).
pub trait DecodeBody: Sized {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self>;
}

// ── Shared field helpers ─────────────────────────────────────────────────

/// Block coordinates: signed x/z, unsigned y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPosition {
    pub x: i32,
    pub y: u32,
    pub z: i32,
}

fn read_block_position(r: &mut PacketReader<'_>) -> DecodeResult<BlockPosition> {
    Ok(BlockPosition {
        x: r.read_var_i32()?,
        y: r.read_var_u32()?,
        z: r.read_var_i32()?,
    })
}

/// UUIDs travel as two little-endian u64 halves, most significant first.
fn read_uuid(r: &mut PacketReader<'_>) -> DecodeResult<Uuid> {
    let most = r.read_u64_le()?;
    let least = r.read_u64_le()?;
    Ok(Uuid::from_u64_pair(most, least))
}

fn opaque(bytes: &[u8]) -> Bytes {
    Bytes::copy_from_slice(bytes)
}

fn out_of_range(field: &'static str, value: impl Into<i64>, r: &PacketReader<'_>) -> DecodeError {
    DecodeError::OutOfRange {
        field,
        value: value.into(),
        offset: r.offset(),
    }
}

// ── Connection setup ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Login {
    pub protocol: i32,
    /// Certificate chain and client data; verified by the login collaborator.
    pub connection_request: Bytes,
}

impl Login {
    /// Clients on another protocol may send a connection request this
    /// decoder does not fully understand.
    pub fn may_have_unread_bytes(&self) -> bool {
        self.protocol != CURRENT_PROTOCOL
    }
}

impl DecodeBody for Login {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let protocol = r.read_i32_be()?;
        let connection_request = match r.read_byte_string() {
            Ok(bytes) => opaque(bytes),
            Err(_) if protocol != CURRENT_PROTOCOL => Bytes::new(),
            Err(e) => return Err(e),
        };
        Ok(Self {
            protocol,
            connection_request,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientToServerHandshake;

impl DecodeBody for ClientToServerHandshake {
    fn decode_body(_r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePackClientResponse {
    pub status: u8,
    pub pack_ids: Vec<String>,
}

impl DecodeBody for ResourcePackClientResponse {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let status = r.read_u8()?;
        let count = r.read_u16_le()?;
        let mut pack_ids = Vec::with_capacity(usize::from(count).min(64));
        for _ in 0..count {
            pack_ids.push(r.read_string()?);
        }
        Ok(Self { status, pack_ids })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePackChunkRequest {
    pub pack_id: String,
    pub chunk_index: u32,
}

impl DecodeBody for ResourcePackChunkRequest {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            pack_id: r.read_string()?,
            chunk_index: r.read_u32_le()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetLocalPlayerAsInitialized {
    pub entity_runtime_id: u64,
}

impl DecodeBody for SetLocalPlayerAsInitialized {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            entity_runtime_id: r.read_var_u64()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStackLatency {
    pub timestamp: u64,
    pub need_response: bool,
}

impl DecodeBody for NetworkStackLatency {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            timestamp: r.read_u64_le()?,
            need_response: r.read_bool()?,
        })
    }
}

// ── Chat ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextType {
    Raw,
    Chat,
    Translation,
    Popup,
    JukeboxPopup,
    Tip,
    System,
    Whisper,
    Announcement,
    Json,
}

impl TextType {
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Self::Raw,
            1 => Self::Chat,
            2 => Self::Translation,
            3 => Self::Popup,
            4 => Self::JukeboxPopup,
            5 => Self::Tip,
            6 => Self::System,
            7 => Self::Whisper,
            8 => Self::Announcement,
            9 => Self::Json,
            _ => return None,
        })
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::Raw => 0,
            Self::Chat => 1,
            Self::Translation => 2,
            Self::Popup => 3,
            Self::JukeboxPopup => 4,
            Self::Tip => 5,
            Self::System => 6,
            Self::Whisper => 7,
            Self::Announcement => 8,
            Self::Json => 9,
        }
    }

    /// Types that carry a sender name ahead of the message.
    pub fn has_source(self) -> bool {
        matches!(self, Self::Chat | Self::Whisper | Self::Announcement)
    }

    /// Types that carry translation parameters after the message.
    pub fn has_parameters(self) -> bool {
        matches!(self, Self::Translation | Self::Popup | Self::JukeboxPopup)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text_type: TextType,
    pub needs_translation: bool,
    pub source_name: String,
    pub message: String,
    pub parameters: Vec<String>,
    pub xbox_user_id: String,
    pub platform_chat_id: String,
}

impl DecodeBody for Text {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let raw_type = r.read_u8()?;
        let text_type =
            TextType::from_u8(raw_type).ok_or_else(|| out_of_range("text_type", raw_type, r))?;
        let needs_translation = r.read_bool()?;

        let source_name = if text_type.has_source() {
            r.read_string()?
        } else {
            String::new()
        };
        let message = r.read_string()?;
        let mut parameters = Vec::new();
        if text_type.has_parameters() {
            let count = r.read_var_u32()?;
            for _ in 0..count {
                parameters.push(r.read_string()?);
            }
        }

        Ok(Self {
            text_type,
            needs_translation,
            source_name,
            message,
            parameters,
            xbox_user_id: r.read_string()?,
            platform_chat_id: r.read_string()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandOrigin {
    pub origin_type: u32,
    pub uuid: Uuid,
    pub request_id: String,
    /// Present for developer-console and test origins only.
    pub player_entity_unique_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandRequest {
    pub command: String,
    pub origin: CommandOrigin,
    pub is_internal: bool,
}

impl CommandRequest {
    const ORIGIN_DEV_CONSOLE: u32 = 3;
    const ORIGIN_TEST: u32 = 4;
}

impl DecodeBody for CommandRequest {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let command = r.read_string()?;
        let origin_type = r.read_var_u32()?;
        let uuid = read_uuid(r)?;
        let request_id = r.read_string()?;
        let player_entity_unique_id =
            if origin_type == Self::ORIGIN_DEV_CONSOLE || origin_type == Self::ORIGIN_TEST {
                Some(r.read_var_i64()?)
            } else {
                None
            };
        Ok(Self {
            command,
            origin: CommandOrigin {
                origin_type,
                uuid,
                request_id,
                player_entity_unique_id,
            },
            is_internal: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandBlockUpdate {
    pub is_block: bool,
    pub body: Bytes,
}

impl DecodeBody for CommandBlockUpdate {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            is_block: r.read_bool()?,
            body: opaque(r.read_remaining()),
        })
    }
}

// ── Movement and riding ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    Normal,
    Reset,
    Teleport,
    Pitch,
}

impl MoveMode {
    fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Self::Normal,
            1 => Self::Reset,
            2 => Self::Teleport,
            3 => Self::Pitch,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovePlayer {
    pub entity_runtime_id: u64,
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub mode: MoveMode,
    pub on_ground: bool,
    pub riding_runtime_id: u64,
    /// `(cause, source item)`, teleport mode only.
    pub teleport: Option<(i32, i32)>,
}

impl DecodeBody for MovePlayer {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let entity_runtime_id = r.read_var_u64()?;
        let position = r.read_vec3()?;
        let pitch = r.read_f32_le()?;
        let yaw = r.read_f32_le()?;
        let head_yaw = r.read_f32_le()?;
        let raw_mode = r.read_u8()?;
        let mode = MoveMode::from_u8(raw_mode).ok_or_else(|| out_of_range("mode", raw_mode, r))?;
        let on_ground = r.read_bool()?;
        let riding_runtime_id = r.read_var_u64()?;
        let teleport = if mode == MoveMode::Teleport {
            Some((r.read_i32_le()?, r.read_i32_le()?))
        } else {
            None
        };
        Ok(Self {
            entity_runtime_id,
            position,
            pitch,
            yaw,
            head_yaw,
            mode,
            on_ground,
            riding_runtime_id,
            teleport,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveEntityAbsolute {
    pub entity_runtime_id: u64,
    pub flags: u8,
    pub position: Vec3,
    pub x_rot: f32,
    pub y_rot: f32,
    pub z_rot: f32,
}

impl DecodeBody for MoveEntityAbsolute {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            entity_runtime_id: r.read_var_u64()?,
            flags: r.read_u8()?,
            position: r.read_vec3()?,
            x_rot: r.read_byte_rotation()?,
            y_rot: r.read_byte_rotation()?,
            z_rot: r.read_byte_rotation()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInput {
    pub motion_x: f32,
    pub motion_y: f32,
    pub jumping: bool,
    pub sneaking: bool,
}

impl DecodeBody for PlayerInput {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            motion_x: r.read_f32_le()?,
            motion_y: r.read_f32_le()?,
            jumping: r.read_bool()?,
            sneaking: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiderJump {
    pub jump_strength: i32,
}

impl DecodeBody for RiderJump {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            jump_strength: r.read_var_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetEntityMotion {
    pub entity_runtime_id: u64,
    pub motion: Vec3,
}

impl DecodeBody for SetEntityMotion {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            entity_runtime_id: r.read_var_u64()?,
            motion: r.read_vec3()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityFall {
    pub entity_runtime_id: u64,
    pub fall_distance: f32,
    pub is_in_void: bool,
}

impl DecodeBody for EntityFall {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            entity_runtime_id: r.read_var_u64()?,
            fall_distance: r.read_f32_le()?,
            is_in_void: r.read_bool()?,
        })
    }
}

// ── World interaction ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Interact {
    pub action: u8,
    pub target_runtime_id: u64,
    /// Mouse-over only.
    pub position: Option<Vec3>,
}

impl Interact {
    pub const ACTION_LEAVE_VEHICLE: u8 = 3;
    pub const ACTION_MOUSEOVER: u8 = 4;
    pub const ACTION_OPEN_INVENTORY: u8 = 6;
}

impl DecodeBody for Interact {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let action = r.read_u8()?;
        let target_runtime_id = r.read_var_u64()?;
        let position = if action == Self::ACTION_MOUSEOVER {
            Some(r.read_vec3()?)
        } else {
            None
        };
        Ok(Self {
            action,
            target_runtime_id,
            position,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAction {
    pub entity_runtime_id: u64,
    pub action: i32,
    pub position: BlockPosition,
    pub face: i32,
}

impl DecodeBody for PlayerAction {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            entity_runtime_id: r.read_var_u64()?,
            action: r.read_var_i32()?,
            position: read_block_position(r)?,
            face: r.read_var_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockPickRequest {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub add_user_data: bool,
    pub hotbar_slot: u8,
}

impl DecodeBody for BlockPickRequest {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            x: r.read_var_i32()?,
            y: r.read_var_i32()?,
            z: r.read_var_i32()?,
            add_user_data: r.read_bool()?,
            hotbar_slot: r.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityPickRequest {
    pub entity_unique_id: u64,
    pub hotbar_slot: u8,
}

impl DecodeBody for EntityPickRequest {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            entity_unique_id: r.read_u64_le()?,
            hotbar_slot: r.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntityData {
    pub position: BlockPosition,
    pub named_tag: Bytes,
}

impl DecodeBody for BlockEntityData {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            position: read_block_position(r)?,
            named_tag: opaque(r.read_remaining()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemFrameDropItem {
    pub position: BlockPosition,
}

impl DecodeBody for ItemFrameDropItem {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            position: read_block_position(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapInfoRequest {
    pub map_id: i64,
}

impl DecodeBody for MapInfoRequest {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            map_id: r.read_var_i64()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestChunkRadius {
    pub radius: i32,
}

impl DecodeBody for RequestChunkRadius {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            radius: r.read_var_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnExperienceOrb {
    pub position: Vec3,
    pub amount: i32,
}

impl DecodeBody for SpawnExperienceOrb {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            position: r.read_vec3()?,
            amount: r.read_var_i32()?,
        })
    }
}

// ── Entity state ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct EntityEvent {
    pub entity_runtime_id: u64,
    pub event: u8,
    pub data: i32,
}

impl DecodeBody for EntityEvent {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            entity_runtime_id: r.read_var_u64()?,
            event: r.read_u8()?,
            data: r.read_var_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animate {
    pub action: i32,
    pub entity_runtime_id: u64,
    pub rowing_time: Option<f32>,
}

impl DecodeBody for Animate {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let action = r.read_var_i32()?;
        let entity_runtime_id = r.read_var_u64()?;
        let rowing_time = if action & 0x80 != 0 {
            Some(r.read_f32_le()?)
        } else {
            None
        };
        Ok(Self {
            action,
            entity_runtime_id,
            rowing_time,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdventureSettings {
    pub flags: u32,
    pub command_permission: u32,
    pub flags2: u32,
    pub player_permission: u32,
    pub custom_flags: u32,
    pub entity_unique_id: i64,
}

impl DecodeBody for AdventureSettings {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            flags: r.read_var_u32()?,
            command_permission: r.read_var_u32()?,
            flags2: r.read_var_u32()?,
            player_permission: r.read_var_u32()?,
            custom_flags: r.read_var_u32()?,
            entity_unique_id: r.read_i64_le()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetPlayerGameType {
    pub game_mode: i32,
}

impl DecodeBody for SetPlayerGameType {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            game_mode: r.read_var_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSkin {
    pub uuid: Uuid,
    pub skin_id: String,
    pub new_skin_name: String,
    pub old_skin_name: String,
    pub skin_data: Bytes,
    pub cape_data: Bytes,
    pub geometry_model: String,
    pub geometry_data: Bytes,
    pub premium: bool,
}

impl DecodeBody for PlayerSkin {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            uuid: read_uuid(r)?,
            skin_id: r.read_string()?,
            new_skin_name: r.read_string()?,
            old_skin_name: r.read_string()?,
            skin_data: opaque(r.read_byte_string()?),
            cape_data: opaque(r.read_byte_string()?),
            geometry_model: r.read_string()?,
            geometry_data: opaque(r.read_byte_string()?),
            premium: r.read_bool()?,
        })
    }
}

// ── Inventory ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryTransaction {
    pub transaction_type: u32,
    /// Actions and type-specific data, interpreted by the inventory engine.
    pub body: Bytes,
}

impl DecodeBody for InventoryTransaction {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            transaction_type: r.read_var_u32()?,
            body: opaque(r.read_remaining()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MobEquipment {
    pub entity_runtime_id: u64,
    /// Item stack followed by slot numbers.
    pub body: Bytes,
}

impl DecodeBody for MobEquipment {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            entity_runtime_id: r.read_var_u64()?,
            body: opaque(r.read_remaining()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MobArmorEquipment {
    pub entity_runtime_id: u64,
    pub body: Bytes,
}

impl DecodeBody for MobArmorEquipment {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            entity_runtime_id: r.read_var_u64()?,
            body: opaque(r.read_remaining()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerClose {
    pub window_id: u8,
}

impl DecodeBody for ContainerClose {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            window_id: r.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerHotbar {
    pub selected_slot: u32,
    pub window_id: u8,
    pub select_slot: bool,
}

impl DecodeBody for PlayerHotbar {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            selected_slot: r.read_var_u32()?,
            window_id: r.read_u8()?,
            select_slot: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CraftingEvent {
    pub window_id: u8,
    pub craft_type: i32,
    pub recipe_id: Uuid,
    pub items: Bytes,
}

impl DecodeBody for CraftingEvent {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            window_id: r.read_u8()?,
            craft_type: r.read_var_i32()?,
            recipe_id: read_uuid(r)?,
            items: opaque(r.read_remaining()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookAction {
    ReplacePage {
        page: u8,
        text: String,
        photo_name: String,
    },
    AddPage {
        page: u8,
        text: String,
        photo_name: String,
    },
    DeletePage { page: u8 },
    SwapPages { page: u8, secondary_page: u8 },
    SignBook {
        title: String,
        author: String,
        xuid: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookEdit {
    pub inventory_slot: u8,
    pub action: BookAction,
}

impl DecodeBody for BookEdit {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let kind = r.read_u8()?;
        let inventory_slot = r.read_u8()?;
        let action = match kind {
            0 | 1 => {
                let page = r.read_u8()?;
                let text = r.read_string()?;
                let photo_name = r.read_string()?;
                if kind == 0 {
                    BookAction::ReplacePage {
                        page,
                        text,
                        photo_name,
                    }
                } else {
                    BookAction::AddPage {
                        page,
                        text,
                        photo_name,
                    }
                }
            }
            2 => BookAction::DeletePage { page: r.read_u8()? },
            3 => BookAction::SwapPages {
                page: r.read_u8()?,
                secondary_page: r.read_u8()?,
            },
            4 => BookAction::SignBook {
                title: r.read_string()?,
                author: r.read_string()?,
                xuid: r.read_string()?,
            },
            other => return Err(out_of_range("book_action", other, r)),
        };
        Ok(Self {
            inventory_slot,
            action,
        })
    }
}

// ── Sound ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LevelSoundEventV1 {
    pub sound: u8,
    pub position: Vec3,
    pub extra_data: i32,
    pub entity_type: i32,
    pub is_baby_mob: bool,
    pub disable_relative_volume: bool,
}

impl DecodeBody for LevelSoundEventV1 {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            sound: r.read_u8()?,
            position: r.read_vec3()?,
            extra_data: r.read_var_i32()?,
            entity_type: r.read_var_i32()?,
            is_baby_mob: r.read_bool()?,
            disable_relative_volume: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelSoundEvent {
    pub sound: u32,
    pub position: Vec3,
    pub extra_data: i32,
    pub entity_type: String,
    pub is_baby_mob: bool,
    pub disable_relative_volume: bool,
}

impl DecodeBody for LevelSoundEvent {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            sound: r.read_var_u32()?,
            position: r.read_vec3()?,
            extra_data: r.read_var_i32()?,
            entity_type: r.read_string()?,
            is_baby_mob: r.read_bool()?,
            disable_relative_volume: r.read_bool()?,
        })
    }
}

// ── UI ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ModalFormResponse {
    pub form_id: u32,
    /// JSON text as sent by the client (possibly malformed).
    pub form_data: String,
}

impl DecodeBody for ModalFormResponse {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            form_id: r.read_var_u32()?,
            form_data: r.read_string()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettingsRequest;

impl DecodeBody for ServerSettingsRequest {
    fn decode_body(_r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossEvent {
    pub boss_entity_unique_id: i64,
    pub event_type: u32,
    pub body: Bytes,
}

impl DecodeBody for BossEvent {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            boss_entity_unique_id: r.read_var_i64()?,
            event_type: r.read_var_u32()?,
            body: opaque(r.read_remaining()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowCredits {
    pub player_runtime_id: u64,
    pub status: i32,
}

impl DecodeBody for ShowCredits {
    fn decode_body(r: &mut PacketReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            player_runtime_id: r.read_var_u64()?,
            status: r.read_var_i32()?,
        })
    }
}
