use strum::{EnumCount, EnumIter, IntoStaticStr};

/// Network protocol number this server speaks.
pub const CURRENT_PROTOCOL: i32 = 354;

/// Low bits of the packet header carrying the packet id; the upper bits hold
/// sub-client routing that this server ignores.
pub const PACKET_ID_MASK: u32 = 0x3ff;

/// Every serverbound packet kind the session adapter understands.
///
/// The set is closed: the dispatch table has exactly one slot per variant,
/// indexed by `kind as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter, IntoStaticStr)]
pub enum PacketKind {
    Login,
    ClientToServerHandshake,
    ResourcePackClientResponse,
    Text,
    MoveEntityAbsolute,
    MovePlayer,
    RiderJump,
    LevelSoundEventV1,
    EntityEvent,
    InventoryTransaction,
    MobEquipment,
    MobArmorEquipment,
    Interact,
    BlockPickRequest,
    EntityPickRequest,
    PlayerAction,
    EntityFall,
    SetEntityMotion,
    Animate,
    ContainerClose,
    PlayerHotbar,
    CraftingEvent,
    AdventureSettings,
    BlockEntityData,
    PlayerInput,
    SetPlayerGameType,
    SpawnExperienceOrb,
    MapInfoRequest,
    RequestChunkRadius,
    ItemFrameDropItem,
    BossEvent,
    ShowCredits,
    CommandRequest,
    CommandBlockUpdate,
    ResourcePackChunkRequest,
    PlayerSkin,
    BookEdit,
    ModalFormResponse,
    ServerSettingsRequest,
    SetLocalPlayerAsInitialized,
    NetworkStackLatency,
    LevelSoundEvent,
}

impl PacketKind {
    /// Wire id of this kind.
    pub const fn id(self) -> u32 {
        match self {
            Self::Login => 0x01,
            Self::ClientToServerHandshake => 0x04,
            Self::ResourcePackClientResponse => 0x08,
            Self::Text => 0x09,
            Self::MoveEntityAbsolute => 0x12,
            Self::MovePlayer => 0x13,
            Self::RiderJump => 0x14,
            Self::LevelSoundEventV1 => 0x18,
            Self::EntityEvent => 0x1b,
            Self::InventoryTransaction => 0x1e,
            Self::MobEquipment => 0x1f,
            Self::MobArmorEquipment => 0x20,
            Self::Interact => 0x21,
            Self::BlockPickRequest => 0x22,
            Self::EntityPickRequest => 0x23,
            Self::PlayerAction => 0x24,
            Self::EntityFall => 0x25,
            Self::SetEntityMotion => 0x28,
            Self::Animate => 0x2c,
            Self::ContainerClose => 0x2f,
            Self::PlayerHotbar => 0x30,
            Self::CraftingEvent => 0x35,
            Self::AdventureSettings => 0x37,
            Self::BlockEntityData => 0x38,
            Self::PlayerInput => 0x39,
            Self::SetPlayerGameType => 0x3e,
            Self::SpawnExperienceOrb => 0x42,
            Self::MapInfoRequest => 0x44,
            Self::RequestChunkRadius => 0x45,
            Self::ItemFrameDropItem => 0x47,
            Self::BossEvent => 0x4a,
            Self::ShowCredits => 0x4b,
            Self::CommandRequest => 0x4d,
            Self::CommandBlockUpdate => 0x4e,
            Self::ResourcePackChunkRequest => 0x54,
            Self::PlayerSkin => 0x5d,
            Self::BookEdit => 0x61,
            Self::ModalFormResponse => 0x65,
            Self::ServerSettingsRequest => 0x66,
            Self::SetLocalPlayerAsInitialized => 0x71,
            Self::NetworkStackLatency => 0x73,
            Self::LevelSoundEvent => 0x7b,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|k| k.id() == id)
    }

    /// Position of this kind in `PacketKind::iter()` and in the dispatch
    /// table.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Diagnostic name, e.g. `"Text"`.
    pub fn name(self) -> &'static str {
        <&'static str>::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn ids_are_unique_and_fit_the_header_mask() {
        let mut seen = HashSet::new();
        for kind in PacketKind::iter() {
            assert!(seen.insert(kind.id()), "duplicate id for {:?}", kind);
            assert_eq!(kind.id() & PACKET_ID_MASK, kind.id());
            assert_eq!(PacketKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(seen.len(), PacketKind::COUNT);
    }

    #[test]
    fn index_follows_declaration_order() {
        for (i, kind) in PacketKind::iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
