//! Shared fixtures: a session wired to in-memory collaborators, and packet
//! buffer builders.

#![allow(dead_code)]

use std::sync::Mutex;

use bytes::Bytes;
use ember_engine::codec::PacketWriter;
use ember_server::dashboard::Metrics;
use ember_server::dispatch::DispatchTable;
use ember_server::entity::EntityStore;
use ember_server::events::EventBus;
use ember_server::map::MapRegistry;
use ember_server::net::Outbound;
use ember_server::player::Player;
use ember_server::protocol::{CURRENT_PROTOCOL, ClientboundPacket, PacketKind};
use ember_server::rules::BasicRules;
use ember_server::session::{Collaborators, Disposition, SessionAdapter};

pub const CONN_ID: u64 = 7;

/// Records everything the server tries to send.
#[derive(Default)]
pub struct RecordingOutbound {
    pub sent: Mutex<Vec<(u64, ClientboundPacket)>>,
    pub broadcasts: Mutex<Vec<ClientboundPacket>>,
}

impl RecordingOutbound {
    pub fn sent(&self) -> Vec<(u64, ClientboundPacket)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn broadcasts(&self) -> Vec<ClientboundPacket> {
        self.broadcasts.lock().unwrap().clone()
    }
}

impl Outbound for RecordingOutbound {
    fn send_packet(&self, conn_id: u64, packet: ClientboundPacket) -> bool {
        self.sent.lock().unwrap().push((conn_id, packet));
        true
    }

    fn broadcast(&self, packet: &ClientboundPacket) -> usize {
        self.broadcasts.lock().unwrap().push(packet.clone());
        1
    }
}

/// One session plus every collaborator it needs, all owned by the test.
pub struct Harness {
    pub session: SessionAdapter,
    pub entities: EntityStore,
    pub maps: MapRegistry,
    pub outbound: RecordingOutbound,
    pub rules: BasicRules,
    pub events: EventBus,
    pub dispatch: DispatchTable,
    pub metrics: Metrics,
    pub max_view_distance: i32,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_events(EventBus::new())
    }

    pub fn with_events(events: EventBus) -> Self {
        Self {
            session: SessionAdapter::new(CONN_ID, Player::new(CONN_ID, 1, "Steve")),
            entities: EntityStore::new(),
            maps: MapRegistry::new(),
            outbound: RecordingOutbound::default(),
            rules: BasicRules::default(),
            events,
            dispatch: DispatchTable::standard(),
            metrics: Metrics::new(),
            max_view_distance: 16,
        }
    }

    pub fn feed(&mut self, buffer: &[u8]) -> Disposition {
        let mut ctx = Collaborators {
            entities: &mut self.entities,
            maps: &self.maps,
            outbound: &self.outbound,
            rules: &mut self.rules,
            events: &self.events,
            dispatch: &self.dispatch,
            metrics: &self.metrics,
            max_view_distance: self.max_view_distance,
        };
        self.session.handle_incoming(buffer, &mut ctx)
    }

    pub fn player(&self) -> &Player {
        self.session.player()
    }

    pub fn player_mut(&mut self) -> &mut Player {
        self.session.player_mut()
    }
}

// ---------------------------------------------------------------------------
// Buffer builders
// ---------------------------------------------------------------------------

pub fn packet(kind: PacketKind, body: impl FnOnce(&mut PacketWriter)) -> Bytes {
    let mut w = PacketWriter::new();
    w.put_var_u32(kind.id());
    body(&mut w);
    w.finish()
}

/// Text packet; `text_type` 1 is chat.
pub fn text(text_type: u8, message: &str) -> Bytes {
    packet(PacketKind::Text, |w| {
        w.put_u8(text_type).put_bool(false);
        if matches!(text_type, 1 | 7 | 8) {
            w.put_string("Steve");
        }
        w.put_string(message);
        if matches!(text_type, 2..=4) {
            w.put_var_u32(0);
        }
        w.put_string("").put_string("");
    })
}

pub fn chat(message: &str) -> Bytes {
    text(1, message)
}

pub fn move_player(position: [f32; 3], pitch: f32, yaw: f32) -> Bytes {
    packet(PacketKind::MovePlayer, |w| {
        w.put_var_u64(1)
            .put_vec3(position)
            .put_f32_le(pitch)
            .put_f32_le(yaw)
            .put_f32_le(yaw)
            .put_u8(0)
            .put_bool(true)
            .put_var_u64(0);
    })
}

pub fn player_input(motion_x: f32, motion_y: f32, jumping: bool) -> Bytes {
    packet(PacketKind::PlayerInput, |w| {
        w.put_f32_le(motion_x)
            .put_f32_le(motion_y)
            .put_bool(jumping)
            .put_bool(false);
    })
}

pub fn rider_jump(strength: i32) -> Bytes {
    packet(PacketKind::RiderJump, |w| {
        w.put_var_i32(strength);
    })
}

pub fn move_entity_absolute(runtime_id: u64, position: [f32; 3]) -> Bytes {
    packet(PacketKind::MoveEntityAbsolute, |w| {
        w.put_var_u64(runtime_id)
            .put_u8(0)
            .put_vec3(position)
            .put_u8(0)
            .put_u8(64)
            .put_u8(0);
    })
}

pub fn interact(action: u8, target: u64) -> Bytes {
    packet(PacketKind::Interact, |w| {
        w.put_u8(action).put_var_u64(target);
    })
}

pub fn map_info_request(map_id: i64) -> Bytes {
    packet(PacketKind::MapInfoRequest, |w| {
        w.put_var_i64(map_id);
    })
}

pub fn request_chunk_radius(radius: i32) -> Bytes {
    packet(PacketKind::RequestChunkRadius, |w| {
        w.put_var_i32(radius);
    })
}

pub fn modal_form_response(form_id: u32, data: &str) -> Bytes {
    packet(PacketKind::ModalFormResponse, |w| {
        w.put_var_u32(form_id).put_string(data);
    })
}

pub fn login(protocol: i32, request: &[u8]) -> Bytes {
    packet(PacketKind::Login, |w| {
        w.put_bytes(&protocol.to_be_bytes())
            .put_var_u32(request.len() as u32)
            .put_bytes(request);
    })
}

pub fn local_player_initialized() -> Bytes {
    packet(PacketKind::SetLocalPlayerAsInitialized, |w| {
        w.put_var_u64(1);
    })
}

/// A well-formed buffer for every kind the server deliberately ignores.
pub fn inert_buffers() -> Vec<(PacketKind, Bytes)> {
    vec![
        (
            PacketKind::LevelSoundEventV1,
            packet(PacketKind::LevelSoundEventV1, |w| {
                w.put_u8(3)
                    .put_vec3([0.0, 64.0, 0.0])
                    .put_var_i32(-1)
                    .put_var_i32(1)
                    .put_bool(false)
                    .put_bool(false);
            }),
        ),
        (
            PacketKind::MobArmorEquipment,
            packet(PacketKind::MobArmorEquipment, |w| {
                w.put_var_u64(1).put_bytes(&[0, 0, 0, 0]);
            }),
        ),
        (
            PacketKind::EntityFall,
            packet(PacketKind::EntityFall, |w| {
                w.put_var_u64(1).put_f32_le(3.5).put_bool(false);
            }),
        ),
        (
            PacketKind::PlayerHotbar,
            packet(PacketKind::PlayerHotbar, |w| {
                w.put_var_u32(2).put_u8(0).put_bool(true);
            }),
        ),
        (
            PacketKind::CraftingEvent,
            packet(PacketKind::CraftingEvent, |w| {
                w.put_u8(1).put_var_i32(0).put_bytes(&[0; 16]).put_bytes(&[0, 0]);
            }),
        ),
        (
            PacketKind::SetEntityMotion,
            packet(PacketKind::SetEntityMotion, |w| {
                w.put_var_u64(1).put_vec3([0.0, 0.1, 0.0]);
            }),
        ),
        (
            PacketKind::NetworkStackLatency,
            packet(PacketKind::NetworkStackLatency, |w| {
                w.put_bytes(&1234u64.to_le_bytes()).put_bool(true);
            }),
        ),
    ]
}

/// A well-formed buffer for kinds the server does not support yet.
pub fn unimplemented_buffers() -> Vec<(PacketKind, Bytes)> {
    vec![
        (
            PacketKind::ClientToServerHandshake,
            packet(PacketKind::ClientToServerHandshake, |_| {}),
        ),
        (
            PacketKind::ServerSettingsRequest,
            packet(PacketKind::ServerSettingsRequest, |_| {}),
        ),
        (
            PacketKind::ShowCredits,
            packet(PacketKind::ShowCredits, |w| {
                w.put_var_u64(1).put_var_i32(0);
            }),
        ),
        (
            PacketKind::BossEvent,
            packet(PacketKind::BossEvent, |w| {
                w.put_var_i64(5).put_var_u32(0);
            }),
        ),
    ]
}

/// A minimal well-formed buffer for `kind`. Opaque trailing sections are left
/// empty, so every strict prefix is missing at least one mandatory field.
pub fn well_formed(kind: PacketKind) -> Bytes {
    use PacketKind as K;
    match kind {
        K::Login => login(CURRENT_PROTOCOL, b"{}"),
        K::ClientToServerHandshake | K::ServerSettingsRequest => packet(kind, |_| {}),
        K::ResourcePackClientResponse => packet(kind, |w| {
            w.put_u8(3).put_bytes(&1u16.to_le_bytes()).put_string("pack");
        }),
        K::Text => chat("hi"),
        K::MoveEntityAbsolute => move_entity_absolute(1, [0.0, 64.0, 0.0]),
        K::MovePlayer => move_player([0.0, 64.0, 0.0], 0.0, 90.0),
        K::RiderJump => rider_jump(50),
        K::LevelSoundEventV1 => packet(kind, |w| {
            w.put_u8(3)
                .put_vec3([0.0; 3])
                .put_var_i32(-1)
                .put_var_i32(1)
                .put_bool(false)
                .put_bool(false);
        }),
        K::EntityEvent => packet(kind, |w| {
            w.put_var_u64(1).put_u8(9).put_var_i32(0);
        }),
        K::InventoryTransaction => packet(kind, |w| {
            w.put_var_u32(0);
        }),
        K::MobEquipment | K::MobArmorEquipment => packet(kind, |w| {
            w.put_var_u64(1);
        }),
        K::Interact => interact(6, 1),
        K::BlockPickRequest => packet(kind, |w| {
            w.put_var_i32(1)
                .put_var_i32(64)
                .put_var_i32(-1)
                .put_bool(false)
                .put_u8(0);
        }),
        K::EntityPickRequest => packet(kind, |w| {
            w.put_bytes(&1u64.to_le_bytes()).put_u8(0);
        }),
        K::PlayerAction => packet(kind, |w| {
            w.put_var_u64(1)
                .put_var_i32(0)
                .put_var_i32(0)
                .put_var_u32(64)
                .put_var_i32(0)
                .put_var_i32(1);
        }),
        K::EntityFall => packet(kind, |w| {
            w.put_var_u64(1).put_f32_le(3.5).put_bool(false);
        }),
        K::SetEntityMotion => packet(kind, |w| {
            w.put_var_u64(1).put_vec3([0.0, 0.1, 0.0]);
        }),
        K::Animate => packet(kind, |w| {
            w.put_var_i32(0x81).put_var_u64(1).put_f32_le(0.5);
        }),
        K::ContainerClose => packet(kind, |w| {
            w.put_u8(0);
        }),
        K::PlayerHotbar => packet(kind, |w| {
            w.put_var_u32(2).put_u8(0).put_bool(true);
        }),
        K::CraftingEvent => packet(kind, |w| {
            w.put_u8(1).put_var_i32(0).put_bytes(&[0; 16]);
        }),
        K::AdventureSettings => packet(kind, |w| {
            w.put_var_u32(0)
                .put_var_u32(0)
                .put_var_u32(0)
                .put_var_u32(1)
                .put_var_u32(0)
                .put_bytes(&(-1i64).to_le_bytes());
        }),
        K::BlockEntityData | K::ItemFrameDropItem => packet(kind, |w| {
            w.put_var_i32(1).put_var_u32(64).put_var_i32(-1);
        }),
        K::PlayerInput => player_input(0.0, 1.0, false),
        K::SetPlayerGameType => packet(kind, |w| {
            w.put_var_i32(1);
        }),
        K::SpawnExperienceOrb => packet(kind, |w| {
            w.put_vec3([0.0, 64.0, 0.0]).put_var_i32(7);
        }),
        K::MapInfoRequest => map_info_request(-3),
        K::RequestChunkRadius => request_chunk_radius(8),
        K::BossEvent => packet(kind, |w| {
            w.put_var_i64(5).put_var_u32(0);
        }),
        K::ShowCredits => packet(kind, |w| {
            w.put_var_u64(1).put_var_i32(0);
        }),
        K::CommandRequest => packet(kind, |w| {
            w.put_string("/say hi")
                .put_var_u32(3)
                .put_bytes(&[0; 16])
                .put_string("req")
                .put_var_i64(-1)
                .put_bool(false);
        }),
        K::CommandBlockUpdate => packet(kind, |w| {
            w.put_bool(true);
        }),
        K::ResourcePackChunkRequest => packet(kind, |w| {
            w.put_string("pack").put_u32_le(0);
        }),
        K::PlayerSkin => packet(kind, |w| {
            w.put_bytes(&[0; 16])
                .put_string("Standard_Custom")
                .put_string("")
                .put_string("")
                .put_var_u32(2)
                .put_bytes(&[1, 2])
                .put_var_u32(0)
                .put_string("geometry.humanoid")
                .put_var_u32(0)
                .put_bool(false);
        }),
        K::BookEdit => packet(kind, |w| {
            w.put_u8(4)
                .put_u8(0)
                .put_string("Title")
                .put_string("Steve")
                .put_string("");
        }),
        K::ModalFormResponse => modal_form_response(0, "true"),
        K::SetLocalPlayerAsInitialized => local_player_initialized(),
        K::NetworkStackLatency => packet(kind, |w| {
            w.put_bytes(&1234u64.to_le_bytes()).put_bool(true);
        }),
        K::LevelSoundEvent => packet(kind, |w| {
            w.put_var_u32(3)
                .put_vec3([0.0; 3])
                .put_var_i32(-1)
                .put_string("minecraft:player")
                .put_bool(false)
                .put_bool(false);
        }),
    }
}
