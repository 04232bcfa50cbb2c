//! Clientbound replies the session adapter constructs itself.

use bytes::Bytes;
use ember_engine::codec::PacketWriter;

use super::packets::TextType;
use crate::map::{MAP_SIZE, MapData, MapDecoration, TrackedObject};

const TEXT: u32 = 0x09;
const MAP_ITEM_DATA: u32 = 0x43;
const CHUNK_RADIUS_UPDATED: u32 = 0x46;

const MAP_TEXTURE_UPDATE: u32 = 0x02;
const MAP_DECORATION_UPDATE: u32 = 0x04;

/// Packets the server sends in reply to inbound ones.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientboundPacket {
    /// Full map contents, sent the first time a client asks for a map.
    MapItemData {
        map_id: i64,
        dimension: u8,
        scale: u8,
        width: u32,
        height: u32,
        colors: Vec<u32>,
        decorations: Vec<MapDecoration>,
        tracked: Vec<TrackedObject>,
    },
    /// The view distance the server actually granted.
    ChunkRadiusUpdated { radius: i32 },
    Text {
        text_type: TextType,
        source_name: String,
        message: String,
    },
}

impl ClientboundPacket {
    /// First-appearance reply for a map: full texture plus decorations.
    pub fn map_item_data(data: &MapData) -> Self {
        Self::MapItemData {
            map_id: data.id,
            dimension: data.dimension,
            scale: data.scale,
            width: MAP_SIZE,
            height: MAP_SIZE,
            colors: data.colors.clone(),
            decorations: data.decorations.clone(),
            tracked: data.tracked.clone(),
        }
    }

    pub fn chat(source_name: &str, message: &str) -> Self {
        Self::Text {
            text_type: TextType::Chat,
            source_name: source_name.to_owned(),
            message: message.to_owned(),
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Self::MapItemData { .. } => MAP_ITEM_DATA,
            Self::ChunkRadiusUpdated { .. } => CHUNK_RADIUS_UPDATED,
            Self::Text { .. } => TEXT,
        }
    }

    /// Header plus body, ready for framing.
    pub fn encode(&self) -> Bytes {
        let mut w = PacketWriter::with_capacity(64);
        w.put_var_u32(self.id());
        match self {
            Self::MapItemData {
                map_id,
                dimension,
                scale,
                width,
                height,
                colors,
                decorations,
                tracked,
            } => {
                w.put_var_i64(*map_id);
                let mut flags = 0;
                if !colors.is_empty() {
                    flags |= MAP_TEXTURE_UPDATE;
                }
                if !decorations.is_empty() || !tracked.is_empty() {
                    flags |= MAP_DECORATION_UPDATE;
                }
                w.put_var_u32(flags);
                w.put_u8(*dimension);

                if flags & (MAP_TEXTURE_UPDATE | MAP_DECORATION_UPDATE) != 0 {
                    w.put_u8(*scale);
                }

                if flags & MAP_DECORATION_UPDATE != 0 {
                    w.put_var_u32(tracked.len() as u32);
                    for object in tracked {
                        match object {
                            TrackedObject::Entity { unique_id } => {
                                w.put_i32_le(0).put_var_i64(*unique_id);
                            }
                            TrackedObject::Block { x, y, z } => {
                                w.put_i32_le(1).put_var_i32(*x).put_var_u32(*y).put_var_i32(*z);
                            }
                        }
                    }
                    w.put_var_u32(decorations.len() as u32);
                    for d in decorations {
                        w.put_u8(d.icon)
                            .put_u8(d.rotation)
                            .put_u8(d.x as u8)
                            .put_u8(d.y as u8)
                            .put_string(&d.label)
                            .put_var_u32(d.color);
                    }
                }

                if flags & MAP_TEXTURE_UPDATE != 0 {
                    w.put_var_i32(*width as i32)
                        .put_var_i32(*height as i32)
                        .put_var_i32(0)
                        .put_var_i32(0)
                        .put_var_u32(colors.len() as u32);
                    for color in colors {
                        w.put_var_u32(*color);
                    }
                }
            }
            Self::ChunkRadiusUpdated { radius } => {
                w.put_var_i32(*radius);
            }
            Self::Text {
                text_type,
                source_name,
                message,
            } => {
                w.put_u8(text_type.as_u8()).put_bool(false);
                if text_type.has_source() {
                    w.put_string(source_name);
                }
                w.put_string(message);
                if text_type.has_parameters() {
                    w.put_var_u32(0);
                }
                // xbox user id, platform chat id
                w.put_string("").put_string("");
            }
        }
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_engine::codec::PacketReader;

    #[test]
    fn chunk_radius_layout() {
        let bytes = ClientboundPacket::ChunkRadiusUpdated { radius: 8 }.encode();
        assert_eq!(&bytes[..], &[0x46, 0x10]);
    }

    #[test]
    fn map_without_decorations_skips_decoration_section() {
        let data = MapData::blank(7, 0, 1);
        let bytes = ClientboundPacket::map_item_data(&data).encode();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(r.read_var_u32().unwrap(), MAP_ITEM_DATA);
        assert_eq!(r.read_var_i64().unwrap(), 7);
        assert_eq!(r.read_var_u32().unwrap(), MAP_TEXTURE_UPDATE);
        assert_eq!(r.read_u8().unwrap(), 0);
        assert_eq!(r.read_u8().unwrap(), 1);
        assert_eq!(r.read_var_i32().unwrap(), MAP_SIZE as i32);
        assert_eq!(r.read_var_i32().unwrap(), MAP_SIZE as i32);
        r.read_var_i32().unwrap();
        r.read_var_i32().unwrap();
        assert_eq!(r.read_var_u32().unwrap(), MAP_SIZE * MAP_SIZE);
    }
}
