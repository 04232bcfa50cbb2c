//! Process-wide map registry.
//!
//! Map contents are produced elsewhere (item use, world rendering); the
//! session adapter only resolves ids to build first-appearance replies.

use std::sync::Arc;

use dashmap::DashMap;

/// Maps are square, this many pixels per side.
pub const MAP_SIZE: u32 = 128;

#[derive(Debug, Clone, PartialEq)]
pub struct MapDecoration {
    pub icon: u8,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub label: String,
    pub color: u32,
}

/// Something a map follows on its surface.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackedObject {
    Entity { unique_id: i64 },
    Block { x: i32, y: u32, z: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub id: i64,
    pub dimension: u8,
    pub scale: u8,
    /// `MAP_SIZE * MAP_SIZE` packed colors, row-major.
    pub colors: Vec<u32>,
    pub decorations: Vec<MapDecoration>,
    pub tracked: Vec<TrackedObject>,
}

impl MapData {
    /// An all-transparent map.
    pub fn blank(id: i64, dimension: u8, scale: u8) -> Self {
        Self {
            id,
            dimension,
            scale,
            colors: vec![0; (MAP_SIZE * MAP_SIZE) as usize],
            decorations: Vec::new(),
            tracked: Vec::new(),
        }
    }
}

/// Thread-safe id → map lookup. Read-only from the session adapter's side.
#[derive(Default)]
pub struct MapRegistry {
    maps: DashMap<i64, Arc<MapData>>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, id: i64) -> Option<Arc<MapData>> {
        self.maps.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Insert or replace a map, returning the previous contents.
    pub fn insert(&self, data: MapData) -> Option<Arc<MapData>> {
        self.maps.insert(data.id, Arc::new(data))
    }

    pub fn remove(&self, id: i64) -> Option<Arc<MapData>> {
        self.maps.remove(&id).map(|(_, data)| data)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
