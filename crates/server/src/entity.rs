//! Non-player entities and the store that owns them.
//!
//! Runtime ids handed to clients are the store keys flattened with
//! [`KeyData::as_ffi`], so an id that outlives its entity fails lookup instead
//! of aliasing a newer one.

use slotmap::{KeyData, SlotMap, new_key_type};

use crate::effect::{EffectSet, Living};
use crate::protocol::packets::Vec3;

new_key_type! {
    pub struct EntityId;
}

impl EntityId {
    pub fn runtime_id(self) -> u64 {
        self.0.as_ffi()
    }

    pub fn from_runtime_id(id: u64) -> Self {
        KeyData::from_ffi(id).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Horse,
    Donkey,
    Mule,
    Pig,
    Boat,
    Minecart,
    Generic,
}

impl EntityKind {
    /// Horse-type mounts: the only ones that take a rider's jump.
    pub fn is_horse(self) -> bool {
        matches!(self, Self::Horse | Self::Donkey | Self::Mule)
    }

    pub fn is_rideable(self) -> bool {
        !matches!(self, Self::Generic)
    }
}

/// Steering input last received from a rider.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiderInput {
    pub strafe: f32,
    pub forward: f32,
    pub jumping: bool,
    pub sneaking: bool,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub kind: EntityKind,
    pub name: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub alive: bool,
    /// Pending jump power in `0.0..=1.0`, consumed by movement.
    pub jump_power: f32,
    pub rider_input: RiderInput,
    pub effects: EffectSet,
    runtime_id: u64,
}

impl Entity {
    pub fn new(kind: EntityKind, position: Vec3) -> Self {
        Self {
            kind,
            name: String::new(),
            position,
            rotation: [0.0; 3],
            alive: true,
            jump_power: 0.0,
            rider_input: RiderInput::default(),
            effects: EffectSet::new(),
            runtime_id: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Feed a rider's steering input.
    pub fn on_riding_update(&mut self, input: RiderInput) {
        self.rider_input = input;
    }

    /// Rider jump strength arrives as a percentage (0..=100).
    pub fn set_jump_power(&mut self, strength: i32) {
        self.jump_power = (strength.clamp(0, 100) as f32) / 100.0;
    }
}

impl Living for Entity {
    fn runtime_id(&self) -> u64 {
        self.runtime_id
    }

    fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "entity"
        } else {
            &self.name
        }
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut EffectSet {
        &mut self.effects
    }
}

/// Authoritative owner of every non-player entity.
#[derive(Default)]
pub struct EntityStore {
    entities: SlotMap<EntityId, Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = self.entities.insert(entity);
        self.entities[id].runtime_id = id.runtime_id();
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn by_runtime_id(&self, runtime_id: u64) -> Option<(EntityId, &Entity)> {
        let id = EntityId::from_runtime_id(runtime_id);
        self.entities.get(id).map(|e| (id, e))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.entities.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_runtime_id_does_not_resolve() {
        let mut store = EntityStore::new();
        let id = store.spawn(Entity::new(EntityKind::Pig, [0.0; 3]));
        let runtime_id = id.runtime_id();
        assert!(store.by_runtime_id(runtime_id).is_some());

        store.despawn(id);
        store.spawn(Entity::new(EntityKind::Horse, [0.0; 3]));
        assert!(store.by_runtime_id(runtime_id).is_none());
    }

    #[test]
    fn jump_power_is_clamped_percentage() {
        let mut horse = Entity::new(EntityKind::Horse, [0.0; 3]);
        horse.set_jump_power(150);
        assert_eq!(horse.jump_power, 1.0);
        horse.set_jump_power(40);
        assert!((horse.jump_power - 0.4).abs() < f32::EPSILON);
    }
}
