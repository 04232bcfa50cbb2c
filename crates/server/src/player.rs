//! Per-connection player state and its mutation surface.
//!
//! The session adapter drives a [`Player`] only through the methods here.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::effect::{EffectSet, Living};
use crate::entity::EntityId;
use crate::form::{Form, FormResponse};
use crate::protocol::CURRENT_PROTOCOL;
use crate::protocol::packets::{Login, Vec3};

/// Generate an offline-mode UUID (v3, from "OfflinePlayer:<name>").
pub fn offline_uuid(name: &str) -> Uuid {
    Uuid::new_v3(&Uuid::NAMESPACE_URL, format!("OfflinePlayer:{}", name).as_bytes())
}

/// Pitch, yaw, head yaw.
pub type Rotation = [f32; 3];

#[derive(Debug)]
pub struct Player {
    conn_id: u64,
    runtime_id: u64,
    name: String,
    uuid: Uuid,
    connected: bool,
    logged_in: bool,
    spawned: bool,
    protocol: Option<i32>,
    pub position: Vec3,
    pub rotation: Rotation,
    pub on_ground: bool,
    view_distance: i32,
    riding: Option<EntityId>,
    next_form_id: u32,
    pending_forms: HashMap<u32, Form>,
    form_responses: Vec<(u32, FormResponse)>,
    effects: EffectSet,
}

impl Player {
    pub fn new(conn_id: u64, runtime_id: u64, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            conn_id,
            runtime_id,
            uuid: offline_uuid(&name),
            name,
            connected: true,
            logged_in: false,
            spawned: false,
            protocol: None,
            position: [0.0; 3],
            rotation: [0.0; 3],
            on_ground: false,
            view_distance: 0,
            riding: None,
            next_form_id: 0,
            pending_forms: HashMap::new(),
            form_responses: Vec::new(),
            effects: EffectSet::new(),
        }
    }

    pub fn conn_id(&self) -> u64 {
        self.conn_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn close(&mut self) {
        self.connected = false;
        self.riding = None;
        self.pending_forms.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn is_spawned(&self) -> bool {
        self.spawned
    }

    pub fn protocol(&self) -> Option<i32> {
        self.protocol
    }

    /// Record a login. A second login on the same session is refused.
    pub fn handle_login(&mut self, login: &Login) -> bool {
        if self.logged_in {
            tracing::warn!("{} sent a second Login, ignoring", self.name);
            return false;
        }
        if login.protocol != CURRENT_PROTOCOL {
            tracing::info!(
                "{} logging in with protocol {} (server speaks {})",
                self.name,
                login.protocol,
                CURRENT_PROTOCOL
            );
        }
        self.protocol = Some(login.protocol);
        self.logged_in = true;
        true
    }

    pub fn apply_movement(&mut self, position: Vec3, rotation: Rotation, on_ground: bool) {
        self.position = position;
        self.rotation = rotation;
        self.on_ground = on_ground;
    }

    /// The client finished loading and is now in the world.
    pub fn mark_spawned(&mut self) {
        if !self.spawned {
            tracing::info!("{} spawned", self.name);
        }
        self.spawned = true;
    }

    pub fn view_distance(&self) -> i32 {
        self.view_distance
    }

    /// Clamp a requested chunk radius to `1..=max` and store it. Returns the
    /// granted radius.
    pub fn set_view_distance(&mut self, requested: i32, max: i32) -> i32 {
        self.view_distance = requested.clamp(1, max.max(1));
        self.view_distance
    }

    pub fn riding(&self) -> Option<EntityId> {
        self.riding
    }

    pub fn mount(&mut self, vehicle: EntityId) {
        self.riding = Some(vehicle);
    }

    pub fn dismount(&mut self) -> Option<EntityId> {
        self.riding.take()
    }

    /// Queue a form for this player, returning its id.
    pub fn send_form(&mut self, form: Form) -> u32 {
        let id = self.next_form_id;
        self.next_form_id = self.next_form_id.wrapping_add(1);
        self.pending_forms.insert(id, form);
        id
    }

    pub fn has_pending_form(&self, id: u32) -> bool {
        self.pending_forms.contains_key(&id)
    }

    /// Deliver a decoded response to the form it answers. Unknown ids and
    /// responses that do not fit the form are rejected.
    pub fn on_form_submit(&mut self, id: u32, value: Value) -> bool {
        let Some(form) = self.pending_forms.remove(&id) else {
            tracing::debug!("{} answered unknown form {}", self.name, id);
            return false;
        };
        match form.interpret(value) {
            Ok(response) => {
                self.form_responses.push((id, response));
                true
            }
            Err(e) => {
                tracing::warn!("{} sent an invalid response to form {}: {}", self.name, id, e);
                false
            }
        }
    }

    /// Responses received so far, oldest first.
    pub fn form_responses(&self) -> &[(u32, FormResponse)] {
        &self.form_responses
    }
}

impl Living for Player {
    fn runtime_id(&self) -> u64 {
        self.runtime_id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut EffectSet {
        &mut self.effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_uuid_is_stable_per_name() {
        assert_eq!(offline_uuid("Steve"), offline_uuid("Steve"));
        assert_ne!(offline_uuid("Steve"), offline_uuid("Alex"));
        assert_eq!(offline_uuid("Steve").get_version_num(), 3);
    }

    #[test]
    fn view_distance_clamps_to_bounds() {
        let mut p = Player::new(1, 1, "Steve");
        assert_eq!(p.set_view_distance(0, 16), 1);
        assert_eq!(p.set_view_distance(-5, 16), 1);
        assert_eq!(p.set_view_distance(64, 16), 16);
        assert_eq!(p.set_view_distance(10, 16), 10);
        assert_eq!(p.view_distance(), 10);
    }
}
