//! The authoritative tick loop.
//!
//! One task owns every session, the entity store and the game rules. Network
//! tasks only ever reach it through the inbound queue, so no packet is
//! decoded or dispatched concurrently with a state mutation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::config::ServerConfig;
use crate::dashboard::DashboardState;
use crate::dispatch::DispatchTable;
use crate::effect::{self, EffectAddOutcome, EffectInstance, Living};
use crate::entity::{Entity, EntityId, EntityStore};
use crate::events::EventBus;
use crate::map::MapRegistry;
use crate::net::{NetworkEvent, Outbound};
use crate::player::Player;
use crate::rules::GameRules;
use crate::session::{Collaborators, Disposition, SessionAdapter};

pub struct Server {
    config: ServerConfig,
    sessions: HashMap<u64, SessionAdapter>,
    entities: EntityStore,
    maps: Arc<MapRegistry>,
    rules: Box<dyn GameRules + Send>,
    events: EventBus,
    dispatch: DispatchTable,
    outbound: Arc<dyn Outbound + Send + Sync>,
    dashboard: Arc<DashboardState>,
    next_runtime_id: u64,
    ticks: u64,
}

impl Server {
    pub fn new(
        config: ServerConfig,
        rules: Box<dyn GameRules + Send>,
        events: EventBus,
        outbound: Arc<dyn Outbound + Send + Sync>,
        dashboard: Arc<DashboardState>,
    ) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
            entities: EntityStore::new(),
            maps: Arc::clone(&dashboard.maps),
            rules,
            events,
            dispatch: DispatchTable::standard(),
            outbound,
            dashboard,
            next_runtime_id: 1,
            ticks: 0,
        }
    }

    pub fn with_dispatch(mut self, dispatch: DispatchTable) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn session(&self, conn_id: u64) -> Option<&SessionAdapter> {
        self.sessions.get(&conn_id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn spawn_entity(&mut self, entity: Entity) -> EntityId {
        self.entities.spawn(entity)
    }

    /// Seat a player on a live, rideable entity.
    pub fn mount(&mut self, conn_id: u64, vehicle: EntityId) -> bool {
        let rideable = self
            .entities
            .get(vehicle)
            .is_some_and(|e| e.is_alive() && e.kind.is_rideable());
        match self.sessions.get_mut(&conn_id) {
            Some(session) if rideable => {
                session.player_mut().mount(vehicle);
                true
            }
            _ => false,
        }
    }

    pub fn add_player_effect(
        &mut self,
        conn_id: u64,
        effect: EffectInstance,
    ) -> Option<EffectAddOutcome> {
        let session = self.sessions.get_mut(&conn_id)?;
        Some(effect::add_effect(session.player_mut(), effect, &self.events.effect_add))
    }

    pub fn add_entity_effect(
        &mut self,
        id: EntityId,
        effect: EffectInstance,
    ) -> Option<EffectAddOutcome> {
        let entity = self.entities.get_mut(id)?;
        Some(effect::add_effect(entity, effect, &self.events.effect_add))
    }

    // ── Network events ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: NetworkEvent) -> Option<Disposition> {
        match event {
            NetworkEvent::Opened { conn_id, addr } => {
                self.open_session(conn_id, format!("Player{}", conn_id));
                tracing::info!("Session {} opened for {}", conn_id, addr);
                None
            }
            NetworkEvent::Buffer { conn_id, bytes } => self.handle_buffer(conn_id, &bytes),
            NetworkEvent::Closed { conn_id } => {
                self.close_session(conn_id);
                None
            }
        }
    }

    pub fn open_session(&mut self, conn_id: u64, name: String) {
        let runtime_id = self.next_runtime_id;
        self.next_runtime_id += 1;

        let mut player = Player::new(conn_id, runtime_id, name);
        player.set_view_distance(self.config.view_distance, self.config.max_view_distance);
        if self.sessions.insert(conn_id, SessionAdapter::new(conn_id, player)).is_none() {
            self.dashboard.metrics.session_opened();
        }
    }

    pub fn close_session(&mut self, conn_id: u64) {
        if let Some(session) = self.sessions.remove(&conn_id) {
            let mut player = session.into_player();
            player.close();
            self.dashboard.metrics.session_closed();
            tracing::info!("{} left", player.name());
        }
    }

    pub fn handle_buffer(&mut self, conn_id: u64, bytes: &[u8]) -> Option<Disposition> {
        let Some(session) = self.sessions.get_mut(&conn_id) else {
            tracing::debug!("Frame for unknown connection {}, dropping", conn_id);
            return None;
        };
        let mut ctx = Collaborators {
            entities: &mut self.entities,
            maps: &self.maps,
            outbound: self.outbound.as_ref(),
            rules: self.rules.as_mut(),
            events: &self.events,
            dispatch: &self.dispatch,
            metrics: &self.dashboard.metrics,
            max_view_distance: self.config.max_view_distance,
        };
        Some(session.handle_incoming(bytes, &mut ctx))
    }

    // ── Ticking ─────────────────────────────────────────────────────────

    /// Advance game state by one tick.
    pub fn tick(&mut self) {
        self.ticks += 1;
        for session in self.sessions.values_mut() {
            let player = session.player_mut();
            for expired in player.effects_mut().tick(1) {
                tracing::debug!(
                    "{} {} on {} expired",
                    expired.kind.name(),
                    expired.level(),
                    player.name()
                );
            }
        }
        for (_, entity) in self.entities.iter_mut() {
            entity.effects.tick(1);
        }
    }

    /// Drain the inbound queue once per tick until every producer is gone.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<NetworkEvent>) {
        let mut interval = tokio::time::interval(Duration::from_millis(self.config.tick_ms));
        tracing::info!("Tick loop running every {} ms", self.config.tick_ms);

        loop {
            interval.tick().await;

            let mut processed = 0;
            while processed < self.config.max_packets_per_tick {
                match inbound.try_recv() {
                    Ok(event) => {
                        self.handle_event(event);
                        processed += 1;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        tracing::info!("Inbound queue closed, stopping tick loop");
                        return;
                    }
                }
            }

            self.tick();
        }
    }
}
