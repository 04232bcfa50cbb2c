//! Server settings, overridable from command-line flags.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    pub bind: String,
    pub dashboard_port: u16,
    /// Chunk radius a player starts with before asking for one.
    pub view_distance: i32,
    /// Largest chunk radius granted on request.
    pub max_view_distance: i32,
    /// Inbound frames buffered between network tasks and the tick loop.
    pub queue_capacity: usize,
    pub tick_ms: u64,
    /// Frames processed per tick at most; the rest wait for the next tick.
    pub max_packets_per_tick: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:19132".into(),
            dashboard_port: 8000,
            view_distance: 8,
            max_view_distance: 32,
            queue_capacity: 1024,
            tick_ms: 50,
            max_packets_per_tick: 4096,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().collect::<Vec<_>>())
    }

    /// Flags not given (or not parseable) keep their defaults.
    pub fn from_args(args: Vec<String>) -> Self {
        let defaults = Self::default();
        let flag = |name: &str| args.iter().skip_while(|a| *a != name).nth(1).cloned();

        let config = Self {
            bind: flag("--bind").unwrap_or(defaults.bind),
            dashboard_port: flag("--dashboard-port")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.dashboard_port),
            view_distance: flag("--view-distance")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.view_distance),
            max_view_distance: flag("--max-view-distance")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_view_distance),
            queue_capacity: flag("--queue-capacity")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.queue_capacity),
            tick_ms: flag("--tick-ms")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.tick_ms),
            max_packets_per_tick: flag("--max-packets-per-tick")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_packets_per_tick),
        };
        config.normalized()
    }

    fn normalized(mut self) -> Self {
        self.max_view_distance = self.max_view_distance.max(1);
        self.view_distance = self.view_distance.clamp(1, self.max_view_distance);
        self.queue_capacity = self.queue_capacity.max(1);
        self.tick_ms = self.tick_ms.max(1);
        self.max_packets_per_tick = self.max_packets_per_tick.max(1);
        self
    }
}
