//! Live metrics endpoint for the packet pipeline.
//!
//! Design contract with the tick loop:
//!   • Metrics: atomic fetch_add, zero-alloc, never blocks.
//!   • The web server runs on its own tokio tasks and never touches player
//!     or entity state; it only reads counters and a few gauges.

pub mod metrics;
pub mod server;

use std::sync::Arc;

use crate::map::MapRegistry;

pub use metrics::{Metrics, MetricsSnapshot};

/// Central state shared via `Arc<DashboardState>`.
pub struct DashboardState {
    pub metrics: Metrics,
    pub maps: Arc<MapRegistry>,
}

impl DashboardState {
    pub fn new(maps: Arc<MapRegistry>) -> Self {
        Self {
            metrics: Metrics::new(),
            maps,
        }
    }
}
