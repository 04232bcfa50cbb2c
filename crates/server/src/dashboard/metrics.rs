//! Lock-free packet pipeline counters.
//!
//! The tick loop updates these via atomic operations: no locks, no
//! allocations, no blocking on the hot path. The dashboard server reads
//! them at its own pace.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::time::{Duration, Instant};
use strum::{EnumCount, IntoEnumIterator};

use crate::protocol::PacketKind;

/// Atomic pipeline counters. A handful of `fetch_add`s per packet.
pub struct Metrics {
    // Monotonic counters
    packets_received: AtomicU64,
    packets_handled: AtomicU64,
    packets_unhandled: AtomicU64,
    packets_cancelled: AtomicU64,
    decode_errors: AtomicU64,
    trailing_bytes: AtomicU64,
    dead_session_drops: AtomicU64,
    observer_failures: AtomicU64,
    buffers_dropped: AtomicU64,
    dispatch_ns_sum: AtomicU64,
    per_kind: [AtomicU64; PacketKind::COUNT],

    // Dispatch latency histogram buckets (event + handler)
    hist_under_1us: AtomicU64,
    hist_1_10us: AtomicU64,
    hist_10_100us: AtomicU64,
    hist_100us_1ms: AtomicU64,
    hist_over_1ms: AtomicU64,

    // Gauges
    sessions_open: AtomicU64,

    started_at: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            packets_received: AtomicU64::new(0),
            packets_handled: AtomicU64::new(0),
            packets_unhandled: AtomicU64::new(0),
            packets_cancelled: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            trailing_bytes: AtomicU64::new(0),
            dead_session_drops: AtomicU64::new(0),
            observer_failures: AtomicU64::new(0),
            buffers_dropped: AtomicU64::new(0),
            dispatch_ns_sum: AtomicU64::new(0),
            per_kind: std::array::from_fn(|_| AtomicU64::new(0)),
            hist_under_1us: AtomicU64::new(0),
            hist_1_10us: AtomicU64::new(0),
            hist_10_100us: AtomicU64::new(0),
            hist_100us_1ms: AtomicU64::new(0),
            hist_over_1ms: AtomicU64::new(0),
            sessions_open: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    /// A buffer decoded into a packet of `kind`.
    pub fn record_received(&self, kind: PacketKind) {
        self.packets_received.fetch_add(1, Relaxed);
        self.per_kind[kind.index()].fetch_add(1, Relaxed);
    }

    pub fn record_decode_error(&self) {
        self.decode_errors.fetch_add(1, Relaxed);
    }

    pub fn record_trailing_bytes(&self) {
        self.trailing_bytes.fetch_add(1, Relaxed);
    }

    pub fn record_dead_session_drop(&self) {
        self.dead_session_drops.fetch_add(1, Relaxed);
    }

    pub fn record_cancelled(&self) {
        self.packets_cancelled.fetch_add(1, Relaxed);
    }

    pub fn record_observer_failures(&self, n: usize) {
        if n > 0 {
            self.observer_failures.fetch_add(n as u64, Relaxed);
        }
    }

    pub fn record_buffer_dropped(&self) {
        self.buffers_dropped.fetch_add(1, Relaxed);
    }

    /// Called once per dispatched packet with the handler's verdict.
    pub fn record_dispatch(&self, handled: bool, duration: Duration) {
        if handled {
            self.packets_handled.fetch_add(1, Relaxed);
        } else {
            self.packets_unhandled.fetch_add(1, Relaxed);
        }
        self.dispatch_ns_sum
            .fetch_add(duration.as_nanos() as u64, Relaxed);

        let us = duration.as_micros() as u64;
        match us {
            0 => {
                self.hist_under_1us.fetch_add(1, Relaxed);
            }
            1..=9 => {
                self.hist_1_10us.fetch_add(1, Relaxed);
            }
            10..=99 => {
                self.hist_10_100us.fetch_add(1, Relaxed);
            }
            100..=999 => {
                self.hist_100us_1ms.fetch_add(1, Relaxed);
            }
            _ => {
                self.hist_over_1ms.fetch_add(1, Relaxed);
            }
        }
    }

    pub fn session_opened(&self) {
        self.sessions_open.fetch_add(1, Relaxed);
    }

    pub fn session_closed(&self) {
        self.sessions_open.fetch_sub(1, Relaxed);
    }

    /// Read all counters into a serializable snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            uptime_secs: self.started_at.elapsed().as_secs_f64(),
            packets_received: self.packets_received.load(Relaxed),
            packets_handled: self.packets_handled.load(Relaxed),
            packets_unhandled: self.packets_unhandled.load(Relaxed),
            packets_cancelled: self.packets_cancelled.load(Relaxed),
            decode_errors: self.decode_errors.load(Relaxed),
            trailing_bytes: self.trailing_bytes.load(Relaxed),
            dead_session_drops: self.dead_session_drops.load(Relaxed),
            observer_failures: self.observer_failures.load(Relaxed),
            buffers_dropped: self.buffers_dropped.load(Relaxed),
            dispatch_ns_sum: self.dispatch_ns_sum.load(Relaxed),
            sessions: self.sessions_open.load(Relaxed),
            per_kind: PacketKind::iter()
                .map(|k| (k.name(), self.per_kind[k.index()].load(Relaxed)))
                .filter(|(_, n)| *n > 0)
                .collect(),
            hist: [
                self.hist_under_1us.load(Relaxed),
                self.hist_1_10us.load(Relaxed),
                self.hist_10_100us.load(Relaxed),
                self.hist_100us_1ms.load(Relaxed),
                self.hist_over_1ms.load(Relaxed),
            ],
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable snapshot of all metrics at a point in time.
/// Clients compute rates (packets/sec, etc.) by diffing consecutive snapshots.
#[derive(Clone, Debug, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: f64,
    pub packets_received: u64,
    pub packets_handled: u64,
    pub packets_unhandled: u64,
    pub packets_cancelled: u64,
    pub decode_errors: u64,
    pub trailing_bytes: u64,
    pub dead_session_drops: u64,
    pub observer_failures: u64,
    pub buffers_dropped: u64,
    pub dispatch_ns_sum: u64,
    pub sessions: u64,
    /// Received count per packet kind, zero entries omitted.
    pub per_kind: Vec<(&'static str, u64)>,
    /// `[<1μs, 1-10μs, 10-100μs, 100μs-1ms, >1ms]`
    pub hist: [u64; 5],
}
