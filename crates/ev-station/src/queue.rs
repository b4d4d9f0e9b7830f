//! `QueueTable` — one FIFO wait-list of vehicle ids per location.
//!
//! All chargers at one location share a single queue; there is no per-charger
//! queue.  Service is strictly head-only: later entries never acquire a freed
//! charger before becoming head, even if a different charger frees up first.
//!
//! Queues hold ids, not vehicle references — the fleet layer is the single
//! source of truth for vehicle state, and the table never contains the same
//! id twice.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use ev_core::{NodeId, VehicleId};

/// Mapping from location → waiting vehicles in arrival order.
#[derive(Debug, Default)]
pub struct QueueTable {
    queues: FxHashMap<NodeId, VecDeque<VehicleId>>,
}

impl QueueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `vehicle` to the queue at `location`.
    ///
    /// No-op if the vehicle is already queued there, so callers may retry
    /// every tick without creating duplicates.
    pub fn enqueue(&mut self, location: NodeId, vehicle: VehicleId) {
        let queue = self.queues.entry(location).or_default();
        if !queue.contains(&vehicle) {
            queue.push_back(vehicle);
        }
    }

    /// The longest-waiting vehicle at `location`, without removing it.
    pub fn peek_head(&self, location: NodeId) -> Option<VehicleId> {
        self.queues.get(&location).and_then(|q| q.front()).copied()
    }

    /// Remove and return the queue head at `location`.
    pub fn pop_head(&mut self, location: NodeId) -> Option<VehicleId> {
        self.queues.get_mut(&location).and_then(|q| q.pop_front())
    }

    /// Remove `vehicle` from the queue at `location`, wherever it sits.
    /// Idempotent: removing an absent vehicle is a no-op.
    pub fn remove(&mut self, location: NodeId, vehicle: VehicleId) {
        if let Some(queue) = self.queues.get_mut(&location) {
            queue.retain(|&v| v != vehicle);
        }
    }

    /// `true` if `vehicle` is waiting at `location`.
    pub fn contains(&self, location: NodeId, vehicle: VehicleId) -> bool {
        self.queues
            .get(&location)
            .is_some_and(|q| q.contains(&vehicle))
    }

    /// Number of vehicles waiting at `location`.
    pub fn len(&self, location: NodeId) -> usize {
        self.queues.get(&location).map_or(0, VecDeque::len)
    }

    /// `true` if no vehicle is waiting at `location`.
    pub fn is_empty(&self, location: NodeId) -> bool {
        self.len(location) == 0
    }

    /// Total vehicles waiting across every location.
    pub fn total_waiting(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Snapshot of the queue at `location`, head first.
    pub fn snapshot(&self, location: NodeId) -> Vec<VehicleId> {
        self.queues
            .get(&location)
            .map(|q| q.iter().copied().collect())
            .unwrap_or_default()
    }
}
