//! Unit tests for ev-station.

use ev_core::{ChargerId, NodeId, VehicleId};

use crate::{ChargerRegistry, QueueTable};

// ── ChargerRegistry ───────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    #[test]
    fn placement_order_becomes_registry_order() {
        let registry =
            ChargerRegistry::from_placement(&[NodeId(3), NodeId(1), NodeId(3), NodeId(0)]);
        assert_eq!(registry.len(), 4);
        // Two chargers at node 3, in placement order.
        assert_eq!(registry.chargers_at(NodeId(3)), &[ChargerId(0), ChargerId(2)]);
        assert_eq!(registry.chargers_at(NodeId(1)), &[ChargerId(1)]);
        // No chargers anywhere else.
        assert!(registry.chargers_at(NodeId(9)).is_empty());
    }

    #[test]
    fn bind_and_release_roundtrip() {
        let mut registry = ChargerRegistry::from_placement(&[NodeId(0)]);
        let charger = ChargerId(0);
        assert_eq!(registry.occupant(charger), None);

        registry.bind(charger, VehicleId(4));
        assert_eq!(registry.occupant(charger), Some(VehicleId(4)));
        assert_eq!(registry.occupied_count(), 1);

        registry.release(charger, VehicleId(4));
        assert_eq!(registry.occupant(charger), None);
        assert_eq!(registry.occupied_count(), 0);
    }

    #[test]
    fn rebind_by_same_vehicle_is_idempotent() {
        let mut registry = ChargerRegistry::from_placement(&[NodeId(0)]);
        registry.bind(ChargerId(0), VehicleId(1));
        registry.bind(ChargerId(0), VehicleId(1));
        assert_eq!(registry.occupant(ChargerId(0)), Some(VehicleId(1)));
    }

    #[test]
    #[should_panic(expected = "lease violation")]
    fn double_occupancy_panics() {
        let mut registry = ChargerRegistry::from_placement(&[NodeId(0)]);
        registry.bind(ChargerId(0), VehicleId(1));
        registry.bind(ChargerId(0), VehicleId(2));
    }

    #[test]
    #[should_panic(expected = "lease violation")]
    fn releasing_someone_elses_lease_panics() {
        let mut registry = ChargerRegistry::from_placement(&[NodeId(0)]);
        registry.bind(ChargerId(0), VehicleId(1));
        registry.release(ChargerId(0), VehicleId(2));
    }

    #[test]
    #[should_panic(expected = "lease violation")]
    fn releasing_vacant_charger_panics() {
        let mut registry = ChargerRegistry::from_placement(&[NodeId(0)]);
        registry.release(ChargerId(0), VehicleId(1));
    }
}

// ── QueueTable ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    #[test]
    fn fifo_ordering() {
        let mut queues = QueueTable::new();
        let loc = NodeId(0);
        queues.enqueue(loc, VehicleId(5));
        queues.enqueue(loc, VehicleId(2));
        queues.enqueue(loc, VehicleId(9));

        assert_eq!(queues.peek_head(loc), Some(VehicleId(5)));
        assert_eq!(queues.pop_head(loc), Some(VehicleId(5)));
        assert_eq!(queues.pop_head(loc), Some(VehicleId(2)));
        assert_eq!(queues.pop_head(loc), Some(VehicleId(9)));
        assert_eq!(queues.pop_head(loc), None);
    }

    #[test]
    fn enqueue_is_duplicate_free() {
        let mut queues = QueueTable::new();
        let loc = NodeId(1);
        queues.enqueue(loc, VehicleId(7));
        queues.enqueue(loc, VehicleId(7));
        assert_eq!(queues.len(loc), 1);
    }

    #[test]
    fn remove_is_idempotent_and_preserves_order() {
        let mut queues = QueueTable::new();
        let loc = NodeId(2);
        queues.enqueue(loc, VehicleId(1));
        queues.enqueue(loc, VehicleId(2));
        queues.enqueue(loc, VehicleId(3));

        queues.remove(loc, VehicleId(2));
        queues.remove(loc, VehicleId(2)); // absent — no-op
        assert_eq!(queues.snapshot(loc), vec![VehicleId(1), VehicleId(3)]);
    }

    #[test]
    fn queues_are_per_location() {
        let mut queues = QueueTable::new();
        queues.enqueue(NodeId(0), VehicleId(1));
        queues.enqueue(NodeId(1), VehicleId(2));

        assert!(queues.contains(NodeId(0), VehicleId(1)));
        assert!(!queues.contains(NodeId(1), VehicleId(1)));
        assert_eq!(queues.total_waiting(), 2);
    }

    #[test]
    fn empty_location_behaves() {
        let queues = QueueTable::new();
        assert!(queues.is_empty(NodeId(42)));
        assert_eq!(queues.peek_head(NodeId(42)), None);
        assert_eq!(queues.snapshot(NodeId(42)), Vec::<VehicleId>::new());
    }
}
