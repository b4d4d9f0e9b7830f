//! The charger registry: owns every charger and their per-location grouping.

use rustc_hash::FxHashMap;

use ev_core::{ChargerId, NodeId, VehicleId};

// ── Charger ───────────────────────────────────────────────────────────────────

/// One physical charging point.
///
/// Chargers are created once at simulation start and never move or disappear.
/// Capacity is exactly one vehicle; multi-occupant chargers are out of scope
/// and must not be emulated by relaxing the occupancy assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Charger {
    pub id: ChargerId,
    /// The location this charger serves, fixed at creation.
    pub location: NodeId,
    /// The vehicle currently holding the lease, if any.
    pub occupant: Option<VehicleId>,
}

// ── ChargerRegistry ───────────────────────────────────────────────────────────

/// All chargers, in creation order, with a per-location index.
///
/// The per-location `Vec<ChargerId>` preserves creation order; acquisition
/// scans walk it front to back, so the earliest-created free charger at a
/// location always wins.
#[derive(Debug, Default)]
pub struct ChargerRegistry {
    chargers: Vec<Charger>,
    by_location: FxHashMap<NodeId, Vec<ChargerId>>,
}

impl ChargerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a placement list: one charger per entry, in
    /// input order (that order becomes the acquisition tie-break).
    pub fn from_placement(placement: &[NodeId]) -> Self {
        let mut registry = Self::new();
        for &location in placement {
            registry.add_charger(location);
        }
        registry
    }

    /// Create a charger at `location` and return its id.
    pub fn add_charger(&mut self, location: NodeId) -> ChargerId {
        let id = ChargerId(self.chargers.len() as u32);
        self.chargers.push(Charger { id, location, occupant: None });
        self.by_location.entry(location).or_default().push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.chargers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chargers.is_empty()
    }

    /// All chargers in creation order.
    pub fn chargers(&self) -> &[Charger] {
        &self.chargers
    }

    /// The chargers at `location`, in creation order.  Empty if the location
    /// has none.
    pub fn chargers_at(&self, location: NodeId) -> &[ChargerId] {
        self.by_location
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Current occupant of `charger`, if any.
    #[inline]
    pub fn occupant(&self, charger: ChargerId) -> Option<VehicleId> {
        self.chargers[charger.index()].occupant
    }

    /// Bind the exclusive lease on `charger` to `vehicle`.
    ///
    /// Idempotent when `vehicle` already holds the lease.
    ///
    /// # Panics
    ///
    /// Panics if another vehicle occupies the charger — double occupancy is
    /// a scheduling-protocol bug, never a recoverable condition.
    pub fn bind(&mut self, charger: ChargerId, vehicle: VehicleId) {
        let slot = &mut self.chargers[charger.index()].occupant;
        match *slot {
            None => *slot = Some(vehicle),
            Some(held) if held == vehicle => {}
            Some(held) => panic!(
                "lease violation: {charger} occupied by {held}, cannot bind {vehicle}"
            ),
        }
    }

    /// Release the lease on `charger` held by `vehicle`.
    ///
    /// # Panics
    ///
    /// Panics if the charger is vacant or held by a different vehicle —
    /// an orphaned or mismatched lease is a scheduling-protocol bug.
    pub fn release(&mut self, charger: ChargerId, vehicle: VehicleId) {
        let slot = &mut self.chargers[charger.index()].occupant;
        match *slot {
            Some(held) if held == vehicle => *slot = None,
            other => panic!(
                "lease violation: {vehicle} released {charger} but occupant is {other:?}"
            ),
        }
    }

    /// Number of chargers currently leased.
    pub fn occupied_count(&self) -> usize {
        self.chargers.iter().filter(|c| c.occupant.is_some()).count()
    }
}
