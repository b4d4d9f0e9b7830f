//! Consumable trip itineraries.
//!
//! An `Itinerary` is an ordered sequence of [`Leg`]s plus a cursor that only
//! moves forward: a leg, once consumed, is never replayed.  The underlying
//! legs are immutable for the whole run — only the cursor advances.

use ev_core::NodeId;
use ev_world::TripPlan;

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One itinerary entry: where to go next and how long to stay there.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// The node to travel to.
    pub destination: NodeId,
    /// Ticks to remain parked at `destination` before the next departure is
    /// considered.
    pub dwell_ticks: u64,
}

impl Leg {
    pub fn new(destination: NodeId, dwell_ticks: u64) -> Self {
        Self { destination, dwell_ticks }
    }
}

// ── Itinerary ─────────────────────────────────────────────────────────────────

/// An ordered, consumable sequence of legs with a monotone cursor.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    legs: Vec<Leg>,
    cursor: usize,
}

impl Itinerary {
    pub fn new(legs: Vec<Leg>) -> Self {
        Self { legs, cursor: 0 }
    }

    /// Build from the `(destination, dwell)` pairs of a generated plan.
    pub fn from_stops(stops: &[(NodeId, u64)]) -> Self {
        Self::new(stops.iter().map(|&(n, d)| Leg::new(n, d)).collect())
    }

    /// The next leg to be taken, if any.
    #[inline]
    pub fn peek(&self) -> Option<&Leg> {
        self.legs.get(self.cursor)
    }

    /// Consume and return the next leg.  The cursor never moves backward.
    pub fn advance(&mut self) -> Option<Leg> {
        let leg = self.legs.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(leg)
    }

    /// Legs not yet consumed, in order.
    pub fn remaining(&self) -> &[Leg] {
        &self.legs[self.cursor..]
    }

    /// Number of legs consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.legs.len()
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

impl From<&TripPlan> for Itinerary {
    fn from(plan: &TripPlan) -> Self {
        Itinerary::from_stops(&plan.stops)
    }
}
