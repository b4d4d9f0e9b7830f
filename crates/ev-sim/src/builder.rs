//! Fluent builder for constructing a [`Sim`].

use ev_core::{NodeId, SimConfig, VehicleId};
use ev_fleet::{FleetError, Vehicle, VehicleSpec};
use ev_station::{ChargerRegistry, QueueTable};
use ev_world::Topology;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<T>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, charge/discharge rates, …
/// - `T: Topology` — the travel-time provider (e.g. a generated
///   `TravelMatrix`)
/// - `.vehicles(specs)` — the fleet, one [`VehicleSpec`] per vehicle;
///   `VehicleId`s are assigned sequentially in input order
///
/// # Optional inputs
///
/// | Method          | Default                          |
/// |-----------------|----------------------------------|
/// | `.chargers(v)`  | No chargers anywhere             |
///
/// # Build-time validation
///
/// Every input defect that would otherwise surface mid-run is rejected
/// here, before tick 0:
///
/// - a vehicle with no legs ([`FleetError::EmptyItinerary`]);
/// - any consecutive location pair along a vehicle's route with no defined
///   edge duration ([`SimError::UndefinedEdge`]);
/// - an initial state of charge outside `[0, 100]`
///   ([`SimError::InitialSocOutOfRange`]).
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, world.into_matrix())
///     .vehicles(specs)
///     .chargers(placement)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<T: Topology> {
    config:    SimConfig,
    topology:  T,
    specs:     Vec<VehicleSpec>,
    placement: Vec<NodeId>,
}

impl<T: Topology> SimBuilder<T> {
    /// Create a builder with all required inputs except the fleet.
    pub fn new(config: SimConfig, topology: T) -> Self {
        Self {
            config,
            topology,
            specs:     Vec::new(),
            placement: Vec::new(),
        }
    }

    /// Supply the whole fleet at once.  Replaces any earlier specs.
    pub fn vehicles(mut self, specs: Vec<VehicleSpec>) -> Self {
        self.specs = specs;
        self
    }

    /// Append a single vehicle spec.
    pub fn vehicle(mut self, spec: VehicleSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Supply the charger placement list.  One charger is created per entry,
    /// in input order — that order becomes registry (contention) order.
    pub fn chargers(mut self, placement: Vec<NodeId>) -> Self {
        self.placement = placement;
        self
    }

    /// Validate the fleet against the topology and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<T>> {
        let mut vehicles = Vec::with_capacity(self.specs.len());

        for (i, spec) in self.specs.iter().enumerate() {
            let id = VehicleId(i as u32);

            if spec.legs.is_empty() {
                return Err(FleetError::EmptyItinerary(id).into());
            }
            if !(0.0..=100.0).contains(&spec.initial_soc) {
                return Err(SimError::InitialSocOutOfRange { vehicle: id, soc: spec.initial_soc });
            }

            // Walk the whole route up front so an undefined edge can never
            // surface mid-run.
            let mut loc = spec.start;
            for leg in &spec.legs {
                if self.topology.edge_duration(loc, leg.destination).is_none() {
                    return Err(SimError::UndefinedEdge {
                        vehicle: id,
                        from:    loc,
                        to:      leg.destination,
                    });
                }
                loc = leg.destination;
            }

            vehicles.push(Vehicle::from_spec(id, spec));
        }

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            topology: self.topology,
            vehicles,
            registry: ChargerRegistry::from_placement(&self.placement),
            queues:   QueueTable::new(),
        })
    }
}
