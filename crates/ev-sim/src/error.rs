use ev_core::{NodeId, VehicleId};
use ev_fleet::FleetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("vehicle {vehicle}: no edge defined from {from} to {to}")]
    UndefinedEdge {
        vehicle: VehicleId,
        from:    NodeId,
        to:      NodeId,
    },

    #[error("vehicle {vehicle}: initial state of charge {soc} is outside [0, 100]")]
    InitialSocOutOfRange { vehicle: VehicleId, soc: f64 },

    #[error(transparent)]
    Fleet(#[from] FleetError),
}

pub type SimResult<T> = Result<T, SimError>;
