use ev_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("fleet parse error: {0}")]
    Parse(String),

    #[error("vehicle {0} has an empty itinerary")]
    EmptyItinerary(VehicleId),

    #[error("vehicle ids must be contiguous from 0: expected {expected}, found {found}")]
    NonContiguousIds { expected: u32, found: u32 },

    #[error("vehicle {0} has conflicting start_node values across its rows")]
    InconsistentStart(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FleetResult<T> = Result<T, FleetError>;
