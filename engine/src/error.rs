//! Errors returned by the circuit API.
//!
//! The interaction layer never surfaces these to the user; a rejected
//! gesture is a silent no-op there. They exist so that programmatic callers
//! (and tests) can tell why a mutation did not happen.

use thiserror::Error;

use crate::types::ID;

pub type CircuitResult<T> = Result<T, CircuitError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    #[error("no component with id {0}")]
    UnknownComponent(ID),

    #[error("component {0} is not an input")]
    NotAnInput(ID),

    /// Outputs have no downstream side.
    #[error("component {0} can't drive a wire")]
    InvalidSource(ID),

    /// Inputs have no upstream side.
    #[error("component {0} can't receive a wire")]
    InvalidTarget(ID),

    #[error("component {0} can't be wired to itself")]
    SelfConnection(ID),

    #[error("{from} is already wired to {to}")]
    DuplicateWire { from: ID, to: ID },

    #[error("component {id} already has all {max} inputs connected")]
    InputsFull { id: ID, max: usize },

    #[error("wiring {from} to {to} would create a feedback loop")]
    WouldCycle { from: ID, to: ID },

    #[error("{from} is not wired to {to}")]
    NoSuchWire { from: ID, to: ID },

    #[error("{count} inputs are too many to enumerate")]
    TooManyInputs { count: usize },
}
