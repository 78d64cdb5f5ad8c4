//! Core of the logic gate designer: the component graph, gate evaluation,
//! state propagation and the pointer-driven interaction machine. Nothing in
//! here draws; a front-end feeds [`interaction::InputEvent`]s in and reads
//! component states and truth tables back out.

pub mod circuit;
pub mod components;
pub mod error;
pub mod gates;
pub mod interaction;
pub mod table;
pub mod toolbar;
pub mod types;

pub use circuit::{Circuit, Wire};
pub use components::{CompKind, Component};
pub use error::{CircuitError, CircuitResult};
pub use gates::GateType;
pub use interaction::{InputEvent, Interaction, Outcome, PointerButton};
pub use types::{Bounds, Point, ID};

// todo:
// - re-propagate neighbours after a delete/disconnect instead of leaving them stale
