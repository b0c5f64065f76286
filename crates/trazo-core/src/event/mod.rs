//! Log de eventos de solve.

mod store;
mod types;

pub use store::{EventStore, InMemoryEventStore};
pub use types::{SolveEvent, SolveEventKind};
