use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{SolveEvent, SolveEventKind};

/// Almacenamiento de eventos append-only, agrupados por solve.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo
    /// (con seq y ts).
    fn append_kind(&mut self, solve_id: Uuid, kind: SolveEventKind) -> SolveEvent;
    /// Lista eventos de un solve (orden ascendente por seq).
    fn list(&self, solve_id: Uuid) -> Vec<SolveEvent>;
}

pub struct InMemoryEventStore {
    pub inner: HashMap<Uuid, Vec<SolveEvent>>,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self { inner: HashMap::new() }
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, solve_id: Uuid, kind: SolveEventKind) -> SolveEvent {
        let vec = self.inner.entry(solve_id).or_insert_with(Vec::new);
        let seq = vec.len() as u64;
        let ev = SolveEvent { seq, solve_id, kind, ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, solve_id: Uuid) -> Vec<SolveEvent> {
        self.inner.get(&solve_id).cloned().unwrap_or_default()
    }
}
