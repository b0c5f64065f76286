//! Tipos de evento de un solve y estructura `SolveEvent`.
//!
//! Rol en el runtime:
//! - Cada `solve` del `ActionRuntime` emite eventos a un `EventStore`
//!   append-only.
//! - El enum `SolveEventKind` define el contrato observable del runtime:
//!   binding de entradas, fallos de etapa, publicación y limpieza quedan
//!   registrados en orden.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::Stage;
use crate::model::ValueKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SolveEventKind {
    /// Primer evento de un solve: comando e identidad de la invocación.
    SolveStarted { command: String, invocation: String, iteration: u32 },
    /// Un slot de entrada recibió valor. `converted` indica si pasó por el
    /// registro de conversiones.
    InputBound { input: String, kind: ValueKind, converted: bool },
    /// Un slot de entrada quedó sin valor. Si `required`, el solve aborta.
    InputMissing { input: String, required: bool },
    /// Una etapa devolvió `false` (corte silencioso, no es error).
    StageFailed { stage: Stage },
    /// `execute` devolvió `Err`. El error se propaga al llamador tras la
    /// limpieza.
    ExecuteFaulted { message: String },
    /// Salidas empujadas al sink (solo en solves completos).
    OutputsPublished { count: usize },
    /// Se invocó `final_operations` de la instancia exitosa previa.
    CleanupInvoked { invocation: String },
    /// Evento de cierre de un solve completo.
    SolveCompleted { command: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub solve_id: Uuid,
    pub kind: SolveEventKind,
    pub ts: DateTime<Utc>,
}
