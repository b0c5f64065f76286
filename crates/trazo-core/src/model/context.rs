//! Contexto de ejecución que reciben las etapas de una acción.
//!
//! El contexto es explícito: la acción no toca estado global, todo lo que ve
//! del host le llega por aquí.

use serde::{Deserialize, Serialize};

use crate::host::{DiagnosticsSink, HostDocument};

/// Identidad de una invocación concreta de una acción.
///
/// `invocation` identifica la instancia en el front-end (el id del componente
/// en un canvas, el nombre de un job, etc.); `iteration` distingue pasadas
/// sucesivas sobre la misma instancia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionInfo {
    pub invocation: String,
    pub iteration: u32,
}

impl ExecutionInfo {
    pub fn new(invocation: impl Into<String>, iteration: u32) -> Self {
        Self { invocation: invocation.into(), iteration }
    }
}

/// Lo que recibe cada etapa del ciclo de vida: identidad de la invocación más
/// los servicios del host que una acción concreta puede necesitar.
pub struct ActionContext<'a> {
    pub info: ExecutionInfo,
    pub document: &'a mut dyn HostDocument,
    pub diagnostics: &'a mut dyn DiagnosticsSink,
}
