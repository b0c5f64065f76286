//! Contrato de ciclo de vida y binding de una acción.
//!
//! Una acción se parte en dos traits:
//! - `ActionStages`: las cuatro etapas que el runtime conduce en orden.
//! - `ActionBinding`: la tabla tipada de slots (descriptor + set/get), que
//!   la macro `action!` implementa a partir de la declaración.
//!
//! `Action` es el blanket sobre ambos; el runtime solo conoce
//! `Box<dyn Action>`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreActionError;
use crate::model::{ActionContext, Value};

use super::ActionDescriptor;

/// Etapa del ciclo de vida, para eventos y errores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    PreExecution,
    Execute,
    PostExecution,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PreExecution => write!(f, "pre_execution"),
            Stage::Execute => write!(f, "execute"),
            Stage::PostExecution => write!(f, "post_execution"),
        }
    }
}

/// Ciclo de vida de una acción.
///
/// `pre_execution` y `post_execution` devuelven `bool`: `false` corta el
/// solve en silencio (no es un error). `execute` es la única etapa cuyo
/// `Err` se propaga al llamador. `final_operations` no corre en el solve que
/// creó la instancia: el runtime la invoca en el solve SIGUIENTE de la misma
/// invocación, sobre la última instancia exitosa, antes de reemplazarla.
pub trait ActionStages: fmt::Debug + Send {
    fn pre_execution(&mut self, _ctx: &mut ActionContext<'_>) -> bool {
        true
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, CoreActionError>;

    fn post_execution(&mut self, _ctx: &mut ActionContext<'_>) -> bool {
        true
    }

    fn final_operations(&mut self, _ctx: &mut ActionContext<'_>) {}
}

/// Tabla tipada de slots de una acción.
pub trait ActionBinding {
    /// Descriptor estático de la acción (una sola construcción por proceso).
    fn descriptor(&self) -> &'static ActionDescriptor;

    /// Asigna el valor de un slot de entrada, decodificando al tipo del
    /// campo.
    fn set_input(&mut self, name: &str, value: Value) -> Result<(), CoreActionError>;

    /// Lee un slot de salida ya calculado. `None` si la acción no lo
    /// produjo.
    fn output(&self, name: &str) -> Option<Value>;
}

pub trait Action: ActionStages + ActionBinding {}

impl<T: ActionStages + ActionBinding> Action for T {}
