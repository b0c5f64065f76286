//! Errores específicos del core (taxonomía cerrada).
//!
//! Solo `UnknownCommand` y los fallos de `execute` escapan de `solve`; los
//! errores de binding se degradan a "valor ausente" con un diagnóstico.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::Stage;
use crate::model::ValueKind;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreActionError {
    #[error("unknown command: {0}")] UnknownCommand(String),
    #[error("missing required input: {0}")] MissingRequiredInput(String),
    #[error("conversion not supported: {from:?} -> {to:?}")] ConversionNotSupported { from: ValueKind, to: ValueKind },
    #[error("stage failed: {0}")] StageFailed(Stage),
    #[error("execute fault: {0}")] ExecuteFault(String),
    #[error("unknown input slot: {0}")] UnknownInput(String),
    #[error("unknown output slot: {0}")] UnknownOutput(String),
    #[error("decode: {0}")] Decode(String),
    #[error("internal: {0}")] Internal(String),
}
