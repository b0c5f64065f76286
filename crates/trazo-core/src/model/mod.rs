//! Modelo neutral de valores intercambiados entre host y acciones.

mod context;
mod typed_value;
mod value;

pub use context::{ActionContext, ExecutionInfo};
pub use typed_value::{ValueDecodeError, ValueSpec};
pub use value::{Value, ValueKind};
