//! Contrato de acciones: ciclo de vida, descriptores, registro.

mod contract;
mod descriptor;
pub mod macros;
mod registry;

pub use contract::{Action, ActionBinding, ActionStages, Stage};
pub use descriptor::{ActionDescriptor, InputDescriptor, OutputDescriptor};
pub use registry::{ActionFactory, ActionRegistration, ActionRegistry, PluginModule};
