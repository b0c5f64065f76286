//! Runtime de solve: binding, ciclo de vida, publicación y limpieza.

mod binding;
mod builder;
mod core;

pub use builder::RuntimeBuilder;
pub use core::{ActionRuntime, HostAccess, SolveReport, SolveStatus};
