//! trazo-adapters: capa de adaptación Host ↔ Dominio
//!
//! Este crate provee:
//! - Los tipos de geometría del lado host (segundo universo de tipos, en
//!   milímetros).
//! - Los conjuntos de convertidores declarativos entre ambos universos
//!   (`DomainToHost` / `HostToDomain`), pares inversos que hacen round-trip
//!   bajo igualdad del dominio.
//! - `BasicToolsPlugin`: el módulo de acciones básicas
//!   (CreateRectangularSection, DrawLinearElement, MakeElements,
//!   CreatePanelElementInCurve).
//!
//! Nota: el core solo conoce `Value { kind, payload }`; aquí nos apoyamos en
//! los `ValueSpec` tipados y en la macro `action!` del core.

pub mod actions;
pub mod converters;
pub mod host_geometry;

pub use actions::BasicToolsPlugin;
pub use converters::{DomainToHost, HostToDomain};
pub use host_geometry::{host_number, HostCurve, HostLine, HostPoint, MM_PER_M};
