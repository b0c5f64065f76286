//! trazo-geom: universo de tipos del dominio.
//!
//! Geometría y objetos de modelo en unidades del dominio (metros). Sin
//! conocimiento del host; solo datos validados más los `ValueSpec` que los
//! dejan cruzar la frontera neutral.
pub mod curve;
pub mod error;
pub mod model;
pub mod profile;
pub mod vector;

pub use curve::{Curve, Line, Polyline};
pub use error::DomainError;
pub use model::{LinearElement, Material, PanelElement, SectionFamily, Shape, ShapeCollection};
pub use profile::SectionProfile;
pub use vector::Vector;
