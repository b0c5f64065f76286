//! Geometría del lado host, en milímetros.
//!
//! El host de referencia trabaja en mm y representa toda curva como lista de
//! puntos; el dominio trabaja en metros con tipos semánticos. Los
//! convertidores de `converters` escalan y reinterpretan entre ambos.

use serde::{Deserialize, Serialize};
use serde_json::json;

use trazo_core::{impl_value_spec, Value, ValueKind};

use trazo_geom::Vector;

/// Factor de escala dominio (m) → host (mm).
pub const MM_PER_M: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl HostPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_vector(v: &Vector) -> Self {
        Self::new(v.x * MM_PER_M, v.y * MM_PER_M, v.z * MM_PER_M)
    }

    pub fn to_vector(&self) -> Vector {
        Vector::new(self.x / MM_PER_M, self.y / MM_PER_M, self.z / MM_PER_M)
    }
}

impl_value_spec!(HostPoint => ValueKind::HostPoint);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostLine {
    pub from: HostPoint,
    pub to: HostPoint,
}

impl HostLine {
    pub fn new(from: HostPoint, to: HostPoint) -> Self {
        Self { from, to }
    }
}

impl_value_spec!(HostLine => ValueKind::HostLine);

/// Curva del host: polilínea por puntos. Dos puntos es un segmento recto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCurve {
    pub points: Vec<HostPoint>,
}

impl HostCurve {
    pub fn new(points: Vec<HostPoint>) -> Self {
        Self { points }
    }
}

impl_value_spec!(HostCurve => ValueKind::HostCurve);

/// Número del host: payload JSON plano con kind `HostNumber` (magnitud en
/// mm).
pub fn host_number(mm: f64) -> Value {
    Value::new(ValueKind::HostNumber, json!(mm))
}
