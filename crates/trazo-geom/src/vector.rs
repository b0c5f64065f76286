use serde::{Deserialize, Serialize};

use trazo_core::{impl_value_spec, ValueKind};

/// Punto/vector en metros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance_to(&self, other: &Vector) -> f64 {
        Vector::new(other.x - self.x, other.y - self.y, other.z - self.z).length()
    }

    /// Igualdad con tolerancia, para comparar tras conversiones de unidades.
    pub fn approx_eq(&self, other: &Vector, tol: f64) -> bool {
        self.distance_to(other) <= tol
    }
}

impl_value_spec!(Vector => ValueKind::Vector);
