//! Perfiles de sección, en metros.

use serde::{Deserialize, Serialize};

use crate::curve::{Curve, Polyline};
use crate::error::DomainError;
use crate::vector::Vector;

const CIRCLE_SEGMENTS: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SectionProfile {
    Rectangular { depth: f64, width: f64 },
    Circular { diameter: f64 },
}

impl SectionProfile {
    pub fn rectangular(depth: f64, width: f64) -> Result<Self, DomainError> {
        if depth <= 0.0 || width <= 0.0 {
            return Err(DomainError::ValidationError(format!(
                "rectangular profile requires positive dimensions (depth={depth}, width={width})"
            )));
        }
        Ok(SectionProfile::Rectangular { depth, width })
    }

    pub fn circular(diameter: f64) -> Result<Self, DomainError> {
        if diameter <= 0.0 {
            return Err(DomainError::ValidationError(format!(
                "circular profile requires a positive diameter (diameter={diameter})"
            )));
        }
        Ok(SectionProfile::Circular { diameter })
    }

    /// Curva cerrada del contorno, centrada en el origen del plano local.
    /// Los círculos se aproximan por polilínea.
    pub fn perimeter(&self) -> Curve {
        match self {
            SectionProfile::Rectangular { depth, width } => {
                let hw = width / 2.0;
                let hd = depth / 2.0;
                Curve::Polyline(Polyline::new(vec![Vector::new(-hw, -hd, 0.0),
                                                   Vector::new(hw, -hd, 0.0),
                                                   Vector::new(hw, hd, 0.0),
                                                   Vector::new(-hw, hd, 0.0),
                                                   Vector::new(-hw, -hd, 0.0)]))
            }
            SectionProfile::Circular { diameter } => {
                let r = diameter / 2.0;
                let mut points: Vec<Vector> = (0..CIRCLE_SEGMENTS).map(|i| {
                                                  let t = (i as f64) / (CIRCLE_SEGMENTS as f64)
                                                          * std::f64::consts::TAU;
                                                  Vector::new(r * t.cos(), r * t.sin(), 0.0)
                                              })
                                              .collect();
                points.push(points[0]);
                Curve::Polyline(Polyline::new(points))
            }
        }
    }
}
