//! Curvas del dominio: líneas, polilíneas y la suma `Curve`.

use serde::{Deserialize, Serialize};

use trazo_core::model::{Value, ValueDecodeError, ValueKind, ValueSpec};
use trazo_core::impl_value_spec;

use crate::vector::Vector;

/// Segmento recto entre dos puntos. Puede ser degenerado (longitud cero);
/// son las acciones las que deciden si eso corta su ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Vector,
    pub end: Vector,
}

impl Line {
    pub fn new(start: Vector, end: Vector) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn approx_eq(&self, other: &Line, tol: f64) -> bool {
        self.start.approx_eq(&other.start, tol) && self.end.approx_eq(&other.end, tol)
    }
}

impl_value_spec!(Line => ValueKind::Line);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Vector>,
}

impl Polyline {
    pub fn new(points: Vec<Vector>) -> Self {
        Self { points }
    }

    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
    }

    pub fn is_closed(&self, tol: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => self.points.len() > 2 && a.approx_eq(b, tol),
            _ => false,
        }
    }

    pub fn approx_eq(&self, other: &Polyline, tol: f64) -> bool {
        self.points.len() == other.points.len()
        && self.points.iter().zip(&other.points).all(|(a, b)| a.approx_eq(b, tol))
    }
}

impl_value_spec!(Polyline => ValueKind::Polyline);

/// Curva del dominio: hoy línea o polilínea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curve {
    Line(Line),
    Polyline(Polyline),
}

impl Curve {
    pub fn length(&self) -> f64 {
        match self {
            Curve::Line(l) => l.length(),
            Curve::Polyline(p) => p.length(),
        }
    }

    pub fn approx_eq(&self, other: &Curve, tol: f64) -> bool {
        match (self, other) {
            (Curve::Line(a), Curve::Line(b)) => a.approx_eq(b, tol),
            (Curve::Polyline(a), Curve::Polyline(b)) => a.approx_eq(b, tol),
            _ => false,
        }
    }
}

impl From<Line> for Curve {
    fn from(l: Line) -> Self {
        Curve::Line(l)
    }
}

impl From<Polyline> for Curve {
    fn from(p: Polyline) -> Self {
        Curve::Polyline(p)
    }
}

impl ValueSpec for Curve {
    const KIND: ValueKind = ValueKind::Curve;

    /// Decodificación laxa: un slot `Curve` acepta también payloads con kind
    /// `Line` o `Polyline` (los subkinds asignables llegan con su payload
    /// propio, no con el de la suma).
    fn from_value(v: &Value) -> Result<Self, ValueDecodeError> {
        match v.kind {
            ValueKind::Curve => {
                serde_json::from_value(v.payload.clone()).map_err(|e| ValueDecodeError::Deserialize(e.to_string()))
            }
            ValueKind::Line => Line::from_value(v).map(Curve::Line),
            ValueKind::Polyline => Polyline::from_value(v).map(Curve::Polyline),
            found => Err(ValueDecodeError::KindMismatch { expected: ValueKind::Curve, found }),
        }
    }
}
