//! Conjuntos de convertidores entre los dos universos.
//!
//! `HostToDomain` y `DomainToHost` son pares inversos: para toda entrada
//! `(a, b)` de uno existe la `(b, a)` del otro y componerlas devuelve el
//! valor original bajo igualdad del dominio (las unidades escalan mm ⇄ m en
//! cada cruce).

use trazo_core::model::{Value, ValueKind, ValueSpec};
use trazo_core::{ConverterEntry, ConverterSource, CoreActionError};

use trazo_geom::{Curve, Line, Polyline, Vector};

use crate::host_geometry::{host_number, HostCurve, HostLine, HostPoint, MM_PER_M};

fn decode<T: ValueSpec>(v: &Value) -> Result<T, CoreActionError> {
    T::from_value(v).map_err(CoreActionError::from)
}

// ---------------- host → dominio ----------------

fn host_number_to_number(v: &Value) -> Result<Value, CoreActionError> {
    let mm = v.payload
              .as_f64()
              .ok_or_else(|| CoreActionError::Decode("HostNumber payload is not numeric".into()))?;
    Ok(Value::number(mm / MM_PER_M))
}

fn host_point_to_vector(v: &Value) -> Result<Value, CoreActionError> {
    let p: HostPoint = decode(v)?;
    Ok(p.to_vector().into_value())
}

fn host_line_to_line(v: &Value) -> Result<Value, CoreActionError> {
    let l: HostLine = decode(v)?;
    Ok(Line::new(l.from.to_vector(), l.to.to_vector()).into_value())
}

fn host_line_to_curve(v: &Value) -> Result<Value, CoreActionError> {
    let l: HostLine = decode(v)?;
    Ok(Curve::Line(Line::new(l.from.to_vector(), l.to.to_vector())).into_value())
}

/// Dos puntos vuelven como `Line`; más, como `Polyline`. Así una línea del
/// dominio sobrevive el viaje de ida y vuelta por el host.
fn host_curve_to_curve(v: &Value) -> Result<Value, CoreActionError> {
    let c: HostCurve = decode(v)?;
    let points: Vec<Vector> = c.points.iter().map(HostPoint::to_vector).collect();
    let curve = if points.len() == 2 {
        Curve::Line(Line::new(points[0], points[1]))
    } else {
        Curve::Polyline(Polyline::new(points))
    };
    Ok(curve.into_value())
}

fn host_curve_to_polyline(v: &Value) -> Result<Value, CoreActionError> {
    let c: HostCurve = decode(v)?;
    Ok(Polyline::new(c.points.iter().map(HostPoint::to_vector).collect()).into_value())
}

// ---------------- dominio → host ----------------

fn number_to_host_number(v: &Value) -> Result<Value, CoreActionError> {
    let m = v.payload
             .as_f64()
             .ok_or_else(|| CoreActionError::Decode("Number payload is not numeric".into()))?;
    Ok(host_number(m * MM_PER_M))
}

fn vector_to_host_point(v: &Value) -> Result<Value, CoreActionError> {
    let p: Vector = decode(v)?;
    Ok(HostPoint::from_vector(&p).into_value())
}

fn line_to_host_line(v: &Value) -> Result<Value, CoreActionError> {
    let l: Line = decode(v)?;
    Ok(HostLine::new(HostPoint::from_vector(&l.start), HostPoint::from_vector(&l.end)).into_value())
}

fn polyline_to_host_curve(v: &Value) -> Result<Value, CoreActionError> {
    let p: Polyline = decode(v)?;
    Ok(HostCurve::new(p.points.iter().map(HostPoint::from_vector).collect()).into_value())
}

/// Acepta payloads `Curve`, `Line` o `Polyline` (decodificación laxa del
/// dominio): es la entrada que usa el fallback por ancestro.
fn curve_to_host_curve(v: &Value) -> Result<Value, CoreActionError> {
    let c: Curve = Curve::from_value(v).map_err(CoreActionError::from)?;
    let points = match c {
        Curve::Line(l) => vec![HostPoint::from_vector(&l.start), HostPoint::from_vector(&l.end)],
        Curve::Polyline(p) => p.points.iter().map(HostPoint::from_vector).collect(),
    };
    Ok(HostCurve::new(points).into_value())
}

/// Convertidores host → dominio (lo que el binding usa al leer entradas).
pub struct HostToDomain;

impl ConverterSource for HostToDomain {
    fn name(&self) -> &str {
        "host-to-domain"
    }

    fn converters(&self) -> Vec<ConverterEntry> {
        vec![ConverterEntry::new(ValueKind::HostNumber, ValueKind::Number, host_number_to_number),
             ConverterEntry::new(ValueKind::HostPoint, ValueKind::Vector, host_point_to_vector),
             ConverterEntry::new(ValueKind::HostLine, ValueKind::Line, host_line_to_line),
             ConverterEntry::new(ValueKind::HostLine, ValueKind::Curve, host_line_to_curve),
             ConverterEntry::new(ValueKind::HostCurve, ValueKind::Curve, host_curve_to_curve),
             ConverterEntry::new(ValueKind::HostCurve, ValueKind::Polyline, host_curve_to_polyline)]
    }
}

/// Convertidores dominio → host (lo que la publicación usa al empujar
/// salidas).
pub struct DomainToHost;

impl ConverterSource for DomainToHost {
    fn name(&self) -> &str {
        "domain-to-host"
    }

    fn converters(&self) -> Vec<ConverterEntry> {
        vec![ConverterEntry::new(ValueKind::Number, ValueKind::HostNumber, number_to_host_number),
             ConverterEntry::new(ValueKind::Vector, ValueKind::HostPoint, vector_to_host_point),
             ConverterEntry::new(ValueKind::Line, ValueKind::HostLine, line_to_host_line),
             ConverterEntry::new(ValueKind::Polyline, ValueKind::HostCurve, polyline_to_host_curve),
             ConverterEntry::new(ValueKind::Curve, ValueKind::HostCurve, curve_to_host_curve)]
    }
}
