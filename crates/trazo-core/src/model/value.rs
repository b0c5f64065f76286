//! Valor neutral del runtime.
//!
//! Un `Value` es la unidad de datos que cruza la frontera host ↔ acción. Es
//! neutral: `payload` es JSON genérico y el core no interpreta su semántica;
//! los crates tipados lo hacen vía `ValueSpec`. El `ValueKind` sí es
//! interpretado por el core: gobierna asignabilidad y la elección de
//! convertidores en el registro.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Kinds cerrados del modelo. Cubre los dos universos de tipos: el dominio
/// semántico y la representación del host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValueKind {
    // universo de dominio
    Number,
    Text,
    Flag,
    Vector,
    Line,
    Polyline,
    Curve,
    Collection,
    Material,
    Section,
    Element,
    Panel,
    // universo del host
    HostNumber,
    HostPoint,
    HostLine,
    HostCurve,
}

impl ValueKind {
    /// Padre directo en la jerarquía de asignabilidad, si existe.
    /// `Line` y `Polyline` son curvas; `HostLine` es una `HostCurve`.
    pub fn parent(self) -> Option<ValueKind> {
        match self {
            ValueKind::Line | ValueKind::Polyline => Some(ValueKind::Curve),
            ValueKind::HostLine => Some(ValueKind::HostCurve),
            _ => None,
        }
    }

    /// Cadena de ancestros, del más cercano al más lejano.
    pub fn ancestors(self) -> Vec<ValueKind> {
        let mut out = Vec::new();
        let mut cursor = self.parent();
        while let Some(k) = cursor {
            out.push(k);
            cursor = k.parent();
        }
        out
    }

    /// `true` si un valor de este kind puede ocupar un slot de `target`.
    pub fn is_assignable_to(self, target: ValueKind) -> bool {
        self == target || self.ancestors().contains(&target)
    }

    /// Kind representable por el host para un kind semántico. Los slots de
    /// entrada se piden al host con este kind; identidad para los kinds que
    /// el host ya entiende.
    pub fn host_equivalent(self) -> ValueKind {
        match self {
            ValueKind::Vector => ValueKind::HostPoint,
            ValueKind::Line => ValueKind::HostLine,
            ValueKind::Polyline | ValueKind::Curve => ValueKind::HostCurve,
            other => other,
        }
    }

    /// `true` si el kind pertenece al universo del host.
    pub fn is_host_kind(self) -> bool {
        matches!(self,
                 ValueKind::HostNumber | ValueKind::HostPoint | ValueKind::HostLine | ValueKind::HostCurve)
    }
}

/// Valor neutral consumido/producido por acciones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Value {
    pub kind: ValueKind,
    pub payload: serde_json::Value,
}

impl Value {
    pub fn new(kind: ValueKind, payload: serde_json::Value) -> Self {
        Self { kind, payload }
    }

    pub fn number(n: f64) -> Self {
        Self::new(ValueKind::Number, json!(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::new(ValueKind::Text, json!(s.into()))
    }

    pub fn flag(b: bool) -> Self {
        Self::new(ValueKind::Flag, json!(b))
    }
}
