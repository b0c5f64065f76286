//! Infraestructura opcional de tipado fuerte sobre `Value` manteniendo el
//! núcleo agnóstico. No introduce semántica de dominio; se basa en generics y
//! serde. Los crates de dominio y de host implementan `ValueSpec` para sus
//! tipos concretos.

use serde::{de::DeserializeOwned, Serialize};

use super::{Value, ValueKind};
use crate::errors::CoreActionError;

/// Errores posibles al decodificar un valor tipado.
#[derive(Debug)]
pub enum ValueDecodeError {
    KindMismatch { expected: ValueKind, found: ValueKind },
    Deserialize(String),
}

impl From<ValueDecodeError> for CoreActionError {
    fn from(e: ValueDecodeError) -> Self {
        match e {
            ValueDecodeError::KindMismatch { expected, found } => {
                CoreActionError::Decode(format!("kind mismatch: expected {expected:?}, found {found:?}"))
            }
            ValueDecodeError::Deserialize(msg) => CoreActionError::Decode(msg),
        }
    }
}

/// Especificación abstracta de un valor tipado.
/// Implementado por tipos que quieren cruzar la frontera host ↔ acción.
pub trait ValueSpec: Sized + Serialize + DeserializeOwned + Clone {
    /// Kind asociado (permite distinguir en runtime).
    const KIND: ValueKind;

    /// Serializa a `Value` neutral.
    fn into_value(self) -> Value {
        let payload = serde_json::to_value(&self).expect("serialize value spec");
        Value::new(Self::KIND, payload)
    }

    /// Decodifica desde un valor neutro verificando kind (acepta subkinds
    /// asignables). Sobreescribible para decodificación laxa, p.ej. un tipo
    /// suma que acepta los payloads de sus variantes.
    fn from_value(v: &Value) -> Result<Self, ValueDecodeError> {
        if !v.kind.is_assignable_to(Self::KIND) {
            return Err(ValueDecodeError::KindMismatch { expected: Self::KIND, found: v.kind });
        }
        serde_json::from_value(v.payload.clone()).map_err(|e| ValueDecodeError::Deserialize(e.to_string()))
    }
}

impl ValueSpec for f64 {
    const KIND: ValueKind = ValueKind::Number;
}

impl ValueSpec for String {
    const KIND: ValueKind = ValueKind::Text;
}

impl ValueSpec for bool {
    const KIND: ValueKind = ValueKind::Flag;
}

/// Declara `ValueSpec` para un struct serde plano con kind fijo.
///
/// Uso: `impl_value_spec!(Vector => ValueKind::Vector);`
#[macro_export]
macro_rules! impl_value_spec {
    ($ty:ty => $kind:expr) => {
        impl $crate::model::ValueSpec for $ty {
            const KIND: $crate::model::ValueKind = $kind;
        }
    };
}
