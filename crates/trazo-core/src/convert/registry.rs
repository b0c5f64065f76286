//! Tabla de conversiones `(kind origen, kind destino) -> fn`.
//!
//! Rol en el solve:
//! - El binding de entradas la consulta cuando el kind entregado por el host
//!   no coincide con el kind declarado por el slot.
//! - La publicación de salidas la consulta en sentido inverso (dominio →
//!   host) antes de empujar al sink.
//!
//! Inmutable tras la carga: los lookups toman `&self` y pueden compartirse.

use std::collections::HashMap;

use crate::errors::CoreActionError;
use crate::model::{Value, ValueKind};

use super::ConverterSource;

/// Firma de un convertidor: puro, sin estado, sin acceso al host.
pub type ConvertFn = fn(&Value) -> Result<Value, CoreActionError>;

/// Una conversión declarada por un `ConverterSource`.
#[derive(Clone, Copy)]
pub struct ConverterEntry {
    pub source: ValueKind,
    pub target: ValueKind,
    pub convert: ConvertFn,
}

impl ConverterEntry {
    pub fn new(source: ValueKind, target: ValueKind, convert: ConvertFn) -> Self {
        Self { source, target, convert }
    }
}

/// Qué hacer cuando no hay convertidor aplicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Devuelve el valor sin cambios (comportamiento histórico de los hosts
    /// laxos; el decode tipado aguas abajo detecta el desajuste).
    Permissive,
    /// Falla con `ConversionNotSupported`.
    Strict,
}

pub struct ConversionRegistry {
    entries: HashMap<(ValueKind, ValueKind), ConvertFn>,
    conflicts: Vec<(ValueKind, ValueKind)>,
    default_mode: ConversionMode,
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self { entries: HashMap::new(),
               conflicts: Vec::new(),
               default_mode: ConversionMode::Permissive }
    }
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ConversionMode) -> Self {
        Self { default_mode: mode, ..Self::default() }
    }

    pub fn set_default_mode(&mut self, mode: ConversionMode) {
        self.default_mode = mode;
    }

    pub fn default_mode(&self) -> ConversionMode {
        self.default_mode
    }

    /// Registra una entrada individual. La última registrada para un par
    /// `(source, target)` gana; la colisión queda anotada en `conflicts`.
    pub fn register_entry(&mut self, entry: ConverterEntry) {
        let key = (entry.source, entry.target);
        if self.entries.insert(key, entry.convert).is_some() {
            self.conflicts.push(key);
        }
    }

    /// Carga en bloque todas las entradas de un conjunto.
    pub fn register_source(&mut self, source: &dyn ConverterSource) -> usize {
        let entries = source.converters();
        let n = entries.len();
        for e in entries {
            self.register_entry(e);
        }
        n
    }

    /// Pares sobreescritos durante la carga, en orden de ocurrencia.
    pub fn conflicts(&self) -> &[(ValueKind, ValueKind)] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Busca el convertidor aplicable: entrada exacta para
    /// `(source, target)` primero, si no la del ancestro asignable más
    /// cercano de `source`.
    pub fn lookup(&self, source: ValueKind, target: ValueKind) -> Option<ConvertFn> {
        if let Some(f) = self.entries.get(&(source, target)) {
            return Some(*f);
        }
        for ancestor in source.ancestors() {
            if let Some(f) = self.entries.get(&(ancestor, target)) {
                return Some(*f);
            }
        }
        None
    }

    /// `true` si existe algún convertidor (exacto o por ancestro) para el par.
    pub fn can_convert(&self, source: ValueKind, target: ValueKind) -> bool {
        self.lookup(source, target).is_some()
    }

    /// Convierte con el modo por defecto del registro.
    pub fn convert(&self, value: &Value, target: ValueKind) -> Result<Value, CoreActionError> {
        self.convert_with(self.default_mode, value, target)
    }

    /// Convierte con modo explícito. Identidad si el kind ya coincide.
    pub fn convert_with(&self, mode: ConversionMode, value: &Value, target: ValueKind) -> Result<Value, CoreActionError> {
        if value.kind == target {
            return Ok(value.clone());
        }
        match self.lookup(value.kind, target) {
            Some(f) => f(value),
            None => match mode {
                ConversionMode::Permissive => Ok(value.clone()),
                ConversionMode::Strict => Err(CoreActionError::ConversionNotSupported { from: value.kind, to: target }),
            },
        }
    }
}
