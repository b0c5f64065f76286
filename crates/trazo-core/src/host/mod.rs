//! Traits de capacidad del host.
//!
//! El runtime no conoce ningún host concreto: habla con cuatro colaboradores
//! abstractos (fuente de datos, sink de datos, documento y diagnósticos). Un
//! front-end real implementa estos traits sobre su API; el módulo `memory`
//! trae implementaciones en memoria para tests y demos.

mod memory;

pub use memory::{CollectingDiagnostics, DiagnosticRecord, MapDataSource, MemoryDataSink, MemoryDocument};

use crate::errors::CoreActionError;
use crate::model::{Value, ValueKind};
use uuid::Uuid;

/// De dónde lee el runtime los valores de entrada.
///
/// `kind` es el kind con el que el runtime pide el slot (el
/// `host_equivalent` del kind declarado); el host puede ignorarlo o usarlo
/// para elegir representación. `Ok(None)` significa "sin valor", que no es
/// un error: el binding decide después si el slot era obligatorio.
pub trait HostDataSource {
    fn get_value(&mut self, name: &str, kind: ValueKind) -> Result<Option<Value>, CoreActionError>;
}

/// A dónde publica el runtime los valores de salida.
pub trait HostDataSink {
    fn set_value(&mut self, name: &str, value: Value);
}

/// Servicios de documento que usan las acciones concretas (no el runtime).
///
/// Los objetos se indexan por `(invocation, slot)`: crear dos veces con la
/// misma clave reemplaza en lugar de acumular, que es lo que hace idempotente
/// re-ejecutar la misma invocación.
pub trait HostDocument {
    /// Marca el inicio de una pasada de actualización para una invocación:
    /// sus objetos quedan pendientes de refresco.
    fn begin_update(&mut self, invocation: &str);

    /// Crea o reemplaza el objeto de `(invocation, slot)`. Devuelve el id
    /// estable del objeto.
    fn create_object(&mut self, invocation: &str, slot: &str, value: Value) -> Uuid;

    /// Reemplaza por id. `false` si el id no existe.
    fn replace_object(&mut self, id: Uuid, value: Value) -> bool;

    /// Elimina por id. `false` si el id no existe.
    fn remove_object(&mut self, id: Uuid) -> bool;

    /// Elimina los objetos de la invocación no refrescados desde el último
    /// `begin_update` y devuelve cuántos cayeron. Si la pasada no refrescó
    /// ninguno (la ejecución falló antes de crear nada) no elimina nada.
    fn sweep_stale(&mut self, invocation: &str) -> usize;

    fn object(&self, id: Uuid) -> Option<Value>;

    fn live_count(&self) -> usize;
}

/// Severidad de un diagnóstico.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Canal de diagnósticos hacia el usuario del front-end.
pub trait DiagnosticsSink {
    fn report(&mut self, severity: Severity, message: String);
}
