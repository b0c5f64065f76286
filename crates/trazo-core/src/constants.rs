//! Constantes compartidas del runtime.

/// Versión lógica del runtime. Cambia solo ante cambios incompatibles en el
/// contrato observable (eventos, binding).
pub const RUNTIME_VERSION: &str = "A1";
