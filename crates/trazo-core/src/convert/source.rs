//! Fuente declarativa de convertidores.

use super::ConverterEntry;

/// Un conjunto de convertidores con nombre (una "librería" de conversión).
/// El registro los carga en bloque vía `register_source`.
pub trait ConverterSource {
    /// Nombre del conjunto, para diagnósticos.
    fn name(&self) -> &str;

    /// Entradas declaradas por el conjunto, en orden de declaración.
    fn converters(&self) -> Vec<ConverterEntry>;
}
