//! Registro de conversiones entre los dos universos de tipos.

mod registry;
mod source;

pub use registry::{ConversionMode, ConversionRegistry, ConvertFn, ConverterEntry};
pub use source::ConverterSource;
