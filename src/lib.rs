//! Trazo Rust Library
//!
//! Este crate actúa como fachada del workspace Trazo:
//! - Re-exporta el runtime (`trazo_core`), el dominio (`trazo_geom`) y la
//!   capa de adaptación (`trazo_adapters`).
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub use trazo_adapters as adapters;
pub use trazo_core as core;
pub use trazo_geom as geom;

pub use trazo_adapters::{BasicToolsPlugin, DomainToHost, HostToDomain};
pub use trazo_core::{ActionRuntime, ConversionMode, CoreActionError, ExecutionInfo, HostAccess, SolveReport,
                     SolveStatus};

#[cfg(test)]
mod tests {
    use super::*;
    use trazo_core::{CollectingDiagnostics, MapDataSource, MemoryDataSink, MemoryDocument, Value};

    #[test]
    fn facade_wires_a_working_runtime() {
        let mut runtime = ActionRuntime::builder().load_module(&BasicToolsPlugin)
                                                  .converters(&HostToDomain)
                                                  .converters(&DomainToHost)
                                                  .build();

        let mut source = MapDataSource::new().with("Name", Value::text("demo"))
                                             .with("Depth", Value::number(0.3))
                                             .with("Width", Value::number(0.3));
        let mut sink = MemoryDataSink::new();
        let mut document = MemoryDocument::new();
        let mut diagnostics = CollectingDiagnostics::new();

        let report = runtime.solve("CreateRectangularSection",
                                   ExecutionInfo::new("facade-demo", 0),
                                   HostAccess { source: &mut source,
                                                sink: &mut sink,
                                                document: &mut document,
                                                diagnostics: &mut diagnostics })
                            .expect("demo solve");
        assert_eq!(report.status, SolveStatus::Completed);
        assert!(sink.get("Section").is_some());
    }
}
