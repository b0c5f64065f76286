//! Demo de punta a punta: plugin básico + host en memoria.
//!
//! Dibuja un elemento lineal desde una línea del host (mm), lo re-ejecuta
//! para mostrar la idempotencia del documento y deja el log de eventos en
//! stdout.

use trazo_core::model::ValueSpec;
use trazo_core::{ActionRuntime, CollectingDiagnostics, ExecutionInfo, HostAccess, HostDocument, MapDataSource,
                 MemoryDataSink, MemoryDocument};

use trazo_adapters::{BasicToolsPlugin, DomainToHost, HostLine, HostPoint, HostToDomain};

fn main() {
    let mut runtime = ActionRuntime::builder().load_module(&BasicToolsPlugin)
                                              .converters(&HostToDomain)
                                              .converters(&DomainToHost)
                                              .build();

    println!("comandos registrados:");
    for command in runtime.actions().commands() {
        println!("  {command}");
    }

    let mut source = MapDataSource::new();
    source.insert("Line",
                  HostLine::new(HostPoint::new(0.0, 0.0, 0.0), HostPoint::new(2500.0, 0.0, 0.0)).into_value());
    let mut sink = MemoryDataSink::new();
    let mut document = MemoryDocument::new();
    let mut diagnostics = CollectingDiagnostics::new();

    for iteration in 0..2u32 {
        let report = runtime.solve("DrawLinearElement",
                                   ExecutionInfo::new("demo-component", iteration),
                                   HostAccess { source: &mut source,
                                                sink: &mut sink,
                                                document: &mut document,
                                                diagnostics: &mut diagnostics });
        match report {
            Ok(report) => {
                println!("\nsolve #{iteration}: {:?} ({} salidas, {} objetos vivos)",
                         report.status,
                         report.published,
                         document.live_count());
                for event in runtime.list_events_for(report.solve_id) {
                    println!("  [{}] {:?}", event.seq, event.kind);
                }
            }
            Err(e) => {
                eprintln!("solve #{iteration} falló: {e}");
                std::process::exit(5);
            }
        }
    }

    for name in sink.names() {
        if let Some(value) = sink.get(name) {
            println!("\nsalida {} ({:?}): {}", name, value.kind, value.payload);
        }
    }
}
