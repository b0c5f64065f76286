use trazo_adapters::{BasicToolsPlugin, DomainToHost, HostToDomain};
use trazo_core::model::ValueSpec;
use trazo_core::{ActionRuntime, CollectingDiagnostics, ConversionMode, CoreActionError, ExecutionInfo, HostAccess,
                 HostDocument, InMemoryEventStore, MapDataSource, MemoryDataSink, MemoryDocument, Severity, SolveStatus, Value};
use trazo_geom::{Line, Vector};

fn build_runtime() -> ActionRuntime<InMemoryEventStore> {
    // TRAZO_CONVERSION_MODE=strict endurece el registro; cualquier otro valor
    // (o ninguno) deja el modo permisivo histórico.
    let mode = match std::env::var("TRAZO_CONVERSION_MODE").as_deref() {
        Ok("strict") => ConversionMode::Strict,
        _ => ConversionMode::Permissive,
    };
    ActionRuntime::builder().load_module(&BasicToolsPlugin)
                            .converters(&HostToDomain)
                            .converters(&DomainToHost)
                            .conversion_mode(mode)
                            .build()
}

/// Literales de valor aceptados en `--set Name=value`:
/// número, `true`/`false`, `x,y,z` (punto) y `x1,y1,z1;x2,y2,z2` (línea).
/// Todo lo demás es texto. Unidades del dominio (metros).
fn parse_value_literal(raw: &str) -> Value {
    if raw == "true" || raw == "false" {
        return Value::flag(raw == "true");
    }
    if let Ok(n) = raw.parse::<f64>() {
        return Value::number(n);
    }
    if let Some(line) = parse_line(raw) {
        return line.into_value();
    }
    if let Some(point) = parse_point(raw) {
        return point.into_value();
    }
    Value::text(raw)
}

fn parse_point(raw: &str) -> Option<Vector> {
    let coords: Vec<f64> = raw.split(',').map(|c| c.trim().parse::<f64>()).collect::<Result<_, _>>().ok()?;
    if coords.len() != 3 {
        return None;
    }
    Some(Vector::new(coords[0], coords[1], coords[2]))
}

fn parse_line(raw: &str) -> Option<Line> {
    let (a, b) = raw.split_once(';')?;
    Some(Line::new(parse_point(a)?, parse_point(b)?))
}

fn print_commands(runtime: &ActionRuntime<InMemoryEventStore>) {
    println!("runtime {}", trazo_core::constants::RUNTIME_VERSION);
    for command in runtime.actions().commands() {
        let registration = match runtime.actions().resolve(&command) {
            Ok(r) => r,
            Err(_) => continue,
        };
        let d = registration.descriptor;
        println!("{} - {}", d.command, d.description);
        for input in d.inputs_by_ordinal() {
            let mut flags = Vec::new();
            if !input.required {
                flags.push("optional");
            }
            if input.persistent {
                flags.push("persistent");
            }
            let flags = if flags.is_empty() { String::new() } else { format!(" [{}]", flags.join(", ")) };
            println!("  in  {} ({}) {:?}{}", input.name, input.short_name, input.kind, flags);
        }
        for output in d.outputs_by_ordinal() {
            println!("  out {} ({}) {:?}", output.name, output.short_name, output.kind);
        }
    }
}

fn run_solve(command: &str, invocation: &str, sets: Vec<(String, String)>, show_events: bool) -> i32 {
    let mut runtime = build_runtime();

    let mut source = MapDataSource::new();
    for (name, literal) in sets {
        source.insert(name, parse_value_literal(&literal));
    }
    let mut sink = MemoryDataSink::new();
    let mut document = MemoryDocument::new();
    let mut diagnostics = CollectingDiagnostics::new();

    let result = runtime.solve(command,
                               ExecutionInfo::new(invocation, 0),
                               HostAccess { source: &mut source,
                                            sink: &mut sink,
                                            document: &mut document,
                                            diagnostics: &mut diagnostics });

    for record in diagnostics.entries() {
        let tag = match record.severity {
            Severity::Info => "info",
            Severity::Warning => "warn",
            Severity::Error => "error",
        };
        eprintln!("[{tag}] {}", record.message);
    }

    let report = match result {
        Ok(r) => r,
        Err(CoreActionError::UnknownCommand(cmd)) => {
            eprintln!("[trazo solve] comando no encontrado: {cmd}");
            return 4;
        }
        Err(e) => {
            eprintln!("[trazo solve] error: {e}");
            return 5;
        }
    };

    if show_events {
        for event in runtime.list_events_for(report.solve_id) {
            match serde_json::to_string(&event) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("[trazo solve] evento no serializable: {e}"),
            }
        }
    }

    match report.status {
        SolveStatus::Completed => {
            println!("solve completo: {} salidas, {} objetos vivos", report.published, document.live_count());
            for name in sink.names() {
                if let Some(value) = sink.get(name) {
                    println!("  {} ({:?}) = {}", name, value.kind, value.payload);
                }
            }
            0
        }
        SolveStatus::MissingInput(name) => {
            eprintln!("[trazo solve] input requerido sin valor: {name}");
            4
        }
        SolveStatus::StageFailed(stage) => {
            eprintln!("[trazo solve] etapa cortada: {stage}");
            4
        }
    }
}

fn main() {
    // Cargar .env si existe (TRAZO_CONVERSION_MODE)
    let _ = dotenvy::dotenv();
    let args: Vec<String> = std::env::args().collect();

    if args.len() >= 2 && args[1] == "commands" {
        print_commands(&build_runtime());
        return;
    }

    if args.len() >= 3 && args[1] == "solve" {
        let command = args[2].clone();
        let mut invocation = "cli".to_string();
        let mut sets: Vec<(String, String)> = Vec::new();
        let mut show_events = false;
        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--invocation" => {
                    i += 1;
                    if i < args.len() {
                        invocation = args[i].clone();
                    }
                }
                "--set" => {
                    i += 1;
                    if i < args.len() {
                        match args[i].split_once('=') {
                            Some((name, literal)) => sets.push((name.to_string(), literal.to_string())),
                            None => {
                                eprintln!("Uso: --set Nombre=valor");
                                std::process::exit(2);
                            }
                        }
                    }
                }
                "--events" => show_events = true,
                _ => {}
            }
            i += 1;
        }
        std::process::exit(run_solve(&command, &invocation, sets, show_events));
    }

    eprintln!("Uso: trazo commands | trazo solve <comando> [--invocation ID] [--set Nombre=valor ...] [--events]");
    std::process::exit(2);
}
