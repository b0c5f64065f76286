//! Cortes de etapa, fallos de decodificación y orden de la limpieza
//! diferida, observados a través de una acción sonda.

use trazo_core::model::{ActionContext, Value, ValueKind};
use trazo_core::{action, ActionRegistration, ActionRuntime, ActionStages, CollectingDiagnostics, ConversionMode,
                 CoreActionError, ExecutionInfo, HostAccess, InMemoryEventStore, InputDescriptor, MapDataSource,
                 MemoryDataSink, MemoryDocument, OutputDescriptor, PluginModule, Severity, SolveEventKind,
                 SolveStatus, Stage};

// Sonda: el input "Mode" decide qué etapa corta; cada etapa deja rastro en
// los diagnósticos.
action! {
    action StageProbeAction {
        command: "StageProbe",
        description: "probe for lifecycle behavior",
        fields { echo: Option<String> },
        inputs {
            mode["Mode"]: String = InputDescriptor::new(1, "Mode", ValueKind::Text, "stage control"),
        },
        outputs {
            "Echo" => OutputDescriptor::new(1, "Echo", ValueKind::Text, "echoes the mode"),
                get(this) { this.echo.clone().map(Value::text) }
        }
    }
}

impl ActionStages for StageProbeAction {
    fn pre_execution(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        ctx.diagnostics.report(Severity::Info, format!("pre:{}", ctx.info.iteration));
        self.mode.as_deref() != Some("halt-pre")
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, CoreActionError> {
        ctx.diagnostics.report(Severity::Info, format!("exec:{}", ctx.info.iteration));
        let mode = self.mode.clone().ok_or_else(|| CoreActionError::Internal("Mode sin vincular".into()))?;
        if mode == "halt-exec" {
            return Ok(false);
        }
        if mode == "fault" {
            return Err(CoreActionError::ExecuteFault("probe fault".into()));
        }
        self.echo = Some(mode);
        Ok(true)
    }

    fn post_execution(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        ctx.diagnostics.report(Severity::Info, format!("post:{}", ctx.info.iteration));
        self.mode.as_deref() != Some("halt-post")
    }

    fn final_operations(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.diagnostics.report(Severity::Info, format!("final:{}", ctx.info.iteration));
    }
}

struct ProbePlugin;

impl PluginModule for ProbePlugin {
    fn name(&self) -> &str {
        "probe"
    }

    fn register_actions(&self) -> Vec<ActionRegistration> {
        vec![StageProbeAction::registration()]
    }
}

fn solve_mode(runtime: &mut ActionRuntime<InMemoryEventStore>,
              mode_value: Value,
              iteration: u32)
              -> (Result<trazo_core::SolveReport, CoreActionError>, MemoryDataSink, CollectingDiagnostics) {
    let mut source = MapDataSource::new().with("Mode", mode_value);
    let mut sink = MemoryDataSink::new();
    let mut document = MemoryDocument::new();
    let mut diagnostics = CollectingDiagnostics::new();
    let result = runtime.solve("StageProbe",
                               ExecutionInfo::new("probe-1", iteration),
                               HostAccess { source: &mut source,
                                            sink: &mut sink,
                                            document: &mut document,
                                            diagnostics: &mut diagnostics });
    (result, sink, diagnostics)
}

fn messages(diagnostics: &CollectingDiagnostics) -> Vec<String> {
    diagnostics.entries().iter().map(|e| e.message.clone()).collect()
}

#[test]
fn pre_execution_false_halts_before_execute() {
    let mut rt = ActionRuntime::builder().load_module(&ProbePlugin).build();
    let (result, sink, diagnostics) = solve_mode(&mut rt, Value::text("halt-pre"), 0);

    let report = result.expect("halt is not a fault");
    assert_eq!(report.status, SolveStatus::StageFailed(Stage::PreExecution));
    assert!(sink.is_empty());
    assert_eq!(messages(&diagnostics), vec!["pre:0"]);

    let events = rt.list_events_for(report.solve_id);
    assert!(events.iter()
                  .any(|e| matches!(e.kind, SolveEventKind::StageFailed { stage: Stage::PreExecution })));
    assert!(!events.iter().any(|e| matches!(e.kind, SolveEventKind::SolveCompleted { .. })));
}

#[test]
fn post_execution_false_discards_computed_outputs() {
    let mut rt = ActionRuntime::builder().load_module(&ProbePlugin).build();
    let (result, sink, diagnostics) = solve_mode(&mut rt, Value::text("halt-post"), 0);

    let report = result.expect("halt is not a fault");
    assert_eq!(report.status, SolveStatus::StageFailed(Stage::PostExecution));
    assert_eq!(report.published, 0);
    assert!(sink.is_empty());
    assert_eq!(messages(&diagnostics), vec!["pre:0", "exec:0", "post:0"]);
}

#[test]
fn cleanup_runs_on_previous_instance_with_its_own_info() {
    let mut rt = ActionRuntime::builder().load_module(&ProbePlugin).build();

    let (first, _, first_diags) = solve_mode(&mut rt, Value::text("ok"), 0);
    assert_eq!(first.unwrap().status, SolveStatus::Completed);
    // primer solve de la invocación: todavía no hay instancia previa
    assert!(!messages(&first_diags).iter().any(|m| m.starts_with("final")));

    let (second, _, second_diags) = solve_mode(&mut rt, Value::text("ok"), 1);
    let second = second.unwrap();
    assert_eq!(second.status, SolveStatus::Completed);
    // la limpieza corre sobre la instancia del solve 0, con su info original
    assert!(messages(&second_diags).contains(&"final:0".to_string()));

    let events = rt.list_events_for(second.solve_id);
    assert!(events.iter().any(|e| matches!(e.kind, SolveEventKind::CleanupInvoked { .. })));
}

#[test]
fn faulted_instance_is_never_recorded_for_cleanup() {
    let mut rt = ActionRuntime::builder().load_module(&ProbePlugin).build();

    let (first, _, _) = solve_mode(&mut rt, Value::text("ok"), 0);
    assert_eq!(first.unwrap().status, SolveStatus::Completed);

    let (second, _, _) = solve_mode(&mut rt, Value::text("fault"), 1);
    assert!(matches!(second.unwrap_err(), CoreActionError::ExecuteFault(_)));

    // la instancia fallida no reemplazó a la exitosa: la limpieza del tercer
    // solve sigue apuntando a la instancia del solve 0
    let (third, _, third_diags) = solve_mode(&mut rt, Value::text("ok"), 2);
    assert_eq!(third.unwrap().status, SolveStatus::Completed);
    assert!(messages(&third_diags).contains(&"final:0".to_string()));
    assert!(!messages(&third_diags).contains(&"final:1".to_string()));
}

#[test]
fn permissive_pass_through_fails_typed_decode_and_aborts() {
    // sin convertidor Number→Text el valor pasa sin cambios y el decode
    // tipado del slot requerido lo rechaza
    let mut rt = ActionRuntime::builder().load_module(&ProbePlugin).build();
    let (result, sink, diagnostics) = solve_mode(&mut rt, Value::number(7.0), 0);

    let report = result.expect("binding failures do not escape");
    assert_eq!(report.status, SolveStatus::MissingInput("Mode".to_string()));
    assert!(sink.is_empty());
    assert!(messages(&diagnostics).iter().any(|m| m.contains("Mode")));
}

#[test]
fn strict_mode_downgrades_unconvertible_input_to_missing() {
    let mut rt = ActionRuntime::builder().load_module(&ProbePlugin)
                                         .conversion_mode(ConversionMode::Strict)
                                         .build();
    let (result, _, diagnostics) = solve_mode(&mut rt, Value::number(7.0), 0);

    let report = result.expect("conversion failures do not escape");
    assert_eq!(report.status, SolveStatus::MissingInput("Mode".to_string()));
    assert!(diagnostics.entries()
                       .iter()
                       .any(|e| e.severity == Severity::Warning && e.message.contains("conversion not supported")));
}
