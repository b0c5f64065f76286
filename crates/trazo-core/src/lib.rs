//! trazo-core: runtime de acciones agnóstico del host (A1)
pub mod action;
pub mod constants;
pub mod convert;
pub mod errors;
pub mod event;
pub mod host;
pub mod model;
pub mod runtime;
pub mod shortname;

pub use action::{Action, ActionBinding, ActionDescriptor, ActionRegistration, ActionRegistry, ActionStages,
                 InputDescriptor, OutputDescriptor, PluginModule, Stage};
pub use convert::{ConversionMode, ConversionRegistry, ConverterEntry, ConverterSource};
pub use errors::CoreActionError;
pub use event::{EventStore, InMemoryEventStore, SolveEvent, SolveEventKind};
pub use host::{CollectingDiagnostics, DiagnosticsSink, HostDataSink, HostDataSource, HostDocument, MapDataSource,
               MemoryDataSink, MemoryDocument, Severity};
pub use model::{ActionContext, ExecutionInfo, Value, ValueKind, ValueSpec};
pub use runtime::{ActionRuntime, HostAccess, RuntimeBuilder, SolveReport, SolveStatus};
pub use shortname::derive_short_name;

// Las macros `action!` e `impl_value_spec!` se exportan en la raíz vía
// #[macro_export].

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action;

    // Acción mínima declarada con la macro: suma dos números.
    action! {
        action AddNumbersAction {
            command: "AddNumbers",
            description: "adds two numbers",
            fields { sum: Option<f64> },
            inputs {
                a["A"]: f64 = InputDescriptor::new(1, "A", ValueKind::Number, "first operand"),
                b["B"]: f64 = InputDescriptor::new(2, "B", ValueKind::Number, "second operand"),
            },
            outputs {
                "Sum" => OutputDescriptor::new(1, "Sum", ValueKind::Number, "the sum"),
                    get(this) { this.sum.map(Value::number) }
            }
        }
    }

    impl ActionStages for AddNumbersAction {
        fn execute(&mut self, _ctx: &mut ActionContext<'_>) -> Result<bool, CoreActionError> {
            let a = self.a.ok_or_else(|| CoreActionError::Internal("A sin vincular".into()))?;
            let b = self.b.ok_or_else(|| CoreActionError::Internal("B sin vincular".into()))?;
            self.sum = Some(a + b);
            Ok(true)
        }
    }

    struct TestPlugin;

    impl PluginModule for TestPlugin {
        fn name(&self) -> &str {
            "test-plugin"
        }

        fn register_actions(&self) -> Vec<ActionRegistration> {
            vec![AddNumbersAction::registration()]
        }
    }

    fn solve_once(runtime: &mut ActionRuntime<InMemoryEventStore>,
                  source: &mut MapDataSource)
                  -> (SolveReport, MemoryDataSink, CollectingDiagnostics) {
        let mut sink = MemoryDataSink::new();
        let mut document = MemoryDocument::new();
        let mut diagnostics = CollectingDiagnostics::new();
        let report = runtime.solve("AddNumbers",
                                   ExecutionInfo::new("cmp-1", 0),
                                   HostAccess { source: source,
                                                sink: &mut sink,
                                                document: &mut document,
                                                diagnostics: &mut diagnostics })
                            .expect("solve should not fault");
        (report, sink, diagnostics)
    }

    #[test]
    fn macro_descriptor_is_static_and_ordered() {
        let d = AddNumbersAction::action_descriptor();
        assert_eq!(d.command, "AddNumbers");
        let names: Vec<&str> = d.inputs_by_ordinal().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(d.inputs[0].short_name, "A");
        // misma dirección en llamadas sucesivas
        assert!(std::ptr::eq(d, AddNumbersAction::action_descriptor()));
    }

    #[test]
    fn full_solve_publishes_outputs_and_events() {
        let mut runtime = ActionRuntime::builder().load_module(&TestPlugin).build();
        let mut source = MapDataSource::new().with("A", Value::number(2.0)).with("B", Value::number(3.0));

        let (report, sink, diagnostics) = solve_once(&mut runtime, &mut source);

        assert_eq!(report.status, SolveStatus::Completed);
        assert_eq!(report.published, 1);
        assert_eq!(sink.get("Sum").map(|v| v.payload.as_f64()), Some(Some(5.0)));
        assert!(diagnostics.is_empty());

        let events = runtime.list_events_for(report.solve_id);
        assert!(matches!(events.first().map(|e| &e.kind), Some(SolveEventKind::SolveStarted { .. })));
        assert!(events.iter().any(|e| matches!(e.kind, SolveEventKind::OutputsPublished { count: 1 })));
        assert!(matches!(events.last().map(|e| &e.kind), Some(SolveEventKind::SolveCompleted { .. })));
    }

    #[test]
    fn missing_required_input_aborts_without_outputs() {
        let mut runtime = ActionRuntime::builder().load_module(&TestPlugin).build();
        let mut source = MapDataSource::new().with("A", Value::number(2.0));

        let (report, sink, diagnostics) = solve_once(&mut runtime, &mut source);

        assert_eq!(report.status, SolveStatus::MissingInput("B".to_string()));
        assert_eq!(report.published, 0);
        assert!(sink.is_empty());
        assert!(diagnostics.has_errors());

        let events = runtime.list_events_for(report.solve_id);
        assert!(events.iter()
                      .any(|e| matches!(&e.kind, SolveEventKind::InputMissing { input, required: true } if input == "B")));
        assert!(!events.iter().any(|e| matches!(e.kind, SolveEventKind::OutputsPublished { .. })));
    }

    #[test]
    fn unknown_command_propagates() {
        let mut runtime = ActionRuntime::builder().build();
        let mut source = MapDataSource::new();
        let mut sink = MemoryDataSink::new();
        let mut document = MemoryDocument::new();
        let mut diagnostics = CollectingDiagnostics::new();

        let err = runtime.solve("NoSuchCommand",
                                ExecutionInfo::new("cmp-1", 0),
                                HostAccess { source: &mut source,
                                             sink: &mut sink,
                                             document: &mut document,
                                             diagnostics: &mut diagnostics })
                         .unwrap_err();
        assert_eq!(err, CoreActionError::UnknownCommand("NoSuchCommand".to_string()));
    }

    #[test]
    fn reregistering_a_command_overwrites() {
        let registry = ActionRegistry::new();
        assert!(registry.register(AddNumbersAction::registration()).is_none());
        assert!(registry.register(AddNumbersAction::registration()).is_some());
        assert_eq!(registry.len(), 1);
    }
}
