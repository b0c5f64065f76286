//! `ActionRuntime`: conduce un solve de punta a punta.
//!
//! Orden de un solve:
//! 1. resolver el comando en el registro (`UnknownCommand` se propaga),
//! 2. binding de entradas en orden de ordinal (requerido ausente aborta),
//! 3. instanciar y asignar slots,
//! 4. pre_execution → execute → post_execution (un `false` corta en
//!    silencio; un `Err` de execute se propaga tras la limpieza),
//! 5. publicar salidas al sink (solo en éxito completo),
//! 6. SIEMPRE: `final_operations` de la instancia exitosa previa de la misma
//!    invocación, y luego registrar la actual como última exitosa si
//!    completó.

use dashmap::DashMap;
use uuid::Uuid;

use crate::action::{Action, ActionRegistry, Stage};
use crate::convert::{ConversionMode, ConversionRegistry};
use crate::errors::CoreActionError;
use crate::event::{EventStore, InMemoryEventStore, SolveEvent, SolveEventKind};
use crate::host::{DiagnosticsSink, HostDataSink, HostDataSource, HostDocument, Severity};
use crate::model::{ActionContext, ExecutionInfo, Value};

use super::binding::{self, BoundInput};
use super::RuntimeBuilder;

/// Los cuatro colaboradores del host para un solve.
pub struct HostAccess<'a> {
    pub source: &'a mut dyn HostDataSource,
    pub sink: &'a mut dyn HostDataSink,
    pub document: &'a mut dyn HostDocument,
    pub diagnostics: &'a mut dyn DiagnosticsSink,
}

/// Resultado observable de un solve que no propagó error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    Completed,
    /// Slot requerido sin valor: sin instancia, sin salidas.
    MissingInput(String),
    /// Una etapa devolvió `false`.
    StageFailed(Stage),
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub solve_id: Uuid,
    pub status: SolveStatus,
    pub published: usize,
}

struct LastExecuted {
    action: Box<dyn Action>,
    info: ExecutionInfo,
}

/// Runtime de acciones, genérico en el event store.
pub struct ActionRuntime<E: EventStore> {
    actions: ActionRegistry,
    conversions: ConversionRegistry,
    event_store: E,
    /// Última instancia exitosa por invocación; su `final_operations` corre
    /// en el solve siguiente de la misma invocación.
    last_executed: DashMap<String, LastExecuted>,
    /// Último valor usado por `(invocation, slot)` para slots persistentes.
    remembered: DashMap<(String, String), Value>,
}

impl ActionRuntime<InMemoryEventStore> {
    pub fn builder() -> RuntimeBuilder<InMemoryEventStore> {
        RuntimeBuilder::new()
    }
}

impl<E: EventStore> ActionRuntime<E> {
    pub fn with_stores(event_store: E, actions: ActionRegistry, conversions: ConversionRegistry) -> Self {
        Self { actions,
               conversions,
               event_store,
               last_executed: DashMap::new(),
               remembered: DashMap::new() }
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    pub fn conversions(&self) -> &ConversionRegistry {
        &self.conversions
    }

    pub fn list_events_for(&self, solve_id: Uuid) -> Vec<SolveEvent> {
        self.event_store.list(solve_id)
    }

    /// Ejecuta el comando contra el host dado. Solo `UnknownCommand` y los
    /// `Err` de `execute` escapan; el resto de resultados viaja en el
    /// `SolveReport`.
    pub fn solve(&mut self,
                 command: &str,
                 info: ExecutionInfo,
                 host: HostAccess<'_>)
                 -> Result<SolveReport, CoreActionError> {
        let registration = self.actions.resolve(command)?;
        let solve_id = Uuid::new_v4();
        self.event_store.append_kind(solve_id,
                                     SolveEventKind::SolveStarted { command: command.to_string(),
                                                                    invocation: info.invocation.clone(),
                                                                    iteration: info.iteration });

        let HostAccess { source, sink, document, diagnostics } = host;

        let report = binding::bind_inputs(registration.descriptor,
                                          &self.conversions,
                                          &info.invocation,
                                          &self.remembered,
                                          source,
                                          diagnostics);
        for bound in &report.inputs {
            match &bound.value {
                Some(v) => {
                    self.event_store.append_kind(solve_id,
                                                 SolveEventKind::InputBound { input: bound.name.clone(),
                                                                              kind: v.kind,
                                                                              converted: bound.converted });
                }
                None => {
                    self.event_store.append_kind(solve_id,
                                                 SolveEventKind::InputMissing { input: bound.name.clone(),
                                                                                required: false });
                }
            }
        }
        if let Some(missing) = report.missing_required {
            self.event_store.append_kind(solve_id,
                                         SolveEventKind::InputMissing { input: missing.clone(), required: true });
            diagnostics.report(Severity::Error, format!("input requerido sin valor: {missing}"));
            self.run_cleanup(solve_id, &info, document, diagnostics);
            return Ok(SolveReport { solve_id, status: SolveStatus::MissingInput(missing), published: 0 });
        }

        let mut action = registration.instantiate();
        let mut decode_abort: Option<String> = None;
        for BoundInput { name, value, .. } in report.inputs {
            if let Some(v) = value {
                if let Err(e) = action.set_input(&name, v) {
                    diagnostics.report(Severity::Warning, format!("input '{name}': {e}"));
                    let required = registration.descriptor
                                               .input(&name)
                                               .map(|d| d.required)
                                               .unwrap_or(false);
                    if required {
                        decode_abort = Some(name);
                        break;
                    }
                }
            }
        }
        if let Some(missing) = decode_abort {
            self.event_store.append_kind(solve_id,
                                         SolveEventKind::InputMissing { input: missing.clone(), required: true });
            self.run_cleanup(solve_id, &info, document, diagnostics);
            return Ok(SolveReport { solve_id, status: SolveStatus::MissingInput(missing), published: 0 });
        }

        let status = {
            let mut ctx = ActionContext { info: info.clone(),
                                          document: &mut *document,
                                          diagnostics: &mut *diagnostics };
            if !action.pre_execution(&mut ctx) {
                SolveStatus::StageFailed(Stage::PreExecution)
            } else {
                match action.execute(&mut ctx) {
                    Err(e) => {
                        drop(ctx);
                        self.event_store.append_kind(solve_id,
                                                     SolveEventKind::ExecuteFaulted { message: e.to_string() });
                        diagnostics.report(Severity::Error, format!("execute: {e}"));
                        self.run_cleanup(solve_id, &info, document, diagnostics);
                        return Err(e);
                    }
                    Ok(false) => SolveStatus::StageFailed(Stage::Execute),
                    Ok(true) => {
                        if action.post_execution(&mut ctx) {
                            SolveStatus::Completed
                        } else {
                            SolveStatus::StageFailed(Stage::PostExecution)
                        }
                    }
                }
            }
        };

        let mut published = 0usize;
        match &status {
            SolveStatus::Completed => {
                for out in registration.descriptor.outputs_by_ordinal() {
                    if let Some(v) = action.output(&out.name) {
                        let host_kind = v.kind.host_equivalent();
                        let value = if host_kind != v.kind {
                            self.conversions
                                .convert_with(ConversionMode::Permissive, &v, host_kind)
                                .unwrap_or(v)
                        } else {
                            v
                        };
                        sink.set_value(&out.name, value);
                        published += 1;
                    }
                }
                self.event_store.append_kind(solve_id, SolveEventKind::OutputsPublished { count: published });
            }
            SolveStatus::StageFailed(stage) => {
                self.event_store.append_kind(solve_id, SolveEventKind::StageFailed { stage: *stage });
            }
            SolveStatus::MissingInput(_) => {}
        }

        self.run_cleanup(solve_id, &info, document, diagnostics);

        if status == SolveStatus::Completed {
            self.last_executed
                .insert(info.invocation.clone(), LastExecuted { action, info: info.clone() });
            self.event_store.append_kind(solve_id, SolveEventKind::SolveCompleted { command: command.to_string() });
        }

        Ok(SolveReport { solve_id, status, published })
    }

    /// `final_operations` de la última instancia exitosa de la invocación,
    /// con la `ExecutionInfo` con la que esa instancia corrió.
    fn run_cleanup(&mut self,
                   solve_id: Uuid,
                   info: &ExecutionInfo,
                   document: &mut dyn HostDocument,
                   diagnostics: &mut dyn DiagnosticsSink) {
        let cleaned = if let Some(mut prev) = self.last_executed.get_mut(&info.invocation) {
            let prev_info = prev.info.clone();
            let mut ctx = ActionContext { info: prev_info, document, diagnostics };
            prev.action.final_operations(&mut ctx);
            true
        } else {
            false
        };
        if cleaned {
            self.event_store.append_kind(solve_id,
                                         SolveEventKind::CleanupInvoked { invocation: info.invocation.clone() });
        }
    }
}
