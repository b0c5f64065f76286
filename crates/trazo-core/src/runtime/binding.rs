//! Binding de entradas: del host al slot tipado.
//!
//! Política de errores (agregación por slot): un fallo de lectura o de
//! conversión nunca escapa; degrada el slot a "sin valor" con un diagnóstico
//! y el solve decide después si el slot era obligatorio.

use dashmap::DashMap;

use crate::action::ActionDescriptor;
use crate::convert::ConversionRegistry;
use crate::host::{DiagnosticsSink, HostDataSource, Severity};
use crate::model::Value;

pub(crate) struct BoundInput {
    pub name: String,
    pub value: Option<Value>,
    pub converted: bool,
}

pub(crate) struct BindingReport {
    /// Un elemento por slot de entrada, en orden de binding.
    pub inputs: Vec<BoundInput>,
    /// Primer slot requerido sin valor, si lo hubo.
    pub missing_required: Option<String>,
}

/// Resuelve el valor de cada slot en orden de ordinal.
///
/// Por slot: se pide al host `(name, kind.host_equivalent())`; si el host no
/// entrega nada y el slot es persistente se usa el último valor recordado
/// para `(invocation, slot)`; si el kind entregado difiere del declarado se
/// pasa por el registro de conversiones. El primer requerido sin valor corta
/// el recorrido.
pub(crate) fn bind_inputs(descriptor: &ActionDescriptor,
                          conversions: &ConversionRegistry,
                          invocation: &str,
                          remembered: &DashMap<(String, String), Value>,
                          source: &mut dyn HostDataSource,
                          diagnostics: &mut dyn DiagnosticsSink)
                          -> BindingReport {
    let mut inputs = Vec::new();

    for slot in descriptor.inputs_by_ordinal() {
        let requested_kind = slot.kind.host_equivalent();

        let mut value = match source.get_value(&slot.name, requested_kind) {
            Ok(v) => v,
            Err(e) => {
                diagnostics.report(Severity::Warning,
                                   format!("input '{}': fallo al leer del host: {}", slot.name, e));
                None
            }
        };

        if value.is_none() && slot.persistent {
            value = remembered.get(&(invocation.to_string(), slot.name.clone()))
                              .map(|entry| entry.value().clone());
        }

        let mut converted = false;
        if let Some(v) = value.take() {
            if v.kind == slot.kind {
                value = Some(v);
            } else {
                match conversions.convert(&v, slot.kind) {
                    Ok(out) => {
                        converted = out.kind != v.kind;
                        value = Some(out);
                    }
                    Err(e) => {
                        diagnostics.report(Severity::Warning, format!("input '{}': {}", slot.name, e));
                        value = None;
                    }
                }
            }
        }

        if let Some(v) = &value {
            if slot.persistent {
                remembered.insert((invocation.to_string(), slot.name.clone()), v.clone());
            }
        }

        if value.is_none() && slot.required {
            return BindingReport { inputs, missing_required: Some(slot.name.clone()) };
        }

        inputs.push(BoundInput { name: slot.name.clone(), value, converted });
    }

    BindingReport { inputs, missing_required: None }
}
