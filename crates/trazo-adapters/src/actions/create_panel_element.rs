//! CreatePanelElementInCurve
//!
//! Crea un elemento de panel desde su curva de borde. Un borde que no cierra
//! es un fallo de `execute` (error que se propaga), no un corte silencioso.

use trazo_core::model::{ActionContext, ValueKind, ValueSpec};
use trazo_core::{action, ActionStages, CoreActionError, InputDescriptor, OutputDescriptor};

use trazo_geom::{Curve, PanelElement};

const CLOSURE_TOL: f64 = 1e-6;

action! {
    action CreatePanelElementInCurveAction {
        command: "CreatePanelElementInCurve",
        description: "create a new panel element from a border curve",
        fields { element: Option<PanelElement> },
        inputs {
            perimeter["Perimeter"]: Curve =
                InputDescriptor::new(1, "Perimeter", ValueKind::Curve,
                                     "the curve that describes the outer perimeter of the panel"),
        },
        outputs {
            "Element" => OutputDescriptor::new(1, "Element", ValueKind::Panel, "the created element"),
                get(this) { this.element.clone().map(ValueSpec::into_value) }
        }
    }
}

fn is_closed_border(curve: &Curve) -> bool {
    match curve {
        Curve::Line(_) => false,
        Curve::Polyline(p) => p.is_closed(CLOSURE_TOL),
    }
}

impl ActionStages for CreatePanelElementInCurveAction {
    fn pre_execution(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        ctx.document.begin_update(&ctx.info.invocation);
        true
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, CoreActionError> {
        let perimeter = self.perimeter
                            .take()
                            .ok_or_else(|| CoreActionError::Internal("Perimeter sin vincular".into()))?;
        if !is_closed_border(&perimeter) {
            return Err(CoreActionError::ExecuteFault("input curve does not close a border".into()));
        }
        let element = PanelElement::new(perimeter);
        ctx.document.create_object(&ctx.info.invocation, "Element", element.clone().into_value());
        self.element = Some(element);
        Ok(true)
    }

    fn final_operations(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.document.sweep_stale(&ctx.info.invocation);
    }
}
