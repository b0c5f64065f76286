//! DrawLinearElement
//!
//! Crea un elemento lineal desde su geometría de replanteo. La sección es
//! opcional y persistente: dibujada una vez con sección, las siguientes
//! pasadas la reutilizan aunque el host no la vuelva a entregar.

use trazo_core::model::{ActionContext, ValueKind, ValueSpec};
use trazo_core::{action, ActionStages, CoreActionError, InputDescriptor, OutputDescriptor};

use trazo_geom::{Curve, Line, LinearElement, SectionFamily};

action! {
    action DrawLinearElementAction {
        command: "DrawLinearElement",
        description: "create a new linear element",
        fields { element: Option<LinearElement> },
        inputs {
            line["Line"]: Line =
                InputDescriptor::new(1, "Line", ValueKind::Line, "the set-out geometry of the element")
                    .short("SOL"),
            section["Section"]: SectionFamily =
                InputDescriptor::new(2, "Section", ValueKind::Section, "the section property of the element")
                    .optional()
                    .manual(false)
                    .persistent(),
        },
        outputs {
            "Element" => OutputDescriptor::new(1, "Element", ValueKind::Element, "the created element"),
                get(this) { this.element.clone().map(ValueSpec::into_value) }
        }
    }
}

impl ActionStages for DrawLinearElementAction {
    fn pre_execution(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        ctx.document.begin_update(&ctx.info.invocation);
        true
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, CoreActionError> {
        let line = self.line.ok_or_else(|| CoreActionError::Internal("Line sin vincular".into()))?;
        if line.length() <= 0.0 {
            // geometría degenerada: corte silencioso, no es un error
            return Ok(false);
        }
        let mut element = LinearElement::new(Curve::Line(line));
        element.section = self.section.clone();
        ctx.document.create_object(&ctx.info.invocation, "Element", element.clone().into_value());
        self.element = Some(element);
        Ok(true)
    }

    fn final_operations(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.document.sweep_stale(&ctx.info.invocation);
    }
}
