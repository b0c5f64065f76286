//! CreateRectangularSection
//!
//! Crea una propiedad de sección con perfil rectangular y publica la sección
//! más el perímetro calculado del perfil.

use trazo_core::model::{ActionContext, ValueKind, ValueSpec};
use trazo_core::{action, ActionStages, CoreActionError, InputDescriptor, OutputDescriptor, Severity};

use trazo_geom::{Material, SectionFamily, SectionProfile};

action! {
    action CreateRectangularSectionAction {
        command: "CreateRectangularSection",
        description: "create a new section property with a rectangular profile",
        fields { section: Option<SectionFamily> },
        inputs {
            name["Name"]: String =
                InputDescriptor::new(1, "Name", ValueKind::Text, "the name of the section"),
            depth["Depth"]: f64 =
                InputDescriptor::new(2, "Depth", ValueKind::Number, "the depth of the section").manual(false),
            width["Width"]: f64 =
                InputDescriptor::new(3, "Width", ValueKind::Number, "the width of the section").manual(false),
            material["Material"]: Material =
                InputDescriptor::new(7, "Material", ValueKind::Material, "the material of the section")
                    .optional()
                    .manual(false),
        },
        outputs {
            "Section" => OutputDescriptor::new(1, "Section", ValueKind::Section, "the output section property"),
                get(this) { this.section.clone().map(ValueSpec::into_value) }
            "Perimeter" => OutputDescriptor::new(2, "Perimeter", ValueKind::Curve, "the output section perimeter"),
                get(this) { this.section.as_ref().map(|s| s.profile.perimeter().into_value()) }
        }
    }
}

impl ActionStages for CreateRectangularSectionAction {
    fn pre_execution(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        ctx.document.begin_update(&ctx.info.invocation);
        true
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, CoreActionError> {
        let name = self.name
                       .take()
                       .ok_or_else(|| CoreActionError::Internal("Name sin vincular".into()))?;
        let depth = self.depth.ok_or_else(|| CoreActionError::Internal("Depth sin vincular".into()))?;
        let width = self.width.ok_or_else(|| CoreActionError::Internal("Width sin vincular".into()))?;

        let profile = SectionProfile::rectangular(depth, width)
            .map_err(|e| CoreActionError::ExecuteFault(e.to_string()))?;
        let mut section = SectionFamily::new(name, profile);
        section.material = self.material.clone();

        ctx.document.create_object(&ctx.info.invocation, "Section", section.clone().into_value());
        self.section = Some(section);
        Ok(true)
    }

    fn post_execution(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        if let Some(section) = &self.section {
            ctx.diagnostics.report(Severity::Info, format!("sección creada: {}", section.name));
        }
        true
    }

    fn final_operations(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.document.sweep_stale(&ctx.info.invocation);
    }
}
