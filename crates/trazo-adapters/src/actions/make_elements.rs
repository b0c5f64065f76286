//! MakeElements
//!
//! Convierte una colección de formas en elementos lineales. Con
//! `PropertiesFromLayers` activo, la capa de origen de cada forma se vuelve
//! la sección del elemento (una sección por nombre de capa, creada bajo
//! demanda con un perfil por defecto).

use std::collections::HashMap;

use trazo_core::model::{ActionContext, Value, ValueKind, ValueSpec};
use trazo_core::{action, ActionStages, CoreActionError, InputDescriptor, OutputDescriptor, Severity};

use trazo_geom::{LinearElement, SectionFamily, SectionProfile, ShapeCollection};

/// Perfil por defecto de las secciones derivadas de capas, en metros.
const DEFAULT_LAYER_PROFILE: (f64, f64) = (0.1, 0.1);

action! {
    action MakeElementsAction {
        command: "MakeElements",
        description: "convert shapes into linear elements",
        fields { elements: Option<Vec<LinearElement>> },
        inputs {
            geometry["Geometry"]: ShapeCollection =
                InputDescriptor::new(1, "Geometry", ValueKind::Collection, "the geometry to be converted"),
            properties_from_layers["PropertiesFromLayers"]: bool =
                InputDescriptor::new(2, "PropertiesFromLayers", ValueKind::Flag,
                                     "use source layers as element properties")
                    .optional()
                    .manual(false)
                    .persistent(),
        },
        outputs {
            "Elements" => OutputDescriptor::new(1, "Elements", ValueKind::Collection, "the created elements"),
                get(this) {
                    this.elements
                        .as_ref()
                        .and_then(|els| serde_json::to_value(els).ok())
                        .map(|payload| Value::new(ValueKind::Collection, payload))
                }
        }
    }
}

impl ActionStages for MakeElementsAction {
    fn pre_execution(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        ctx.document.begin_update(&ctx.info.invocation);
        true
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, CoreActionError> {
        let geometry = self.geometry
                           .take()
                           .ok_or_else(|| CoreActionError::Internal("Geometry sin vincular".into()))?;
        let from_layers = self.properties_from_layers.unwrap_or(true);

        let mut sections: HashMap<String, SectionFamily> = HashMap::new();
        let mut elements = Vec::with_capacity(geometry.len());

        for (i, shape) in geometry.iter().enumerate() {
            let mut element = LinearElement::new(shape.curve.clone());
            if from_layers {
                if let Some(layer) = &shape.layer {
                    let section = sections.entry(layer.clone()).or_insert_with(|| {
                        let profile = SectionProfile::Rectangular { depth: DEFAULT_LAYER_PROFILE.0,
                                                                    width: DEFAULT_LAYER_PROFILE.1 };
                        SectionFamily::new(layer.clone(), profile)
                    });
                    element.section = Some(section.clone());
                }
            }
            ctx.document.create_object(&ctx.info.invocation,
                                       &format!("Elements/{i}"),
                                       element.clone().into_value());
            elements.push(element);
        }

        for section in sections.values() {
            ctx.document.create_object(&ctx.info.invocation,
                                       &format!("Section/{}", section.name),
                                       section.clone().into_value());
        }

        ctx.diagnostics.report(Severity::Info, format!("{} elementos creados", elements.len()));
        self.elements = Some(elements);
        Ok(true)
    }

    fn final_operations(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.document.sweep_stale(&ctx.info.invocation);
    }
}
