//! Acciones del plugin de herramientas básicas (una por archivo).

mod create_panel_element;
mod create_rectangular_section;
mod draw_linear_element;
mod make_elements;

pub use create_panel_element::CreatePanelElementInCurveAction;
pub use create_rectangular_section::CreateRectangularSectionAction;
pub use draw_linear_element::DrawLinearElementAction;
pub use make_elements::MakeElementsAction;

use trazo_core::{ActionRegistration, PluginModule};

/// Módulo de acciones básicas de modelado.
pub struct BasicToolsPlugin;

impl PluginModule for BasicToolsPlugin {
    fn name(&self) -> &str {
        "basic-tools"
    }

    fn register_actions(&self) -> Vec<ActionRegistration> {
        vec![CreateRectangularSectionAction::registration(),
             DrawLinearElementAction::registration(),
             MakeElementsAction::registration(),
             CreatePanelElementInCurveAction::registration()]
    }
}
