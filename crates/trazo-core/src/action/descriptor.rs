//! Descriptores estáticos de slots y acciones.
//!
//! Los descriptores reemplazan cualquier descubrimiento por introspección:
//! todo lo que un front-end necesita para pintar una acción (slots, orden,
//! abreviaciones, flags) está en datos construidos una vez e inmutables.

use serde::{Deserialize, Serialize};

use crate::model::ValueKind;
use crate::shortname::derive_short_name;

/// Slot de entrada de una acción.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDescriptor {
    pub ordinal: u32,
    pub name: String,
    pub kind: ValueKind,
    pub short_name: String,
    pub description: String,
    /// Sin valor para un slot requerido, el solve aborta.
    pub required: bool,
    /// El front-end permite entrada manual del valor.
    pub manual: bool,
    /// El runtime recuerda el último valor usado por invocación y lo reutiliza
    /// cuando el host no entrega nada.
    pub persistent: bool,
}

impl InputDescriptor {
    pub fn new(ordinal: u32, name: &str, kind: ValueKind, description: &str) -> Self {
        Self { ordinal,
               name: name.to_string(),
               kind,
               short_name: derive_short_name(name),
               description: description.to_string(),
               required: true,
               manual: true,
               persistent: false }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    pub fn short(mut self, short_name: &str) -> Self {
        self.short_name = short_name.to_string();
        self
    }

    /// Descripción con inicial en mayúscula, para UIs.
    pub fn capitalised_description(&self) -> String {
        capitalise(&self.description)
    }
}

/// Slot de salida de una acción.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDescriptor {
    pub ordinal: u32,
    pub name: String,
    pub kind: ValueKind,
    pub short_name: String,
    pub description: String,
}

impl OutputDescriptor {
    pub fn new(ordinal: u32, name: &str, kind: ValueKind, description: &str) -> Self {
        Self { ordinal,
               name: name.to_string(),
               kind,
               short_name: derive_short_name(name),
               description: description.to_string() }
    }

    pub fn short(mut self, short_name: &str) -> Self {
        self.short_name = short_name.to_string();
        self
    }

    pub fn capitalised_description(&self) -> String {
        capitalise(&self.description)
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Descriptor completo de una acción: comando más tablas de slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub command: String,
    pub description: String,
    pub icon: Option<String>,
    pub inputs: Vec<InputDescriptor>,
    pub outputs: Vec<OutputDescriptor>,
}

impl ActionDescriptor {
    pub fn new(command: &str, description: &str) -> Self {
        Self { command: command.to_string(),
               description: description.to_string(),
               icon: None,
               inputs: Vec::new(),
               outputs: Vec::new() }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<InputDescriptor>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<OutputDescriptor>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn input(&self, name: &str) -> Option<&InputDescriptor> {
        self.inputs.iter().find(|d| d.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&OutputDescriptor> {
        self.outputs.iter().find(|d| d.name == name)
    }

    /// Entradas en orden de binding: sort estable por ordinal, empates en
    /// orden de declaración.
    pub fn inputs_by_ordinal(&self) -> Vec<&InputDescriptor> {
        let mut v: Vec<&InputDescriptor> = self.inputs.iter().collect();
        v.sort_by_key(|d| d.ordinal);
        v
    }

    /// Salidas en orden de publicación.
    pub fn outputs_by_ordinal(&self) -> Vec<&OutputDescriptor> {
        let mut v: Vec<&OutputDescriptor> = self.outputs.iter().collect();
        v.sort_by_key(|d| d.ordinal);
        v
    }
}
