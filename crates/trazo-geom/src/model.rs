//! Objetos de modelo: materiales, familias de sección, elementos.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trazo_core::{impl_value_spec, ValueKind};

use crate::curve::Curve;
use crate::profile::SectionProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub density: Option<f64>, // kg/m3
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), density: None }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }
}

impl_value_spec!(Material => ValueKind::Material);

/// Propiedad de sección con identidad: nombre más perfil y material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionFamily {
    pub id: Uuid,
    pub name: String,
    pub profile: SectionProfile,
    pub material: Option<Material>,
}

impl SectionFamily {
    pub fn new(name: impl Into<String>, profile: SectionProfile) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), profile, material: None }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }
}

impl_value_spec!(SectionFamily => ValueKind::Section);

/// Elemento lineal: geometría de replanteo más sección opcional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearElement {
    pub id: Uuid,
    pub geometry: Curve,
    pub section: Option<SectionFamily>,
}

impl LinearElement {
    pub fn new(geometry: Curve) -> Self {
        Self { id: Uuid::new_v4(), geometry, section: None }
    }

    pub fn with_section(mut self, section: SectionFamily) -> Self {
        self.section = Some(section);
        self
    }
}

impl_value_spec!(LinearElement => ValueKind::Element);

/// Elemento de panel definido por su perímetro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelElement {
    pub id: Uuid,
    pub perimeter: Curve,
}

impl PanelElement {
    pub fn new(perimeter: Curve) -> Self {
        Self { id: Uuid::new_v4(), perimeter }
    }
}

impl_value_spec!(PanelElement => ValueKind::Panel);

/// Una forma con atributos de origen (capa del host, si la hubo).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub curve: Curve,
    pub layer: Option<String>,
}

impl Shape {
    pub fn new(curve: Curve) -> Self {
        Self { curve, layer: None }
    }

    pub fn on_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }
}

/// Colección de formas a convertir en elementos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeCollection(pub Vec<Shape>);

impl ShapeCollection {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self(shapes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.0.iter()
    }
}

impl_value_spec!(ShapeCollection => ValueKind::Collection);
