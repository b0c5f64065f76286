//! Registro de acciones: comando → registración.

use std::sync::RwLock;

use indexmap::IndexMap;

use crate::errors::CoreActionError;

use super::{Action, ActionDescriptor};

/// Constructor de instancias frescas de una acción.
pub type ActionFactory = fn() -> Box<dyn Action>;

/// Una acción registrable: descriptor estático más fábrica. Copiable para
/// que `resolve` pueda devolverla sin retener el lock.
#[derive(Clone, Copy)]
pub struct ActionRegistration {
    pub descriptor: &'static ActionDescriptor,
    pub factory: ActionFactory,
}

impl ActionRegistration {
    pub fn new(descriptor: &'static ActionDescriptor, factory: ActionFactory) -> Self {
        Self { descriptor, factory }
    }

    pub fn command(&self) -> &str {
        &self.descriptor.command
    }

    pub fn instantiate(&self) -> Box<dyn Action> {
        (self.factory)()
    }
}

/// Un módulo de acciones: las acciones que aporta un paquete de
/// herramientas.
pub trait PluginModule {
    fn name(&self) -> &str;
    fn register_actions(&self) -> Vec<ActionRegistration>;
}

/// Registro comando → registración, con orden de inserción estable.
///
/// Re-registrar un comando sobreescribe (semántica de recarga de plugins);
/// el registro devuelve la registración reemplazada para que el host pueda
/// observar la colisión si le importa.
pub struct ActionRegistry {
    inner: RwLock<IndexMap<String, ActionRegistration>>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self { inner: RwLock::new(IndexMap::new()) }
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, registration: ActionRegistration) -> Option<ActionRegistration> {
        let mut map = self.inner.write().expect("action registry lock");
        map.insert(registration.command().to_string(), registration)
    }

    /// Carga todas las acciones de un módulo. Devuelve cuántas registró.
    pub fn load_module(&self, module: &dyn PluginModule) -> usize {
        let regs = module.register_actions();
        let n = regs.len();
        for r in regs {
            self.register(r);
        }
        n
    }

    pub fn resolve(&self, command: &str) -> Result<ActionRegistration, CoreActionError> {
        let map = self.inner.read().expect("action registry lock");
        map.get(command)
           .copied()
           .ok_or_else(|| CoreActionError::UnknownCommand(command.to_string()))
    }

    /// Comandos en orden de registro.
    pub fn commands(&self) -> Vec<String> {
        let map = self.inner.read().expect("action registry lock");
        map.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("action registry lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
