//! Builder ergonómico del runtime.

use crate::action::{ActionRegistration, ActionRegistry, PluginModule};
use crate::convert::{ConversionMode, ConversionRegistry, ConverterSource};
use crate::event::{EventStore, InMemoryEventStore};

use super::ActionRuntime;

/// Construcción declarativa: módulos de acciones, conjuntos de
/// convertidores, modo de conversión y event store.
pub struct RuntimeBuilder<E: EventStore> {
    event_store: E,
    actions: ActionRegistry,
    conversions: ConversionRegistry,
}

impl RuntimeBuilder<InMemoryEventStore> {
    pub fn new() -> Self {
        Self { event_store: InMemoryEventStore::default(),
               actions: ActionRegistry::new(),
               conversions: ConversionRegistry::new() }
    }
}

impl Default for RuntimeBuilder<InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventStore> RuntimeBuilder<E> {
    /// Sustituye el event store (cambia el parámetro de tipo).
    pub fn event_store<E2: EventStore>(self, event_store: E2) -> RuntimeBuilder<E2> {
        RuntimeBuilder { event_store,
                         actions: self.actions,
                         conversions: self.conversions }
    }

    pub fn load_module(self, module: &dyn PluginModule) -> Self {
        self.actions.load_module(module);
        self
    }

    pub fn register_action(self, registration: ActionRegistration) -> Self {
        self.actions.register(registration);
        self
    }

    pub fn converters(mut self, source: &dyn ConverterSource) -> Self {
        self.conversions.register_source(source);
        self
    }

    pub fn conversion_mode(mut self, mode: ConversionMode) -> Self {
        self.conversions.set_default_mode(mode);
        self
    }

    pub fn build(self) -> ActionRuntime<E> {
        ActionRuntime::with_stores(self.event_store, self.actions, self.conversions)
    }
}
