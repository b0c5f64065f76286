//! Host en memoria para tests y demos.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::errors::CoreActionError;
use crate::model::{Value, ValueKind};

use super::{DiagnosticsSink, HostDataSink, HostDataSource, HostDocument, Severity};

/// Fuente de datos respaldada por un mapa nombre → valor.
#[derive(Default)]
pub struct MapDataSource {
    values: HashMap<String, Value>,
}

impl MapDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }
}

impl HostDataSource for MapDataSource {
    fn get_value(&mut self, name: &str, _kind: ValueKind) -> Result<Option<Value>, CoreActionError> {
        Ok(self.values.get(name).cloned())
    }
}

/// Sink en memoria que conserva el orden de publicación.
#[derive(Default)]
pub struct MemoryDataSink {
    values: IndexMap<String, Value>,
}

impl MemoryDataSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.values.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl HostDataSink for MemoryDataSink {
    fn set_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }
}

struct DocObject {
    invocation: String,
    slot: String,
    value: Value,
    refreshed: bool,
}

/// Documento en memoria con upsert por `(invocation, slot)`.
#[derive(Default)]
pub struct MemoryDocument {
    objects: IndexMap<Uuid, DocObject>,
    index: HashMap<(String, String), Uuid>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self { objects: IndexMap::new(), index: HashMap::new() }
    }

    pub fn object_id(&self, invocation: &str, slot: &str) -> Option<Uuid> {
        self.index.get(&(invocation.to_string(), slot.to_string())).copied()
    }
}

impl HostDocument for MemoryDocument {
    fn begin_update(&mut self, invocation: &str) {
        for obj in self.objects.values_mut() {
            if obj.invocation == invocation {
                obj.refreshed = false;
            }
        }
    }

    fn create_object(&mut self, invocation: &str, slot: &str, value: Value) -> Uuid {
        let key = (invocation.to_string(), slot.to_string());
        if let Some(id) = self.index.get(&key).copied() {
            if let Some(obj) = self.objects.get_mut(&id) {
                obj.value = value;
                obj.refreshed = true;
                return id;
            }
        }
        let id = Uuid::new_v4();
        self.objects.insert(id,
                            DocObject { invocation: invocation.to_string(),
                                        slot: slot.to_string(),
                                        value,
                                        refreshed: true });
        self.index.insert(key, id);
        id
    }

    fn replace_object(&mut self, id: Uuid, value: Value) -> bool {
        match self.objects.get_mut(&id) {
            Some(obj) => {
                obj.value = value;
                obj.refreshed = true;
                true
            }
            None => false,
        }
    }

    fn remove_object(&mut self, id: Uuid) -> bool {
        match self.objects.shift_remove(&id) {
            Some(obj) => {
                self.index.remove(&(obj.invocation, obj.slot));
                true
            }
            None => false,
        }
    }

    fn sweep_stale(&mut self, invocation: &str) -> usize {
        let any_refreshed = self.objects
                                .values()
                                .any(|o| o.invocation == invocation && o.refreshed);
        if !any_refreshed {
            // La pasada no creó nada: conservar lo que había.
            return 0;
        }
        let stale: Vec<Uuid> = self.objects
                                   .iter()
                                   .filter(|(_, o)| o.invocation == invocation && !o.refreshed)
                                   .map(|(id, _)| *id)
                                   .collect();
        for id in &stale {
            self.remove_object(*id);
        }
        stale.len()
    }

    fn object(&self, id: Uuid) -> Option<Value> {
        self.objects.get(&id).map(|o| o.value.clone())
    }

    fn live_count(&self) -> usize {
        self.objects.len()
    }
}

#[derive(Debug, Clone)]
pub struct DiagnosticRecord {
    pub severity: Severity,
    pub message: String,
    pub ts: DateTime<Utc>,
}

/// Acumulador de diagnósticos con timestamp.
#[derive(Default)]
pub struct CollectingDiagnostics {
    entries: Vec<DiagnosticRecord>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[DiagnosticRecord] {
        &self.entries
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DiagnosticsSink for CollectingDiagnostics {
    fn report(&mut self, severity: Severity, message: String) {
        self.entries.push(DiagnosticRecord { severity, message, ts: Utc::now() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_object_upserts_by_invocation_and_slot() {
        let mut doc = MemoryDocument::new();
        let a = doc.create_object("cmp-1", "Element", Value::new(ValueKind::Element, json!({"v": 1})));
        let b = doc.create_object("cmp-1", "Element", Value::new(ValueKind::Element, json!({"v": 2})));
        assert_eq!(a, b);
        assert_eq!(doc.live_count(), 1);
        assert_eq!(doc.object(a).map(|v| v.payload["v"].clone()), Some(json!(2)));
    }

    #[test]
    fn sweep_removes_only_unrefreshed_objects() {
        let mut doc = MemoryDocument::new();
        doc.create_object("cmp-1", "A", Value::number(1.0));
        doc.create_object("cmp-1", "B", Value::number(2.0));

        doc.begin_update("cmp-1");
        doc.create_object("cmp-1", "A", Value::number(3.0));
        let removed = doc.sweep_stale("cmp-1");

        assert_eq!(removed, 1);
        assert_eq!(doc.live_count(), 1);
        assert!(doc.object_id("cmp-1", "A").is_some());
        assert!(doc.object_id("cmp-1", "B").is_none());
    }

    #[test]
    fn sweep_is_a_noop_when_the_pass_refreshed_nothing() {
        let mut doc = MemoryDocument::new();
        doc.create_object("cmp-1", "A", Value::number(1.0));

        doc.begin_update("cmp-1");
        let removed = doc.sweep_stale("cmp-1");

        assert_eq!(removed, 0);
        assert_eq!(doc.live_count(), 1);
    }

    #[test]
    fn sweep_ignores_other_invocations() {
        let mut doc = MemoryDocument::new();
        doc.create_object("cmp-1", "A", Value::number(1.0));
        doc.create_object("cmp-2", "A", Value::number(2.0));

        doc.begin_update("cmp-1");
        doc.create_object("cmp-1", "B", Value::number(3.0));
        doc.sweep_stale("cmp-1");

        assert!(doc.object_id("cmp-2", "A").is_some());
        assert_eq!(doc.live_count(), 2);
    }
}
