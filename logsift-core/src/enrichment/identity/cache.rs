use crate::enrichment::identity::lookup::LookupKind;
use crate::record::{Record, UNRESOLVED};
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of one key's lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Unresolved,
}

impl Resolution {
    /// The cell value broadcast onto records.
    pub fn value(&self) -> &str {
        match self {
            Resolution::Resolved(value) => value,
            Resolution::Unresolved => UNRESOLVED,
        }
    }
}

/// Per-chunk key → resolution map for one lookup kind.
///
/// Built from the worker pool's results after every task has finished and
/// dropped with the chunk; nothing carries over between chunks.
#[derive(Debug)]
pub struct IdentityCache {
    kind: LookupKind,
    entries: HashMap<Arc<str>, Resolution>,
}

impl IdentityCache {
    pub fn new(kind: LookupKind, capacity: usize) -> Self {
        Self {
            kind,
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    pub fn insert(&mut self, key: Arc<str>, resolution: Resolution) {
        self.entries.insert(key, resolution);
    }

    pub fn get(&self, key: &str) -> Option<&Resolution> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolved(&self) -> usize {
        self.entries
            .values()
            .filter(|r| matches!(r, Resolution::Resolved(_)))
            .count()
    }

    /// Copy each key's value onto every record with that key.
    ///
    /// Keys missing from the map (their task never reported) leave the
    /// records untouched.
    pub fn broadcast(&self, records: &mut [Record]) {
        for record in records {
            let Some(resolution) = self.entries.get(record.client_key()) else {
                continue;
            };

            let value = resolution.value().to_string();
            match self.kind {
                LookupKind::Host => record.set_resolved_host(value),
                LookupKind::Net => record.set_resolved_net(value),
            };
        }
    }
}
