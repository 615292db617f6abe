//! Ledger of processes launched by this listener instance.

use proctl_common::ProcessId;
use std::collections::HashMap;

/// Every process identifier launched since startup, plus the most recent one.
///
/// Entries are never removed: an identifier stays recorded after its process
/// exits or is killed. `most_recent` is only ever set to a recorded id.
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    order: Vec<ProcessId>,
    names: HashMap<ProcessId, String>,
    most_recent: Option<ProcessId>,
}

impl ProcessRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly launched process and make it the most recent.
    ///
    /// # Arguments
    ///
    /// * `pid` - Id reported by the OS for the new process
    /// * `name` - Display name the process was launched under
    ///
    /// # Returns
    ///
    /// `false` when the id was already recorded (the OS reused it). The entry
    /// is renamed and becomes the most recent either way.
    pub fn record(&mut self, pid: ProcessId, name: impl Into<String>) -> bool {
        let inserted = self.names.insert(pid, name.into()).is_none();
        if inserted {
            self.order.push(pid);
        }
        self.most_recent = Some(pid);
        inserted
    }

    /// Id of the last successfully started process, if any.
    pub fn most_recent(&self) -> Option<ProcessId> {
        self.most_recent
    }

    /// Whether `pid` was ever launched by this listener.
    pub fn contains(&self, pid: ProcessId) -> bool {
        self.names.contains_key(&pid)
    }

    /// Name the process was launched under.
    pub fn name_of(&self, pid: ProcessId) -> Option<&str> {
        self.names.get(&pid).map(String::as_str)
    }

    /// Number of distinct ids recorded.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Recorded ids in launch order.
    pub fn iter(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.order.iter().copied()
    }

    /// Order used by the kill sweep: most recent first, then the rest of the
    /// ledger in launch order. Each id appears once.
    pub fn sweep_order(&self) -> Vec<ProcessId> {
        let Some(latest) = self.most_recent else {
            return Vec::new();
        };
        std::iter::once(latest)
            .chain(self.iter().filter(|pid| *pid != latest))
            .collect()
    }
}
