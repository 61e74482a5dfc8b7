//! The deletion-audit collaborator.

use fieldset_model::ItemId;
use parking_lot::RwLock;
use tracing::info;

/// One structured audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Bundle machine name of the affected item.
    pub kind: String,
    /// The affected item.
    pub id: ItemId,
    /// What happened, e.g. `deleted`.
    pub action: String,
}

impl AuditEntry {
    /// Creates an audit entry.
    pub fn new(kind: impl Into<String>, id: ItemId, action: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id,
            action: action.into(),
        }
    }
}

/// Audit/log service accepting structured entries.
pub trait AuditLog: Send + Sync {
    /// Records one entry.
    fn notice(&self, entry: AuditEntry);
}

/// Default audit log: keeps entries in memory and emits tracing events.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl MemoryAuditLog {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().clone()
    }
}

impl AuditLog for MemoryAuditLog {
    fn notice(&self, entry: AuditEntry) {
        info!(
            target: "fieldset::audit",
            kind = %entry.kind,
            id = %entry.id,
            action = %entry.action,
            "audit"
        );
        self.entries.write().push(entry);
    }
}
