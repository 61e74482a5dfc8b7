//! The per-request message queue.

use parking_lot::RwLock;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational notice.
    Status,
    /// Something worth the editor's attention.
    Warning,
    /// A failure the editor must act on.
    Error,
}

/// One accumulated notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Severity of the notice.
    pub severity: Severity,
    /// The user-facing text.
    pub text: String,
}

/// Per-request queue of status/warning/error notices.
///
/// One messenger is constructed per request and owned by the handler
/// context, so notices can never leak across requests. Save flows query
/// [`has_warnings_or_errors`](Self::has_warnings_or_errors) before emitting
/// a success notice; a warning or error raised earlier in the same request
/// suppresses it.
#[derive(Debug, Default)]
pub struct Messenger {
    messages: RwLock<Vec<Message>>,
}

impl Messenger {
    /// Creates an empty messenger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a status notice.
    pub fn add_status(&self, text: impl Into<String>) {
        self.push(Severity::Status, text.into());
    }

    /// Queues a warning notice.
    pub fn add_warning(&self, text: impl Into<String>) {
        self.push(Severity::Warning, text.into());
    }

    /// Queues an error notice.
    pub fn add_error(&self, text: impl Into<String>) {
        self.push(Severity::Error, text.into());
    }

    fn push(&self, severity: Severity, text: String) {
        self.messages.write().push(Message { severity, text });
    }

    /// All queued notices, in emission order.
    #[must_use]
    pub fn all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    /// Texts of notices with the given severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<String> {
        self.messages
            .read()
            .iter()
            .filter(|m| m.severity == severity)
            .map(|m| m.text.clone())
            .collect()
    }

    /// Returns true if any warning or error has been queued.
    #[must_use]
    pub fn has_warnings_or_errors(&self) -> bool {
        self.messages
            .read()
            .iter()
            .any(|m| matches!(m.severity, Severity::Warning | Severity::Error))
    }

    /// Returns true if nothing has been queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}
