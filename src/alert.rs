//! Alert Slot
//!
//! Single-slot, last-write-wins notification. Every shown alert gets a new
//! ticket; an auto-hide only takes effect while its ticket is still current,
//! so a timer started for an earlier alert never hides a later one.

/// Default auto-hide delay
pub const DEFAULT_ALERT_TIMEOUT_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// Generation of a shown alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertSlot {
    current: Option<Alert>,
    generation: u64,
}

impl AlertSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is visible. An empty message hides the slot.
    ///
    /// Returns the ticket to expire the alert with, if one is visible.
    pub fn show(&mut self, kind: AlertKind, message: impl Into<String>) -> Option<Ticket> {
        let message = message.into();
        self.generation += 1;

        if message.is_empty() {
            self.current = None;
            return None;
        }

        tracing::debug!(kind = ?kind, message = %message, "Alert");
        self.current = Some(Alert { kind, message });
        Some(Ticket(self.generation))
    }

    pub fn success(&mut self, message: impl Into<String>) -> Option<Ticket> {
        self.show(AlertKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> Option<Ticket> {
        self.show(AlertKind::Error, message)
    }

    /// Auto-hide; ignored unless `ticket` belongs to the visible alert
    pub fn expire(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }
}
