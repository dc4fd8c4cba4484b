//! # Event Buffer Adapter
//!
//! Collects events emitted during one call so the host can publish them on
//! commit or drop them on rollback.

use crate::events::RegistryEvent;
use crate::ports::outbound::EventSink;

/// Call-scoped event buffer.
#[derive(Clone, Debug, Default)]
pub struct EventBuffer {
    events: Vec<RegistryEvent>,
}

impl EventBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffered events in emission order.
    #[must_use]
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Takes ownership of the buffered events.
    #[must_use]
    pub fn into_events(self) -> Vec<RegistryEvent> {
        self.events
    }
}

impl EventSink for EventBuffer {
    fn emit(&mut self, event: RegistryEvent) {
        self.events.push(event);
    }
}
