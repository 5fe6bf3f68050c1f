//! Generation tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect the
//! generated output.

use crate::error::SkipReason;
use std::sync::Mutex;

///
/// TraceSink
///

pub trait TraceSink: Send + Sync {
    fn on_event(&self, event: TraceEvent);
}

///
/// TraceEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TraceEvent {
    ClassGenerated {
        class: String,
        editor: usize,
        runtime: usize,
    },
    ClassSkipped {
        class: String,
        reason: SkipReason,
    },
    MemberSkipped {
        class: String,
        member: String,
        reason: SkipReason,
    },
}

///
/// NoopSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {
    fn on_event(&self, _: TraceEvent) {}
}

///
/// RecordingSink
///
/// Buffers events for later inspection.
///

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingSink {
    /// Drain every buffered event.
    #[must_use]
    pub fn take(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl TraceSink for RecordingSink {
    fn on_event(&self, event: TraceEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
