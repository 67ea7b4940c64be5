//! In-memory sink.
//!
//! Keeps every narration event in order. The results table is held
//! separately and replaced on each render, so rendering twice never
//! duplicates rows.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{Announcement, PresentationSink};
use crate::types::{Participant, StandingRow};

/// One thing the engine asked the sink to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Announced(Announcement),
    Waited(u64),
    RenderedTable,
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
    table: Mutex<Vec<StandingRow>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn announcements(&self) -> Vec<Announcement> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Announced(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// The game log as display lines.
    pub fn log_lines(&self) -> Vec<String> {
        self.announcements().iter().map(|a| a.to_string()).collect()
    }

    /// Rows of the most recently rendered table.
    pub fn table(&self) -> Vec<StandingRow> {
        self.table.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Total pacing time requested, in milliseconds.
    pub fn total_wait_ms(&self) -> u64 {
        self.events()
            .iter()
            .map(|e| match e {
                SinkEvent::Waited(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    fn push(&self, event: SinkEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[async_trait]
impl PresentationSink for RecordingSink {
    async fn emit(&self, announcement: Announcement) {
        self.push(SinkEvent::Announced(announcement));
    }

    async fn render_results_table(&self, participants: &[Participant]) {
        if let Ok(mut table) = self.table.lock() {
            *table = StandingRow::from_participants(participants);
        }
        self.push(SinkEvent::RenderedTable);
    }

    async fn wait_milliseconds(&self, ms: u64) {
        self.push(SinkEvent::Waited(ms));
    }
}
