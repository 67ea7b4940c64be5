//! Terminal sink.
//!
//! Prints the game log to stdout as it happens and sleeps through the
//! pacing waits when running in real time.

use async_trait::async_trait;
use std::time::Duration;

use super::{format_results_table, Announcement, PresentationSink};
use crate::types::{Participant, StandingRow};

pub struct ConsoleSink {
    realtime: bool,
}

impl ConsoleSink {
    /// `realtime = false` skips every pacing wait.
    pub fn new(realtime: bool) -> Self {
        Self { realtime }
    }
}

#[async_trait]
impl PresentationSink for ConsoleSink {
    async fn emit(&self, announcement: Announcement) {
        match announcement {
            Announcement::Round { .. } => println!("\n=== {announcement} ==="),
            Announcement::Match { .. } => println!("\n{announcement}"),
            _ => {
                for line in announcement.to_string().lines() {
                    println!("  {line}");
                }
            }
        }
    }

    async fn render_results_table(&self, participants: &[Participant]) {
        let rows = StandingRow::from_participants(participants);
        println!("\nResults\n{}", format_results_table(&rows));
    }

    async fn wait_milliseconds(&self, ms: u64) {
        if self.realtime && ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}
