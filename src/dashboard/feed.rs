//! Presentation sink that feeds the dashboard page.

use async_trait::async_trait;
use std::time::Duration;

use super::routes::AppState;
use crate::presentation::{Announcement, PresentationSink};
use crate::types::{Participant, StandingRow};

pub struct FeedSink {
    state: AppState,
    realtime: bool,
}

impl FeedSink {
    pub fn new(state: AppState, realtime: bool) -> Self {
        Self { state, realtime }
    }
}

#[async_trait]
impl PresentationSink for FeedSink {
    async fn emit(&self, announcement: Announcement) {
        let mut log = self.state.log.write().await;
        log.extend(announcement.to_string().lines().map(str::to_string));
    }

    async fn render_results_table(&self, participants: &[Participant]) {
        *self.state.results.write().await = StandingRow::from_participants(participants);
    }

    async fn wait_milliseconds(&self, ms: u64) {
        if self.realtime && ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}
