//! Simulation run — the "start" action.
//!
//! Fetches the roster, enrolls every user, plays the configured number of
//! rounds and renders the results table once at the end. A failed fetch
//! aborts before any round is played or anything is shown.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::scheduler::RoundScheduler;
use crate::presentation::PresentationSink;
use crate::random::{RandomVariate, SeededRandom};
use crate::source::UserSource;
use crate::types::{Participant, SimulationReport, StandingRow, UserRecord};

/// Rounds played per run unless configured otherwise.
pub const DEFAULT_ROUNDS: u32 = 5;

pub struct Simulation {
    scheduler: RoundScheduler,
    rounds: u32,
}

impl Simulation {
    pub fn new(scheduler: RoundScheduler, rounds: u32) -> Self {
        Self { scheduler, rounds }
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Run one full simulation.
    pub async fn start(
        &self,
        source: &dyn UserSource,
        rng: &mut SeededRandom,
        sink: &dyn PresentationSink,
    ) -> Result<SimulationReport> {
        let started_at = Utc::now();
        let run_id = Uuid::new_v4();
        info!(%run_id, source = %source.name(), seed = rng.seed(), "Fetching users");

        let records = source
            .fetch_users()
            .await
            .inspect_err(|e| warn!(%run_id, error = %e, "Run aborted before first round"))
            .with_context(|| format!("Failed to fetch users from {}", source.name()))?;

        let mut participants = enroll(records, rng);
        info!(
            %run_id,
            participants = participants.len(),
            rounds = self.rounds,
            "Simulation starting"
        );

        let rounds = self
            .scheduler
            .run(&mut participants, self.rounds, rng, sink)
            .await;

        sink.render_results_table(&participants).await;

        let report = SimulationReport {
            run_id,
            seed: rng.seed(),
            rounds_requested: self.rounds,
            started_at,
            finished_at: Utc::now(),
            rounds,
            standings: StandingRow::from_participants(&participants),
        };

        info!(
            %run_id,
            matches = report.matches_played(),
            leader = report.leader().map(|r| r.name.as_str()).unwrap_or("-"),
            "Simulation complete"
        );
        Ok(report)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(RoundScheduler::default(), DEFAULT_ROUNDS)
    }
}

/// Turn user records into participants, one risk-tolerance draw each.
pub fn enroll(records: Vec<UserRecord>, rng: &mut dyn RandomVariate) -> Vec<Participant> {
    records
        .into_iter()
        .map(|record| {
            let risk_tolerance = rng.next_unit();
            Participant::enroll(record, risk_tolerance)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
