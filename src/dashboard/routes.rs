//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;

use super::feed::FeedSink;
use crate::engine::simulation::Simulation;
use crate::random::SeededRandom;
use crate::source::UserSource;
use crate::types::{SimulationReport, StandingRow};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub simulation: Simulation,
    pub source: Arc<dyn UserSource>,
    pub seed: Option<u64>,
    pub realtime: bool,
    pub running: AtomicBool,
    pub log: RwLock<Vec<String>>,
    pub results: RwLock<Vec<StandingRow>>,
    pub last_report: RwLock<Option<SimulationReport>>,
    pub last_error: RwLock<Option<String>>,
}

impl DashboardState {
    pub fn new(
        simulation: Simulation,
        source: Arc<dyn UserSource>,
        seed: Option<u64>,
        realtime: bool,
    ) -> Self {
        Self {
            simulation,
            source,
            seed,
            realtime,
            running: AtomicBool::new(false),
            log: RwLock::new(Vec::new()),
            results: RwLock::new(Vec::new()),
            last_report: RwLock::new(None),
            last_error: RwLock::new(None),
        }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StartResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub running: bool,
    pub rounds: u32,
    pub last_run_id: Option<Uuid>,
    pub last_seed: Option<u64>,
    pub matches_played: usize,
    pub last_error: Option<String>,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /api/start
pub async fn start(State(state): State<AppState>) -> (StatusCode, Json<StartResponse>) {
    if state.running.swap(true, Ordering::SeqCst) {
        return (
            StatusCode::CONFLICT,
            Json(StartResponse { status: "already running".into() }),
        );
    }

    state.log.write().await.clear();
    *state.last_error.write().await = None;

    tokio::spawn(run_in_background(state.clone()));

    (
        StatusCode::ACCEPTED,
        Json(StartResponse { status: "started".into() }),
    )
}

/// Play one run against the shared state, then release the running flag.
pub async fn run_in_background(state: AppState) {
    let sink = FeedSink::new(state.clone(), state.realtime);
    let mut rng = SeededRandom::from_optional_seed(state.seed);

    match state.simulation.start(state.source.as_ref(), &mut rng, &sink).await {
        Ok(report) => {
            info!(run_id = %report.run_id, "Dashboard run finished");
            *state.last_report.write().await = Some(report);
        }
        Err(e) => {
            error!(error = %e, "Dashboard run failed");
            *state.last_error.write().await = Some(format!("{e:#}"));
        }
    }

    state.running.store(false, Ordering::SeqCst);
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let report = state.last_report.read().await;
    Json(StatusResponse {
        running: state.running.load(Ordering::SeqCst),
        rounds: state.simulation.rounds(),
        last_run_id: report.as_ref().map(|r| r.run_id),
        last_seed: report.as_ref().map(|r| r.seed),
        matches_played: report.as_ref().map(|r| r.matches_played()).unwrap_or(0),
        last_error: state.last_error.read().await.clone(),
    })
}

/// GET /api/log
pub async fn get_log(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.log.read().await.clone())
}

/// GET /api/results
pub async fn get_results(State(state): State<AppState>) -> Json<Vec<StandingRow>> {
    Json(state.results.read().await.clone())
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
