//! TOSSUP — coin-toss betting tournament simulator
//!
//! Entry point. Loads configuration, initialises structured logging, then
//! either plays one run on the console or serves the browser dashboard.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use tossup::config::{self, AppConfig};
use tossup::dashboard;
use tossup::dashboard::routes::DashboardState;
use tossup::engine::resolver::MatchResolver;
use tossup::engine::scheduler::RoundScheduler;
use tossup::engine::simulation::Simulation;
use tossup::presentation::console::ConsoleSink;
use tossup::random::SeededRandom;
use tossup::source;
use tossup::strategy::bet_sizer::BetSizer;

const BANNER: &str = r#"
 _____ ___  ____ ____  _   _ ____
|_   _/ _ \/ ___/ ___|| | | |  _ \
  | || | | \___ \___ \| | | | |_) |
  | || |_| |___) |__) | |_| |  __/
  |_| \___/|____/____/ \___/|_|

  Coin-toss betting tournament
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::var("TOSSUP_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let cfg = AppConfig::load(&config_path)?;

    init_logging();

    println!("{BANNER}");
    info!(
        config = %config_path,
        rounds = cfg.simulation.rounds,
        seed = ?cfg.simulation.seed,
        source = ?cfg.source.kind,
        dashboard = cfg.dashboard.enabled,
        "TOSSUP starting up"
    );

    let source = source::from_config(&cfg.source)?;
    let simulation = build_simulation(&cfg);

    if cfg.dashboard.enabled {
        let state = Arc::new(DashboardState::new(
            simulation,
            source,
            cfg.simulation.seed,
            cfg.pacing.realtime,
        ));
        dashboard::serve(state, cfg.dashboard.port).await?;
        return Ok(());
    }

    let sink = ConsoleSink::new(cfg.pacing.realtime);
    let mut rng = SeededRandom::from_optional_seed(cfg.simulation.seed);
    let report = simulation.start(source.as_ref(), &mut rng, &sink).await?;

    info!(
        run_id = %report.run_id,
        seed = report.seed,
        matches = report.matches_played(),
        leader = report.leader().map(|r| r.name.as_str()).unwrap_or("-"),
        "TOSSUP finished"
    );

    Ok(())
}

fn build_simulation(cfg: &config::AppConfig) -> Simulation {
    let resolver = MatchResolver::new(BetSizer::new());
    let scheduler = RoundScheduler::new(resolver, cfg.pacing.clone());
    Simulation::new(scheduler, cfg.simulation.rounds)
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tossup=info"));

    let json_logging = std::env::var("TOSSUP_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
