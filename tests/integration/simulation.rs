//! End-to-end simulation runs.
//!
//! Plays complete runs through the public API with a recording sink and
//! checks the observable outcome: balances, elimination, rendering.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tossup::config::PacingConfig;
use tossup::engine::resolver::MatchResolver;
use tossup::engine::scheduler::RoundScheduler;
use tossup::engine::simulation::Simulation;
use tossup::presentation::recorder::{RecordingSink, SinkEvent};
use tossup::presentation::Announcement;
use tossup::random::{ScriptedRandom, SeededRandom};
use tossup::types::{CoinSide, Participant, Seat, SimulationError, UserRecord};

use crate::mock_source::MockSource;

fn fast_simulation(rounds: u32) -> Simulation {
    let pacing = PacingConfig { realtime: false, ..PacingConfig::default() };
    Simulation::new(RoundScheduler::new(MatchResolver::default(), pacing), rounds)
}

fn participant(id: u64, name: &str, balance: Decimal) -> Participant {
    let mut p = Participant::enroll(UserRecord { id, name: name.into() }, 0.3);
    p.balance = balance;
    p
}

#[tokio::test]
async fn test_full_run_conserves_money() {
    let source = MockSource::with_users(10);
    let sink = RecordingSink::new();

    let report = fast_simulation(5)
        .start(&source, &mut SeededRandom::new(2024), &sink)
        .await
        .unwrap();

    assert_eq!(source.fetch_count(), 1);
    assert_eq!(report.rounds.len(), 5);
    assert_eq!(report.standings.len(), 10);
    assert_eq!(report.total_balance(), dec!(1000));
    for round in &report.rounds {
        for s in &round.settlements {
            assert_eq!(s.wager, s.first_bet.min(s.second_bet));
            assert!(s.wager >= dec!(1) && s.wager <= dec!(50));
        }
    }
}

#[tokio::test]
async fn test_scripted_two_player_scenario() {
    let mut ps = vec![participant(1, "A", dec!(100)), participant(2, "B", dec!(100))];
    // chooser=A, call=heads, bets 41/11, flip=heads
    let mut rng = ScriptedRandom::new(vec![0.7, 0.6, 0.8, 0.2, 0.95]);
    let sink = RecordingSink::new();

    let rounds = RoundScheduler::default().run(&mut ps, 1, &mut rng, &sink).await;

    let s = &rounds[0].settlements[0];
    assert_eq!(s.chooser, Seat::First);
    assert_eq!(s.call, CoinSide::Heads);
    assert_eq!(s.flip, CoinSide::Heads);
    assert_eq!(s.winner, Seat::First);
    assert_eq!(s.wager, dec!(11));
    assert_eq!(ps[0].balance, dec!(111));
    assert_eq!(ps[1].balance, dec!(89));

    let lines = sink.log_lines();
    assert_eq!(lines[0], "Round 1");
    assert_eq!(lines[1], "A vs B");
    assert_eq!(lines[2], "A to choose...");
    assert_eq!(lines[3], "A chooses heads...");
    assert_eq!(
        lines[4],
        "A (Risk tolerance: 0.30) bets $41\nB (Risk tolerance: 0.30) bets $11"
    );
    assert_eq!(lines[5], "The bet is $11 based on the lower of the two bets");
    assert_eq!(lines[6], "The coin lands on heads!");
    assert_eq!(lines[7], "A wins! A balance: $111, B balance: $89");
    assert_eq!(sink.total_wait_ms(), 5500);
}

#[tokio::test]
async fn test_odd_roster_one_match_per_round() {
    let source = MockSource::with_users(3);
    let sink = RecordingSink::new();

    let report = fast_simulation(5)
        .start(&source, &mut SeededRandom::new(1), &sink)
        .await
        .unwrap();

    for round in &report.rounds {
        assert_eq!(round.settlements.len(), 1);
        assert_eq!(round.sitting_out, Some(3));
    }
    assert_eq!(report.standings[2].balance, dec!(100));
}

#[tokio::test]
async fn test_broke_participant_stays_out() {
    let mut ps = vec![
        participant(1, "A", dec!(100)),
        participant(2, "B", Decimal::ZERO),
        participant(3, "C", dec!(100)),
        participant(4, "D", dec!(100)),
    ];
    let sink = RecordingSink::new();

    let rounds = RoundScheduler::default()
        .run(&mut ps, 5, &mut SeededRandom::new(21), &sink)
        .await;

    for r in &rounds {
        assert_eq!(r.skipped_pairs, vec![(1, 2)]);
        assert!(r.settlements.iter().all(|s| s.first_id == 3));
    }
    assert_eq!(ps[0].balance, dec!(100));
    let names: Vec<&str> = ps.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C", "D"]);
}

#[tokio::test]
async fn test_unavailable_source_produces_nothing() {
    let source = MockSource::with_users(4);
    source.set_error("HTTP error! status: 500");
    let sink = RecordingSink::new();

    let err = fast_simulation(5)
        .start(&source, &mut SeededRandom::new(1), &sink)
        .await
        .unwrap_err();

    assert!(sink.events().is_empty());
    assert!(sink.table().is_empty());
    match err.downcast_ref::<SimulationError>() {
        Some(SimulationError::SourceUnavailable { reason, .. }) => assert!(reason.contains("500")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rerender_replaces_table() {
    use tossup::presentation::PresentationSink;

    let source = MockSource::with_users(4);
    let sink = RecordingSink::new();
    fast_simulation(2)
        .start(&source, &mut SeededRandom::new(5), &sink)
        .await
        .unwrap();
    let first = sink.table();

    let ps: Vec<Participant> = first
        .iter()
        .enumerate()
        .map(|(i, row)| participant(i as u64 + 1, &row.name, row.balance))
        .collect();
    sink.render_results_table(&ps).await;

    assert_eq!(sink.table(), first);
    let renders = sink
        .events()
        .iter()
        .filter(|e| **e == SinkEvent::RenderedTable)
        .count();
    assert_eq!(renders, 2);
}

#[test]
fn test_seeded_runs_replay_identically() {
    let run = |seed| {
        tokio_test::block_on(async {
            let sink = RecordingSink::new();
            let report = fast_simulation(5)
                .start(&MockSource::with_users(8), &mut SeededRandom::new(seed), &sink)
                .await
                .unwrap();
            (report.standings, sink.log_lines())
        })
    };

    assert_eq!(run(314), run(314));
}

#[tokio::test]
async fn test_every_match_is_fully_narrated() {
    let source = MockSource::with_users(6);
    let sink = RecordingSink::new();

    let report = fast_simulation(3)
        .start(&source, &mut SeededRandom::new(77), &sink)
        .await
        .unwrap();

    let settlements = sink
        .announcements()
        .iter()
        .filter(|a| matches!(a, Announcement::Settlement { .. }))
        .count();
    assert_eq!(settlements, report.matches_played());
    assert_eq!(sink.total_wait_ms(), 5500 * report.matches_played() as u64);
}
