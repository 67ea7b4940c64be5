//! Presentation sinks.
//!
//! Defines the `PresentationSink` trait the engine narrates a run
//! through, and provides implementations for:
//! - Console — plain terminal output with real-time pacing
//! - Recording — in-memory event log for tests and replay
//!
//! The dashboard provides a third sink that feeds the browser page.

pub mod console;
pub mod recorder;

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;

use crate::types::{CoinSide, Participant, StandingRow};

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

/// A single line of the game log.
#[derive(Debug, Clone, PartialEq)]
pub enum Announcement {
    Round { round: u32 },
    Match { first: String, second: String },
    ChooserPrompt { chooser: String },
    Choice { chooser: String, call: CoinSide },
    Bets { first: BetLine, second: BetLine },
    EffectiveBet { wager: Decimal },
    CoinResult { flip: CoinSide },
    Settlement { winner: String, winner_balance: Decimal, loser: String, loser_balance: Decimal },
}

/// One participant's stated bet, shown with their risk tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct BetLine {
    pub name: String,
    pub risk_tolerance: f64,
    pub amount: Decimal,
}

impl BetLine {
    pub fn new(participant: &Participant, amount: Decimal) -> Self {
        Self {
            name: participant.name.clone(),
            risk_tolerance: participant.risk_tolerance,
            amount,
        }
    }
}

impl fmt::Display for BetLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Risk tolerance: {:.2}) bets ${}",
            self.name, self.risk_tolerance, self.amount
        )
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Announcement::Round { round } => write!(f, "Round {round}"),
            Announcement::Match { first, second } => write!(f, "{first} vs {second}"),
            Announcement::ChooserPrompt { chooser } => write!(f, "{chooser} to choose..."),
            Announcement::Choice { chooser, call } => write!(f, "{chooser} chooses {call}..."),
            Announcement::Bets { first, second } => write!(f, "{first}\n{second}"),
            Announcement::EffectiveBet { wager } => {
                write!(f, "The bet is ${wager} based on the lower of the two bets")
            }
            Announcement::CoinResult { flip } => write!(f, "The coin lands on {flip}!"),
            Announcement::Settlement { winner, winner_balance, loser, loser_balance } => write!(
                f,
                "{winner} wins! {winner} balance: ${winner_balance}, {loser} balance: ${loser_balance}"
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Sink trait
// ---------------------------------------------------------------------------

/// Where a run's narration goes.
///
/// Implementors provide `emit`, `render_results_table` and
/// `wait_milliseconds`; the announcement methods build the matching
/// [`Announcement`] and hand it to `emit`.
#[async_trait]
pub trait PresentationSink: Send + Sync {
    /// Record or display one announcement.
    async fn emit(&self, announcement: Announcement);

    /// Show the final standings, replacing any previously rendered table.
    async fn render_results_table(&self, participants: &[Participant]);

    /// Pacing pause between narration steps.
    async fn wait_milliseconds(&self, ms: u64);

    async fn announce_round(&self, round: u32) {
        self.emit(Announcement::Round { round }).await;
    }

    async fn announce_match(&self, first: &Participant, second: &Participant) {
        self.emit(Announcement::Match {
            first: first.name.clone(),
            second: second.name.clone(),
        })
        .await;
    }

    async fn announce_chooser_prompt(&self, chooser: &Participant) {
        self.emit(Announcement::ChooserPrompt { chooser: chooser.name.clone() })
            .await;
    }

    async fn announce_choice(&self, chooser: &Participant, call: CoinSide) {
        self.emit(Announcement::Choice { chooser: chooser.name.clone(), call })
            .await;
    }

    async fn announce_bets(&self, first: BetLine, second: BetLine) {
        self.emit(Announcement::Bets { first, second }).await;
    }

    async fn announce_effective_bet(&self, wager: Decimal) {
        self.emit(Announcement::EffectiveBet { wager }).await;
    }

    async fn announce_coin_result(&self, flip: CoinSide) {
        self.emit(Announcement::CoinResult { flip }).await;
    }

    async fn announce_settlement(&self, winner: &Participant, loser: &Participant) {
        self.emit(Announcement::Settlement {
            winner: winner.name.clone(),
            winner_balance: winner.balance,
            loser: loser.name.clone(),
            loser_balance: loser.balance,
        })
        .await;
    }
}

/// Render standings as a fixed-width text table.
pub fn format_results_table(rows: &[StandingRow]) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = format!("{:<name_width$} | Balance\n", "Name");
    out.push_str(&format!("{}-+-{}\n", "-".repeat(name_width), "-".repeat(7)));
    for row in rows {
        out.push_str(&format!("{:<name_width$} | ${}\n", row.name, row.balance));
    }
    out
}
