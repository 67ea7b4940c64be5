//! Shared types for the TOSSUP simulator.
//!
//! These types form the data model used across all modules so that the
//! source, strategy, engine and presentation layers can depend on them
//! without circular references.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Balance every participant starts a run with.
pub const INITIAL_BALANCE: Decimal = Decimal::ONE_HUNDRED;

// ---------------------------------------------------------------------------
// Users and participants
// ---------------------------------------------------------------------------

/// A user as returned by a [`UserSource`](crate::source::UserSource).
///
/// Only the identity fields are kept; anything else in the payload
/// (email, address, company, ...) is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
}

/// A simulated bettor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: u64,
    pub name: String,
    /// Current balance. Not floored at zero.
    pub balance: Decimal,
    /// Fixed at enrollment, in [0, 1). Displayed, never consulted by betting.
    pub risk_tolerance: f64,
}

impl Participant {
    /// Enroll a user with the standard starting balance.
    pub fn enroll(record: UserRecord, risk_tolerance: f64) -> Self {
        Self {
            id: record.id,
            name: record.name,
            balance: INITIAL_BALANCE,
            risk_tolerance,
        }
    }

    /// Whether this participant is excluded from play.
    ///
    /// Only an exact zero counts; a negative balance keeps playing.
    pub fn is_broke(&self) -> bool {
        self.balance.is_zero()
    }

    #[cfg(test)]
    pub fn sample(id: u64, name: &str, balance: Decimal) -> Self {
        Self {
            id,
            name: name.to_string(),
            balance,
            risk_tolerance: 0.5,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (#{}) balance=${} risk={:.2}",
            self.name, self.id, self.balance, self.risk_tolerance
        )
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// One face of the coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    pub fn opposite(&self) -> Self {
        match self {
            CoinSide::Heads => CoinSide::Tails,
            CoinSide::Tails => CoinSide::Heads,
        }
    }
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => write!(f, "heads"),
            CoinSide::Tails => write!(f, "tails"),
        }
    }
}

/// Position of a participant within a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(&self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Pick the value belonging to this seat.
    pub fn pick<T>(&self, first: T, second: T) -> T {
        match self {
            Seat::First => first,
            Seat::Second => second,
        }
    }
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

/// Everything decided in a single match, plus the balances it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub first_id: u64,
    pub second_id: u64,
    pub chooser: Seat,
    pub call: CoinSide,
    pub flip: CoinSide,
    pub first_bet: Decimal,
    pub second_bet: Decimal,
    /// Lower of the two bets; the amount that changes hands.
    pub wager: Decimal,
    pub winner: Seat,
    pub first_balance_after: Decimal,
    pub second_balance_after: Decimal,
}

impl Settlement {
    pub fn loser(&self) -> Seat {
        self.winner.other()
    }

    /// Move the wager from loser to winner.
    pub fn apply(&self, first: &mut Participant, second: &mut Participant) {
        debug_assert_eq!(first.id, self.first_id);
        debug_assert_eq!(second.id, self.second_id);

        let (winner, loser) = match self.winner {
            Seat::First => (first, second),
            Seat::Second => (second, first),
        };
        winner.balance += self.wager;
        loser.balance -= self.wager;
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} vs #{}: {:?} called {} | flip {} | wager ${} | winner {:?} | balances ${} / ${}",
            self.first_id,
            self.second_id,
            self.chooser,
            self.call,
            self.flip,
            self.wager,
            self.winner,
            self.first_balance_after,
            self.second_balance_after,
        )
    }
}

// ---------------------------------------------------------------------------
// Round and run reports
// ---------------------------------------------------------------------------

/// What happened in one round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub settlements: Vec<Settlement>,
    /// Pairs `(first_id, second_id)` skipped because one side was at zero.
    pub skipped_pairs: Vec<(u64, u64)>,
    /// Trailing participant with no partner.
    pub sitting_out: Option<u64>,
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub name: String,
    pub balance: Decimal,
}

impl StandingRow {
    pub fn from_participants(participants: &[Participant]) -> Vec<StandingRow> {
        participants
            .iter()
            .map(|p| StandingRow {
                name: p.name.clone(),
                balance: p.balance,
            })
            .collect()
    }
}

impl fmt::Display for StandingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | ${}", self.name, self.balance)
    }
}

/// Summary of a complete run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub seed: u64,
    pub rounds_requested: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub rounds: Vec<RoundSummary>,
    pub standings: Vec<StandingRow>,
}

impl SimulationReport {
    pub fn matches_played(&self) -> usize {
        self.rounds.iter().map(|r| r.settlements.len()).sum()
    }

    pub fn total_balance(&self) -> Decimal {
        self.standings.iter().map(|s| s.balance).sum()
    }

    /// Highest balance; the first listed participant wins ties.
    pub fn leader(&self) -> Option<&StandingRow> {
        self.standings
            .iter()
            .fold(None, |best: Option<&StandingRow>, row| match best {
                Some(b) if b.balance >= row.balance => Some(b),
                _ => Some(row),
            })
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Run {} (seed {}): {} rounds, {} matches, {} participants",
            self.run_id,
            self.seed,
            self.rounds.len(),
            self.matches_played(),
            self.standings.len(),
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for TOSSUP.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("User source unavailable ({source_name}): {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("Invalid user data ({source_name}): {reason}")]
    InvalidUserData { source_name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
