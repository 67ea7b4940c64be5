//! Match resolution.
//!
//! Decides a single coin-toss match between two participants: who calls,
//! what they call, how much is at stake, and who walks away with it.
//! Resolution does not touch the participants; the scheduler applies the
//! returned [`Settlement`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::random::RandomVariate;
use crate::strategy::bet_sizer::BetSizer;
use crate::types::{CoinSide, Participant, Seat, Settlement};

pub struct MatchResolver {
    sizer: BetSizer,
}

impl MatchResolver {
    pub fn new(sizer: BetSizer) -> Self {
        Self { sizer }
    }

    /// Resolve a match.
    ///
    /// Draw order: chooser, call, first bet, second bet, flip.
    pub fn resolve(
        &self,
        first: &Participant,
        second: &Participant,
        rng: &mut dyn RandomVariate,
    ) -> Settlement {
        let chooser = if rng.next_above_half() { Seat::First } else { Seat::Second };
        let call = Self::draw_side(rng);

        let first_bet = self.sizer.compute_bet(first, rng);
        let second_bet = self.sizer.compute_bet(second, rng);
        let wager = first_bet.min(second_bet);

        let flip = Self::draw_side(rng);
        let winner = if flip == call { chooser } else { chooser.other() };

        let (first_delta, second_delta) = match winner {
            Seat::First => (wager, -wager),
            Seat::Second => (-wager, wager),
        };

        let settlement = Settlement {
            first_id: first.id,
            second_id: second.id,
            chooser,
            call,
            flip,
            first_bet,
            second_bet,
            wager,
            winner,
            first_balance_after: first.balance + first_delta,
            second_balance_after: second.balance + second_delta,
        };

        debug!(
            first = %first.name,
            second = %second.name,
            call = %call,
            flip = %flip,
            wager = %wager,
            winner = ?winner,
            "Match resolved"
        );

        settlement
    }

    fn draw_side(rng: &mut dyn RandomVariate) -> CoinSide {
        if rng.next_above_half() {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        }
    }
}

impl Default for MatchResolver {
    fn default() -> Self {
        Self::new(BetSizer::new())
    }
}

/// Combined balance of a pair; unchanged by any settlement.
pub fn pair_total(first: &Participant, second: &Participant) -> Decimal {
    first.balance + second.balance
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
