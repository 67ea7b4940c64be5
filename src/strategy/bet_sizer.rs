//! Bet sizing.
//!
//! A quick uniform draw in `1..=50` decides the stake. The balance-aware
//! tiers below only come into play if that draw is zero, which the
//! `[1, 50]` range never produces, so in practice every bet is uniform
//! and independent of balance.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::random::RandomVariate;
use crate::types::Participant;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Smallest and largest quick bet.
pub const QUICK_BET_MIN: u32 = 1;
pub const QUICK_BET_MAX: u32 = 50;

/// Below this balance the tiered fallback bets cautiously.
const LOW_BALANCE_CEILING: Decimal = dec!(50);
/// Up to and including this balance the fallback bets moderately.
const MODERATE_BALANCE_CEILING: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Bet sizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct BetSizer;

impl BetSizer {
    pub fn new() -> Self {
        Self
    }

    /// Stake `participant` is willing to put on the next toss.
    pub fn compute_bet(&self, participant: &Participant, rng: &mut dyn RandomVariate) -> Decimal {
        let quick = rng.next_int(QUICK_BET_MIN, QUICK_BET_MAX);
        if quick != 0 {
            return Decimal::from(quick);
        }

        let bet = Self::tiered_bet(participant.balance, rng);
        debug!(participant = %participant.name, bet = %bet, "Tiered bet");
        bet
    }

    /// Balance-aware stake, rounded to cents.
    ///
    /// Draw order is fixed: low base, moderate base, high base, factor.
    pub fn tiered_bet(balance: Decimal, rng: &mut dyn RandomVariate) -> Decimal {
        let low_base = Decimal::from(rng.next_int(1, 5));
        let moderate_base = Decimal::from(rng.next_int(5, 10));
        let high_base = Decimal::from(rng.next_int(10, 29));
        let factor = Decimal::from_f64(rng.next_unit()).unwrap_or(Decimal::ZERO);

        let bet = if balance < LOW_BALANCE_CEILING {
            (low_base + factor * dec!(5)).max(Decimal::ONE)
        } else if balance <= MODERATE_BALANCE_CEILING {
            moderate_base + factor * dec!(5)
        } else {
            high_base * (dec!(2) + factor * dec!(3))
        };

        bet.round_dp(2)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_quick_bet_always_in_range() {
        let sizer = BetSizer::new();
        let mut rng = SeededRandom::new(2024);
        let p = Participant::sample(1, "A", dec!(100));
        for _ in 0..1000 {
            let bet = sizer.compute_bet(&p, &mut rng);
            assert!(bet >= dec!(1) && bet <= dec!(50), "bet {bet} out of range");
            assert_eq!(bet, bet.trunc(), "bet {bet} is not whole");
        }
    }

    #[test]
    fn test_quick_bet_ignores_balance() {
        let sizer = BetSizer::new();
        let poor = Participant::sample(1, "A", dec!(3));
        let rich = Participant::sample(2, "B", dec!(5000));
        let mut r1 = ScriptedRandom::new(vec![0.37]);
        let mut r2 = ScriptedRandom::new(vec![0.37]);
        assert_eq!(sizer.compute_bet(&poor, &mut r1), sizer.compute_bet(&rich, &mut r2));
    }

    #[test]
    fn test_quick_bet_consumes_single_draw() {
        let sizer = BetSizer::new();
        let p = Participant::sample(1, "A", dec!(100));
        let mut rng = ScriptedRandom::new(vec![0.0, 0.99]);
        assert_eq!(sizer.compute_bet(&p, &mut rng), dec!(1));
        assert_eq!(rng.draws(), 1);
        assert_eq!(sizer.compute_bet(&p, &mut rng), dec!(50));
    }

    #[test]
    fn test_tiered_low_balance() {
        // low base = 1 + floor(0.5*5) = 3, factor 0.2 -> 3 + 1 = 4
        let mut rng = ScriptedRandom::new(vec![0.5, 0.0, 0.0, 0.2]);
        assert_eq!(BetSizer::tiered_bet(dec!(20), &mut rng), dec!(4));
    }

    #[test]
    fn test_tiered_moderate_balance_inclusive_bounds() {
        // moderate base = 5 + floor(0.5*6) = 8, factor 0.5 -> 10.5
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.0, 0.5]);
        assert_eq!(BetSizer::tiered_bet(dec!(50), &mut rng), dec!(10.5));
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.0, 0.5]);
        assert_eq!(BetSizer::tiered_bet(dec!(100), &mut rng), dec!(10.5));
    }

    #[test]
    fn test_tiered_high_balance_multiplies() {
        // high base = 10 + floor(0.25*20) = 15, factor 0.5 -> 15 * 3.5
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.25, 0.5]);
        assert_eq!(BetSizer::tiered_bet(dec!(100.01), &mut rng), dec!(52.5));
    }

    #[test]
    fn test_tiered_never_below_one() {
        let mut rng = SeededRandom::new(5);
        for _ in 0..200 {
            assert!(BetSizer::tiered_bet(dec!(-40), &mut rng) >= dec!(1));
        }
    }
}
