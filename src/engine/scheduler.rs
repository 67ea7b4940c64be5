//! Round scheduler.
//!
//! Pairs participants by position (0 with 1, 2 with 3, ...) for every
//! round, resolves each eligible pair in ascending order, narrates it
//! through the presentation sink and applies the settlement before moving
//! on. Pairing never changes between rounds.

use tracing::{debug, info};

use super::resolver::MatchResolver;
use crate::config::PacingConfig;
use crate::presentation::{BetLine, PresentationSink};
use crate::random::RandomVariate;
use crate::types::{Participant, RoundSummary, Seat, Settlement};

pub struct RoundScheduler {
    resolver: MatchResolver,
    pacing: PacingConfig,
}

impl RoundScheduler {
    pub fn new(resolver: MatchResolver, pacing: PacingConfig) -> Self {
        Self { resolver, pacing }
    }

    /// Play `rounds` rounds over `participants`, mutating balances in place.
    pub async fn run(
        &self,
        participants: &mut [Participant],
        rounds: u32,
        rng: &mut dyn RandomVariate,
        sink: &dyn PresentationSink,
    ) -> Vec<RoundSummary> {
        let mut summaries = Vec::with_capacity(rounds as usize);

        for round in 1..=rounds {
            sink.announce_round(round).await;
            let summary = self.play_round(round, participants, rng, sink).await;

            info!(
                round,
                matches = summary.settlements.len(),
                skipped = summary.skipped_pairs.len(),
                "Round complete"
            );
            summaries.push(summary);
        }

        summaries
    }

    async fn play_round(
        &self,
        round: u32,
        participants: &mut [Participant],
        rng: &mut dyn RandomVariate,
        sink: &dyn PresentationSink,
    ) -> RoundSummary {
        let mut summary = RoundSummary { round, ..Default::default() };

        for i in (0..participants.len()).step_by(2) {
            if i + 1 >= participants.len() {
                debug!(round, participant = %participants[i].name, "No partner, sitting out");
                summary.sitting_out = Some(participants[i].id);
                break;
            }

            let (left, right) = participants.split_at_mut(i + 1);
            let first = &mut left[i];
            let second = &mut right[0];

            if first.is_broke() || second.is_broke() {
                debug!(
                    round,
                    first = %first.name,
                    second = %second.name,
                    "Pair skipped, zero balance"
                );
                summary.skipped_pairs.push((first.id, second.id));
                continue;
            }

            let settlement = self.play_match(first, second, rng, sink).await;
            summary.settlements.push(settlement);
        }

        summary
    }

    /// Resolve, narrate and settle one pair.
    async fn play_match(
        &self,
        first: &mut Participant,
        second: &mut Participant,
        rng: &mut dyn RandomVariate,
        sink: &dyn PresentationSink,
    ) -> Settlement {
        let settlement = self.resolver.resolve(first, second, rng);

        sink.announce_match(first, second).await;
        sink.wait_milliseconds(self.pacing.match_intro_ms).await;
        sink.wait_milliseconds(self.pacing.match_exit_ms).await;

        let chooser = settlement.chooser.pick(&*first, &*second);
        sink.announce_chooser_prompt(chooser).await;
        sink.wait_milliseconds(self.pacing.chooser_ms).await;
        sink.announce_choice(chooser, settlement.call).await;

        sink.announce_bets(
            BetLine::new(first, settlement.first_bet),
            BetLine::new(second, settlement.second_bet),
        )
        .await;
        sink.announce_effective_bet(settlement.wager).await;
        sink.wait_milliseconds(self.pacing.reveal_ms).await;

        sink.announce_coin_result(settlement.flip).await;

        settlement.apply(first, second);
        let (winner, loser) = match settlement.winner {
            Seat::First => (&*first, &*second),
            Seat::Second => (&*second, &*first),
        };
        sink.announce_settlement(winner, loser).await;

        settlement
    }
}

impl Default for RoundScheduler {
    fn default() -> Self {
        Self::new(MatchResolver::default(), PacingConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
