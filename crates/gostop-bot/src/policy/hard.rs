use super::{Policy, PolicyContext, go_by_thresholds, match_by_weights, play_by_weights};
use crate::bot::{BotDifficulty, GoThresholds, PlayWeights};
use gostop_core::model::card::Card;
use gostop_core::rules::matching::Candidates;

pub(crate) const HARD_WEIGHTS: PlayWeights = PlayWeights {
    capture: 1.0,
    score_gain: 0.0,
    denial: 6.0,
    bright_discard: 8.0,
    exposed_bright: 4.0,
    open_pair: 1.5,
    followup: 0.0,
    flip_extension: 0.0,
    discard_risk: 0.0,
};

/// Greedy capture plus denial of near-complete rival sets and care for
/// brights left on the field.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardPolicy;

impl Policy for HardPolicy {
    fn difficulty(&self) -> BotDifficulty {
        BotDifficulty::Hard
    }

    fn choose_card(&mut self, ctx: &PolicyContext<'_>) -> Card {
        play_by_weights(ctx, self.difficulty(), &HARD_WEIGHTS)
    }

    fn choose_match(&mut self, ctx: &PolicyContext<'_>, candidates: &Candidates) -> Card {
        match_by_weights(ctx, self.difficulty(), candidates, &HARD_WEIGHTS)
    }

    fn should_go(&mut self, ctx: &PolicyContext<'_>) -> bool {
        go_by_thresholds(ctx, self.difficulty(), &GoThresholds::HARD, "score_band")
    }
}
