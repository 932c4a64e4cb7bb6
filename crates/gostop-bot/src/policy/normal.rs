use super::{Policy, PolicyContext, go_by_thresholds, match_by_weights, play_by_weights};
use crate::bot::{BotDifficulty, GoThresholds, PlayWeights};
use gostop_core::model::card::Card;
use gostop_core::rules::matching::Candidates;

/// Greedy capture: richest match first, otherwise the cheapest discard.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalPolicy;

impl Policy for NormalPolicy {
    fn difficulty(&self) -> BotDifficulty {
        BotDifficulty::Normal
    }

    fn choose_card(&mut self, ctx: &PolicyContext<'_>) -> Card {
        play_by_weights(ctx, self.difficulty(), &PlayWeights::GREEDY)
    }

    fn choose_match(&mut self, ctx: &PolicyContext<'_>, candidates: &Candidates) -> Card {
        match_by_weights(ctx, self.difficulty(), candidates, &PlayWeights::GREEDY)
    }

    fn should_go(&mut self, ctx: &PolicyContext<'_>) -> bool {
        go_by_thresholds(ctx, self.difficulty(), &GoThresholds::NORMAL, "score_band")
    }
}
