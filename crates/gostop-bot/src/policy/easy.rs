use super::{Policy, PolicyContext, log_go_decision, log_match_decision, log_play_decision};
use crate::bot::{BotDifficulty, card_priority, highest_priority, lowest_priority};
use gostop_core::model::card::Card;
use gostop_core::rules::matching::Candidates;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const RANDOM_PLAY_PERCENT: u32 = 40;
const CHEAPEST_PLAY_PERCENT: u32 = 70;

/// Mostly random play that never goes.
#[derive(Debug, Clone)]
pub struct EasyPolicy {
    rng: StdRng,
}

impl EasyPolicy {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, ctx: &PolicyContext<'_>) -> (Card, &'static str) {
        let hand = ctx.view.hand_cards();
        let roll = self.rng.gen_range(0..100);
        if roll < RANDOM_PLAY_PERCENT {
            if let Some(card) = hand.choose(&mut self.rng) {
                return (*card, "random");
            }
        } else if roll < CHEAPEST_PLAY_PERCENT {
            if let Some(card) = lowest_priority(hand) {
                return (card, "cheapest");
            }
        } else {
            let matching: Vec<Card> = hand
                .iter()
                .copied()
                .filter(|card| !ctx.view.matches_for(*card).cards().is_empty())
                .collect();
            // Cheaper cards get the larger share.
            if let Ok(card) = matching.choose_weighted(&mut self.rng, |card| 11 - card_priority(*card))
            {
                return (*card, "weighted_match");
            }
            if let Some(card) = hand.choose(&mut self.rng) {
                return (*card, "random_fallback");
            }
        }
        (ctx.fallback_card(), "empty_hand")
    }
}

impl Policy for EasyPolicy {
    fn difficulty(&self) -> BotDifficulty {
        BotDifficulty::Easy
    }

    fn choose_card(&mut self, ctx: &PolicyContext<'_>) -> Card {
        let (card, reason) = self.pick(ctx);
        log_play_decision(ctx, self.difficulty(), &[], card, reason);
        card
    }

    fn choose_match(&mut self, ctx: &PolicyContext<'_>, candidates: &Candidates) -> Card {
        let offered = candidates.cards();
        let (picked, reason) = if self.rng.gen_bool(0.5) {
            (offered.choose(&mut self.rng).copied(), "random")
        } else {
            (highest_priority(offered), "highest")
        };
        let chosen = picked.unwrap_or_else(|| ctx.fallback_card());
        log_match_decision(ctx, self.difficulty(), candidates, chosen, reason);
        chosen
    }

    fn should_go(&mut self, ctx: &PolicyContext<'_>) -> bool {
        log_go_decision(ctx, self.difficulty(), false, "never_go");
        false
    }
}
