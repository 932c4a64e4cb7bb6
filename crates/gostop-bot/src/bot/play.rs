use super::eval::{
    denial_value, discard_risk, exposed_brights, flip_extension, followups, open_pairs,
    projected_field, score_gain,
};
use super::{card_priority, priority_sum};
use crate::policy::PolicyContext;
use gostop_core::model::card::Card;
use gostop_core::rules::matching::Candidates;
use std::cmp::Ordering;

/// Feature weights for card evaluation. A zero weight switches the feature off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayWeights {
    pub capture: f32,
    pub score_gain: f32,
    pub denial: f32,
    pub bright_discard: f32,
    pub exposed_bright: f32,
    pub open_pair: f32,
    pub followup: f32,
    pub flip_extension: f32,
    pub discard_risk: f32,
}

impl PlayWeights {
    /// Capture value only.
    pub const GREEDY: PlayWeights = PlayWeights {
        capture: 1.0,
        score_gain: 0.0,
        denial: 0.0,
        bright_discard: 0.0,
        exposed_bright: 0.0,
        open_pair: 0.0,
        followup: 0.0,
        flip_extension: 0.0,
        discard_risk: 0.0,
    };

    fn uses_tracker(&self) -> bool {
        self.flip_extension > 0.0 || self.discard_risk > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCard {
    pub card: Card,
    pub targets: Vec<Card>,
    pub score: f32,
}

pub struct PlayPlanner;

impl PlayPlanner {
    /// Scores every hand card, best first. Ties keep hand order.
    pub fn rank(ctx: &PolicyContext<'_>, weights: &PlayWeights) -> Vec<ScoredCard> {
        let hand = ctx.view.hand_cards();
        let mut scored: Vec<ScoredCard> = hand
            .iter()
            .copied()
            .map(|card| Self::score_card(ctx, weights, card))
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored
    }

    pub fn choose(ctx: &PolicyContext<'_>, weights: &PlayWeights) -> Option<ScoredCard> {
        Self::rank(ctx, weights).into_iter().next()
    }

    fn score_card(ctx: &PolicyContext<'_>, weights: &PlayWeights, card: Card) -> ScoredCard {
        let view = &ctx.view;
        let candidates = view.matches_for(card);
        let targets = candidates.automatic().unwrap_or_else(|| {
            MatchPlanner::choose(ctx, &candidates, weights)
                .into_iter()
                .collect()
        });
        let captured: Vec<Card> = if targets.is_empty() {
            Vec::new()
        } else {
            std::iter::once(card).chain(targets.iter().copied()).collect()
        };
        let rest: Vec<Card> = view
            .hand_cards()
            .iter()
            .copied()
            .filter(|other| *other != card)
            .collect();
        let field_after = projected_field(view.field, card, &targets);

        let mut score = if captured.is_empty() {
            -(card_priority(card) as f32)
        } else {
            weights.capture * (card_priority(card) + priority_sum(candidates.cards())) as f32
        };

        score += weights.score_gain * score_gain(view, &captured) as f32;
        score += weights.denial * denial_value(&captured, view.rival_capture) as f32;
        if captured.is_empty() && card.is_bright() {
            score -= weights.bright_discard;
        }

        let exposed = exposed_brights(&field_after, &rest);
        let exposure = if weights.uses_tracker() {
            exposed
                .iter()
                .map(|bright| {
                    ctx.tracker
                        .rival_holds_month(bright.month, view.rival_hand_size)
                })
                .sum::<f32>()
        } else {
            exposed.len() as f32
        };
        score -= weights.exposed_bright * exposure;
        score -= weights.open_pair * open_pairs(&field_after, &rest) as f32;
        score += weights.followup * followups(&field_after, &rest) as f32;
        score += weights.flip_extension * flip_extension(&field_after, &ctx.tracker);
        if captured.is_empty() {
            score -=
                weights.discard_risk * discard_risk(card, &ctx.tracker, view.rival_hand_size);
        }

        ScoredCard {
            card,
            targets,
            score,
        }
    }
}

pub struct MatchPlanner;

impl MatchPlanner {
    /// Picks one of the candidates; ties go to the first offered.
    pub fn choose(
        ctx: &PolicyContext<'_>,
        candidates: &Candidates,
        weights: &PlayWeights,
    ) -> Option<Card> {
        let mut best: Option<(Card, f32)> = None;
        for &target in candidates.cards() {
            let value = Self::value(ctx, candidates.card(), target, weights);
            if best.is_none_or(|(_, top)| value > top) {
                best = Some((target, value));
            }
        }
        best.map(|(card, _)| card)
    }

    fn value(ctx: &PolicyContext<'_>, card: Card, target: Card, weights: &PlayWeights) -> f32 {
        let mut value = card_priority(target) as f32;
        value += weights.denial * denial_value(&[target], ctx.view.rival_capture) as f32;
        value += weights.score_gain * score_gain(&ctx.view, &[card, target]) as f32;
        value
    }
}
