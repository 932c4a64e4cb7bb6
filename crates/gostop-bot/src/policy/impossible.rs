use super::insane::INSANE_WEIGHTS;
use super::{Policy, PolicyContext, go_by_thresholds, match_by_weights, play_by_weights};
use crate::bot::{BotDifficulty, GoThresholds, PlayWeights};
use gostop_core::model::card::Card;
use gostop_core::rules::matching::Candidates;

const IMPOSSIBLE_WEIGHTS: PlayWeights = PlayWeights {
    exposed_bright: 6.0,
    flip_extension: 2.0,
    discard_risk: 1.0,
    ..INSANE_WEIGHTS
};

const AGGRESSIVE_HAND: usize = 4;

/// Insane evaluation weighted by the odds computed from unseen cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpossiblePolicy;

impl Policy for ImpossiblePolicy {
    fn difficulty(&self) -> BotDifficulty {
        BotDifficulty::Impossible
    }

    fn choose_card(&mut self, ctx: &PolicyContext<'_>) -> Card {
        play_by_weights(ctx, self.difficulty(), &IMPOSSIBLE_WEIGHTS)
    }

    fn choose_match(&mut self, ctx: &PolicyContext<'_>, candidates: &Candidates) -> Card {
        match_by_weights(ctx, self.difficulty(), candidates, &IMPOSSIBLE_WEIGHTS)
    }

    fn should_go(&mut self, ctx: &PolicyContext<'_>) -> bool {
        if ctx.view.hand.len() >= AGGRESSIVE_HAND {
            go_by_thresholds(ctx, self.difficulty(), &GoThresholds::INSANE, "long_hand")
        } else {
            go_by_thresholds(ctx, self.difficulty(), &GoThresholds::CAUTIOUS, "short_hand")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ImpossiblePolicy;
    use crate::policy::{Policy, PolicyContext};
    use gostop_core::game::AgentView;
    use gostop_core::model::capture::CapturePile;
    use gostop_core::model::card::Card;
    use gostop_core::model::hand::Hand;
    use gostop_core::model::score::ScoreBreakdown;
    use gostop_core::model::side::Side;

    fn cards(ids: &[u8]) -> Vec<Card> {
        ids.iter().map(|&id| Card::from_id(id).unwrap()).collect()
    }

    fn decide(hand_ids: &[u8], total: u32, go_count: u32) -> bool {
        let hand = Hand::with_cards(cards(hand_ids));
        let field = Vec::new();
        let pile = CapturePile::new();
        let own_score = ScoreBreakdown {
            total,
            ..ScoreBreakdown::empty()
        };
        let rival_score = ScoreBreakdown::empty();
        let view = AgentView {
            side: Side::Opponent,
            hand: &hand,
            field: &field,
            in_flight: &[],
            own_capture: &pile,
            rival_capture: &pile,
            own_score: &own_score,
            rival_score: &rival_score,
            go_count,
            rival_go_count: 0,
            sweeps: 0,
            rival_hand_size: hand.len(),
            draw_pile_size: 10,
        };
        ImpossiblePolicy.should_go(&PolicyContext::new(view))
    }

    #[test]
    fn go_depends_on_remaining_hand() {
        assert!(decide(&[0, 4, 8, 12], 6, 1));
        assert!(!decide(&[0, 4], 6, 1));
        assert!(decide(&[0, 4], 2, 1));
        assert!(!decide(&[0, 4], 2, 2));
    }

    #[test]
    fn discards_into_the_safest_month() {
        // Every other pine card is already visible, so the pine junk cannot be taken.
        let hand = Hand::with_cards(cards(&[3, 46]));
        let field = cards(&[40]);
        let own = CapturePile::with_cards(cards(&[0, 1, 2]));
        let rival = CapturePile::new();
        let empty = ScoreBreakdown::empty();
        let view = AgentView {
            side: Side::Opponent,
            hand: &hand,
            field: &field,
            in_flight: &[],
            own_capture: &own,
            rival_capture: &rival,
            own_score: &empty,
            rival_score: &empty,
            go_count: 0,
            rival_go_count: 0,
            sweeps: 0,
            rival_hand_size: 9,
            draw_pile_size: 20,
        };
        let ctx = PolicyContext::new(view);
        assert_eq!(ImpossiblePolicy.choose_card(&ctx), cards(&[3])[0]);
    }
}
