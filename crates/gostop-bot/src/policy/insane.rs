use super::{Policy, PolicyContext, go_by_thresholds, match_by_weights, play_by_weights};
use crate::bot::{BotDifficulty, GoThresholds, PlayWeights};
use gostop_core::model::card::Card;
use gostop_core::rules::matching::Candidates;

pub(crate) const INSANE_WEIGHTS: PlayWeights = PlayWeights {
    capture: 1.0,
    score_gain: 4.0,
    denial: 12.0,
    bright_discard: 8.0,
    exposed_bright: 4.0,
    open_pair: 1.5,
    followup: 1.0,
    flip_extension: 0.0,
    discard_risk: 0.0,
};

/// Simulates the score of each capture and looks one play ahead.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsanePolicy;

impl Policy for InsanePolicy {
    fn difficulty(&self) -> BotDifficulty {
        BotDifficulty::Insane
    }

    fn choose_card(&mut self, ctx: &PolicyContext<'_>) -> Card {
        play_by_weights(ctx, self.difficulty(), &INSANE_WEIGHTS)
    }

    fn choose_match(&mut self, ctx: &PolicyContext<'_>, candidates: &Candidates) -> Card {
        match_by_weights(ctx, self.difficulty(), candidates, &INSANE_WEIGHTS)
    }

    fn should_go(&mut self, ctx: &PolicyContext<'_>) -> bool {
        go_by_thresholds(ctx, self.difficulty(), &GoThresholds::INSANE, "score_band")
    }
}

#[cfg(test)]
mod tests {
    use super::InsanePolicy;
    use crate::policy::{NormalPolicy, Policy, PolicyContext};
    use gostop_core::game::AgentView;
    use gostop_core::model::capture::CapturePile;
    use gostop_core::model::card::Card;
    use gostop_core::model::hand::Hand;
    use gostop_core::model::score::ScoreBreakdown;
    use gostop_core::model::side::Side;

    fn cards(ids: &[u8]) -> Vec<Card> {
        ids.iter().map(|&id| Card::from_id(id).unwrap()).collect()
    }

    #[test]
    fn denies_the_last_godori_animal() {
        // Rival holds two godori animals; the pampas animal on the field completes the set.
        let hand = Hand::with_cards(cards(&[8, 30]));
        let field = cards(&[29, 9]);
        let own = CapturePile::new();
        let rival = CapturePile::with_cards(cards(&[4, 12]));
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
            rival_hand_size: 8,
            draw_pile_size: 10,
        };
        let ctx = PolicyContext::new(view);
        assert_eq!(NormalPolicy.choose_card(&ctx), cards(&[8])[0]);
        assert_eq!(InsanePolicy.choose_card(&ctx), cards(&[30])[0]);
    }
}
