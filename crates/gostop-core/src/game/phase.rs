use crate::model::card::Card;
use crate::model::side::Side;
use crate::rules::capture::Step;
use serde::Serialize;

/// A played or flipped card waiting for the acting side to pick one of two matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingMatch {
    pub card: Card,
    pub candidates: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundOutcome {
    Stopped {
        side: Side,
        score: u32,
        go_count: u32,
        payout: u32,
    },
    /// Both hands ran out without anyone stopping.
    Exhausted,
}

impl RoundOutcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            RoundOutcome::Stopped { side, .. } => Some(side),
            RoundOutcome::Exhausted => None,
        }
    }

    pub fn payout(self) -> u32 {
        match self {
            RoundOutcome::Stopped { payout, .. } => payout,
            RoundOutcome::Exhausted => 0,
        }
    }
}

/// Where the round stands. Each variant carries only the data that is valid in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Dealing,
    PlayerPicksCard,
    PlayerPicksMatch {
        pending: PendingMatch,
    },
    PlayerFlipsDeck {
        play: Step,
    },
    PlayerPicksFlipMatch {
        play: Step,
        flip: PendingMatch,
    },
    GoStopDecision,
    OpponentTurn,
    RoundEnd {
        outcome: RoundOutcome,
    },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Dealing => "dealing",
            Phase::PlayerPicksCard => "player_picks_card",
            Phase::PlayerPicksMatch { .. } => "player_picks_match",
            Phase::PlayerFlipsDeck { .. } => "player_flips_deck",
            Phase::PlayerPicksFlipMatch { .. } => "player_picks_flip_match",
            Phase::GoStopDecision => "go_stop_decision",
            Phase::OpponentTurn => "opponent_turn",
            Phase::RoundEnd { .. } => "round_end",
        }
    }

    /// Cards that have left a hand or the draw pile but are not yet on the field
    /// or in a capture pile.
    pub fn in_flight(&self) -> Vec<Card> {
        match self {
            Phase::PlayerPicksMatch { pending } => vec![pending.card],
            Phase::PlayerFlipsDeck { play } => held_play_card(play).into_iter().collect(),
            Phase::PlayerPicksFlipMatch { play, flip } => held_play_card(play)
                .into_iter()
                .chain(std::iter::once(flip.card))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_round_over(&self) -> bool {
        matches!(self, Phase::RoundEnd { .. })
    }

    /// Candidates the player is currently asked to choose between.
    pub fn pending_choice(&self) -> Option<&PendingMatch> {
        match self {
            Phase::PlayerPicksMatch { pending } => Some(pending),
            Phase::PlayerPicksFlipMatch { flip, .. } => Some(flip),
            _ => None,
        }
    }
}

fn held_play_card(play: &Step) -> Option<Card> {
    // A placed card already lies on the field.
    play.captures().then_some(play.card)
}
