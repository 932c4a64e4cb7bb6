use super::continuation::Continuation;
use super::phase::Phase;
use super::state::GameState;
use crate::model::capture::CapturePile;
use crate::model::card::Card;
use crate::model::score::ScoreBreakdown;
use crate::model::side::Side;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SideView {
    pub side: Side,
    pub hand_size: usize,
    pub capture: CapturePile,
    pub score: ScoreBreakdown,
    pub go_count: u32,
    pub sweeps: u32,
    pub payout_if_stopped: u32,
    pub total: u32,
}

/// Presentation snapshot. The opponent's hand is reduced to its size.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameView {
    pub round: u32,
    pub phase: Phase,
    pub current_turn: Side,
    pub message: String,
    pub field: Vec<Card>,
    pub player_hand: Vec<Card>,
    pub draw_pile_size: usize,
    pub last_flipped: Option<Card>,
    pub last_captured: Vec<Card>,
    pub continuation: Option<Continuation>,
    pub sides: [SideView; 2],
}

impl GameView {
    pub fn capture(state: &GameState) -> Self {
        let side_view = |side: Side| {
            let seat = state.side(side);
            SideView {
                side,
                hand_size: seat.hand().len(),
                capture: seat.capture().clone(),
                score: seat.score().clone(),
                go_count: seat.go_count(),
                sweeps: seat.sweeps(),
                payout_if_stopped: state.payout_if_stopped(side),
                total: state.totals().score(side),
            }
        };
        GameView {
            round: state.round(),
            phase: state.phase().clone(),
            current_turn: state.current_turn(),
            message: state.message().to_string(),
            field: state.field().to_vec(),
            player_hand: state.hand(Side::Player).cards().to_vec(),
            draw_pile_size: state.draw_pile().len(),
            last_flipped: state.last_flipped(),
            last_captured: state.last_captured().to_vec(),
            continuation: state.continuation(),
            sides: [side_view(Side::Player), side_view(Side::Opponent)],
        }
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(state))
    }
}
