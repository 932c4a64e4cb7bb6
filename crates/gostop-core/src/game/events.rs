//! Notifications derived by comparing two consecutive snapshots.

use super::phase::{Phase, RoundOutcome};
use super::state::GameState;
use crate::model::card::Card;
use crate::model::side::Side;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    RoundStarted { round: u32 },
    CardPlaced { card: Card },
    DeckFlip { card: Card },
    Capture { side: Side, cards: Vec<Card> },
    Sweep { side: Side, sweeps: u32 },
    GoDeclared { side: Side, go_count: u32 },
    StopDeclared { side: Side, payout: u32 },
    RoundEnded { outcome: RoundOutcome },
}

/// Everything a presentation layer would animate between `prev` and `next`.
pub fn diff(prev: &GameState, next: &GameState) -> Vec<Notification> {
    let mut events = Vec::new();

    let redealt = prev.phase() != next.phase()
        || prev.round() != next.round()
        || prev.draw_pile() != next.draw_pile();
    if *next.phase() == Phase::Dealing && redealt {
        events.push(Notification::RoundStarted {
            round: next.round(),
        });
        return events;
    }

    if next.draw_pile().len() < prev.draw_pile().len() {
        if let Some(card) = next.last_flipped() {
            events.push(Notification::DeckFlip { card });
        }
    }

    for card in next.field() {
        if !prev.field().contains(card) {
            events.push(Notification::CardPlaced { card: *card });
        }
    }

    for side in Side::BOTH {
        let before = prev.side(side);
        let after = next.side(side);

        let gained: Vec<Card> = after
            .capture()
            .iter()
            .filter(|card| !before.capture().contains(**card))
            .copied()
            .collect();
        if !gained.is_empty() {
            events.push(Notification::Capture {
                side,
                cards: gained,
            });
        }
        if after.sweeps() > before.sweeps() {
            events.push(Notification::Sweep {
                side,
                sweeps: after.sweeps(),
            });
        }
        if after.go_count() > before.go_count() {
            events.push(Notification::GoDeclared {
                side,
                go_count: after.go_count(),
            });
        }
    }

    if let (false, Phase::RoundEnd { outcome }) = (prev.phase().is_round_over(), next.phase()) {
        if let RoundOutcome::Stopped { side, payout, .. } = *outcome {
            events.push(Notification::StopDeclared { side, payout });
        }
        events.push(Notification::RoundEnded { outcome: *outcome });
    }

    events
}
