//! Turn resolution: a play step and an optional flip step are merged into one
//! set of captured cards and a new field.

use crate::model::card::Card;
use crate::rules::matching::{Candidates, MatchKind};
use serde::Serialize;

/// One half of a turn: the card that moved and the field cards it claims.
/// An empty `targets` list means the card was laid face-up on the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub card: Card,
    pub targets: Vec<Card>,
}

impl Step {
    pub fn placed(card: Card) -> Self {
        Self {
            card,
            targets: Vec::new(),
        }
    }

    pub fn capturing(card: Card, targets: Vec<Card>) -> Self {
        Self { card, targets }
    }

    /// Builds a step from the candidates, using `choice` only for a two-way match.
    pub fn from_candidates(candidates: &Candidates, choice: Option<Card>) -> Option<Self> {
        candidates
            .resolve(choice)
            .map(|targets| Self::capturing(candidates.card(), targets))
    }

    pub fn captures(&self) -> bool {
        !self.targets.is_empty()
    }

    pub fn is_bomb(&self) -> bool {
        matches!(MatchKind::classify(self.targets.len()), MatchKind::Bomb)
    }
}

/// Field as shown between the play and the flip: an unmatched played card lies
/// face-up, matched targets have not moved yet.
pub fn field_after_play(field: &[Card], play: &Step) -> Vec<Card> {
    let mut next = field.to_vec();
    if !play.captures() {
        next.push(play.card);
    }
    next
}

/// Cards the flipped card may match: the post-play field minus anything the
/// play step already claimed.
pub fn flip_field(field_after_play: &[Card], play: &Step) -> Vec<Card> {
    field_after_play
        .iter()
        .copied()
        .filter(|card| !play.targets.contains(card))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnCapture {
    pub field: Vec<Card>,
    pub captured: Vec<Card>,
    pub swept: bool,
    /// The flip matched only the card placed by the play step.
    pub ttak: bool,
    pub play_bomb: bool,
    pub flip_bomb: bool,
}

/// Resolves a full turn against the post-play field.
///
/// A bomb on either step takes every card of its month still on the field, and
/// a card claimed by both steps is captured once.
pub fn resolve_turn(field_after_play: &[Card], play: &Step, flip: Option<&Step>) -> TurnCapture {
    let mut field = field_after_play.to_vec();
    let mut captured = Vec::new();

    if play.captures() {
        captured.push(play.card);
        take_targets(&mut field, &mut captured, play);
    }

    let mut ttak = false;
    if let Some(flip) = flip {
        if flip.captures() {
            ttak = !play.captures() && flip.targets.as_slice() == [play.card];
            captured.push(flip.card);
            take_targets(&mut field, &mut captured, flip);
        } else {
            field.push(flip.card);
        }
    }

    let swept = !captured.is_empty() && field.is_empty();
    TurnCapture {
        field,
        captured,
        swept,
        ttak,
        play_bomb: play.is_bomb(),
        flip_bomb: flip.is_some_and(Step::is_bomb),
    }
}

/// Convenience for callers holding the field from before the play step.
pub fn resolve_from_start(field: &[Card], play: &Step, flip: Option<&Step>) -> TurnCapture {
    resolve_turn(&field_after_play(field, play), play, flip)
}

fn take_targets(field: &mut Vec<Card>, captured: &mut Vec<Card>, step: &Step) {
    let bomb = step.is_bomb();
    field.retain(|card| {
        let claimed = step.targets.contains(card) || (bomb && card.month == step.card.month);
        if claimed && !captured.contains(card) {
            captured.push(*card);
        }
        !claimed
    });
}
