use super::{UnseenTracker, card_priority};
use gostop_core::game::AgentView;
use gostop_core::model::capture::CapturePile;
use gostop_core::model::card::Card;
use gostop_core::model::kind::CardKind;
use gostop_core::model::month::Month;
use gostop_core::model::score::score;

/// Field after the play step alone. Claimed targets leave; an unmatched card stays.
pub fn projected_field(field: &[Card], card: Card, targets: &[Card]) -> Vec<Card> {
    let mut next: Vec<Card> = field
        .iter()
        .copied()
        .filter(|candidate| !targets.contains(candidate))
        .collect();
    if targets.is_empty() {
        next.push(card);
    }
    next
}

/// Points the deciding side would gain by adding `captured` to its pile.
pub fn score_gain(view: &AgentView<'_>, captured: &[Card]) -> i32 {
    if captured.is_empty() {
        return 0;
    }
    let next = score(&view.own_capture.plus(captured), view.sweeps).total;
    next as i32 - view.own_score.total as i32
}

/// Number of rival combinations one card short that `captured` would block.
pub fn denial_value(captured: &[Card], rival: &CapturePile) -> i32 {
    let brights = rival.count(CardKind::Bright);
    captured
        .iter()
        .filter(|card| !rival.contains(**card))
        .map(|card| {
            let mut blocked = 0;
            if card.is_godori_animal() && rival.godori_count() == 2 {
                blocked += 1;
            }
            if let Some(ribbon) = card.ribbon {
                if ribbon.forms_set() && rival.ribbon_count(ribbon) == 2 {
                    blocked += 1;
                }
            }
            if card.is_bright() && brights >= 2 {
                blocked += 1;
            }
            blocked
        })
        .sum()
}

/// Brights on the field that the deciding side cannot take with its own hand.
pub fn exposed_brights(field: &[Card], hand: &[Card]) -> Vec<Card> {
    field
        .iter()
        .copied()
        .filter(|card| card.is_bright() && !holds_month(hand, card.month))
        .collect()
}

/// Months with two or more cards on the field and none in hand.
pub fn open_pairs(field: &[Card], hand: &[Card]) -> i32 {
    Month::ALL
        .iter()
        .filter(|month| {
            field.iter().filter(|card| card.month == **month).count() >= 2
                && !holds_month(hand, **month)
        })
        .count() as i32
}

/// Hand cards that would still find a match on `field`.
pub fn followups(field: &[Card], hand: &[Card]) -> i32 {
    hand.iter()
        .filter(|card| field.iter().any(|target| target.month == card.month))
        .count() as i32
}

/// Expected priority the next flip adds by matching something on `field`.
pub fn flip_extension(field: &[Card], tracker: &UnseenTracker) -> f32 {
    Month::ALL
        .iter()
        .filter_map(|month| {
            field
                .iter()
                .filter(|card| card.month == *month)
                .map(|card| card_priority(*card))
                .max()
                .map(|best| tracker.flip_probability(*month) * best as f32)
        })
        .sum()
}

/// Expected priority handed to the rival by leaving `card` on the field.
pub fn discard_risk(card: Card, tracker: &UnseenTracker, rival_hand_size: usize) -> f32 {
    tracker.rival_holds_month(card.month, rival_hand_size) * card_priority(card) as f32
}

fn holds_month(hand: &[Card], month: Month) -> bool {
    hand.iter().any(|card| card.month == month)
}
