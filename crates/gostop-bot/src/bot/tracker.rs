use gostop_core::game::AgentView;
use gostop_core::model::card::{Card, DECK_SIZE};
use gostop_core::model::month::Month;

/// Cards the deciding side has not seen: everything outside its own hand, the
/// field, the cards in flight and both capture piles. These sit in the rival's
/// hand or the draw pile.
#[derive(Debug, Clone)]
pub struct UnseenTracker {
    unseen: [bool; DECK_SIZE],
    per_month: [u8; 12],
    total: usize,
}

impl UnseenTracker {
    pub fn new() -> Self {
        Self {
            unseen: [true; DECK_SIZE],
            per_month: [4; 12],
            total: DECK_SIZE,
        }
    }

    pub fn from_view(view: &AgentView<'_>) -> Self {
        let mut tracker = Self::new();
        let seen = view
            .hand
            .iter()
            .chain(view.field.iter())
            .chain(view.in_flight.iter())
            .chain(view.own_capture.iter())
            .chain(view.rival_capture.iter());
        for card in seen {
            tracker.note_seen(*card);
        }
        tracker
    }

    pub fn note_seen(&mut self, card: Card) {
        let slot = &mut self.unseen[usize::from(card.id)];
        if *slot {
            *slot = false;
            self.per_month[card.month.index()] -= 1;
            self.total -= 1;
        }
    }

    pub fn is_unseen(&self, card: Card) -> bool {
        self.unseen[usize::from(card.id)]
    }

    pub fn unseen_in_month(&self, month: Month) -> usize {
        usize::from(self.per_month[month.index()])
    }

    pub fn unseen_count(&self) -> usize {
        self.total
    }

    pub fn unseen_cards(&self) -> impl Iterator<Item = Card> + '_ {
        Card::catalog()
            .iter()
            .copied()
            .filter(|card| self.is_unseen(*card))
    }

    /// Chance the next flip comes from `month`.
    pub fn flip_probability(&self, month: Month) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.unseen_in_month(month) as f32 / self.total as f32
    }

    /// Chance that a rival holding `hand_size` of the unseen cards has at least
    /// one card of `month`.
    pub fn rival_holds_month(&self, month: Month, hand_size: usize) -> f32 {
        let total = self.total;
        let in_month = self.unseen_in_month(month);
        if in_month == 0 || hand_size == 0 || total == 0 {
            return 0.0;
        }
        let hand_size = hand_size.min(total);
        // Hypergeometric: 1 - C(total - in_month, hand) / C(total, hand).
        let mut miss = 1.0f32;
        for drawn in 0..hand_size {
            let remaining = total - drawn;
            let safe = remaining.saturating_sub(in_month);
            if safe == 0 {
                return 1.0;
            }
            miss *= safe as f32 / remaining as f32;
        }
        1.0 - miss
    }
}

impl Default for UnseenTracker {
    fn default() -> Self {
        Self::new()
    }
}
