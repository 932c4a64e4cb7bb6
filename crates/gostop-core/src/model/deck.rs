use crate::model::card::{Card, DECK_SIZE};
use crate::model::hand::Hand;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const HAND_SIZE: usize = 10;
pub const FIELD_SIZE: usize = 8;
pub const DRAW_PILE_SIZE: usize = DECK_SIZE - 2 * HAND_SIZE - FIELD_SIZE;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

/// Result of dealing a deck: two sorted hands, the opening field and the draw pile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub player_hand: Hand,
    pub opponent_hand: Hand,
    pub field: Vec<Card>,
    pub draw_pile: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        Self {
            cards: Card::catalog().to_vec(),
        }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Fisher-Yates over the current order.
    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Slices 0-9, 10-19 and 20-27 become player hand, opponent hand and field.
    pub fn deal(&self) -> Deal {
        let (player, rest) = self.cards.split_at(HAND_SIZE);
        let (opponent, rest) = rest.split_at(HAND_SIZE);
        let (field, draw_pile) = rest.split_at(FIELD_SIZE);
        Deal {
            player_hand: Hand::with_cards(player.to_vec()),
            opponent_hand: Hand::with_cards(opponent.to_vec()),
            field: field.to_vec(),
            draw_pile: draw_pile.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DRAW_PILE_SIZE, Deck, FIELD_SIZE, HAND_SIZE};
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_48_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), 48);
        let ids: HashSet<u8> = deck.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 48);
    }

    #[test]
    fn standard_deck_is_in_id_order() {
        let deck = Deck::standard();
        assert!(deck.cards().windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn deal_uses_fixed_slices() {
        let deck = Deck::shuffled_with_seed(7);
        let deal = deck.deal();
        assert_eq!(deal.player_hand.len(), HAND_SIZE);
        assert_eq!(deal.opponent_hand.len(), HAND_SIZE);
        assert_eq!(deal.field.len(), FIELD_SIZE);
        assert_eq!(deal.draw_pile.len(), DRAW_PILE_SIZE);

        for card in &deck.cards()[..10] {
            assert!(deal.player_hand.contains(*card));
        }
        for card in &deck.cards()[10..20] {
            assert!(deal.opponent_hand.contains(*card));
        }
        assert_eq!(deal.field.as_slice(), &deck.cards()[20..28]);
        assert_eq!(deal.draw_pile.as_slice(), &deck.cards()[28..]);
    }
}
