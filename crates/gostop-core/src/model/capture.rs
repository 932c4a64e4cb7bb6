use crate::model::card::Card;
use crate::model::kind::{CardKind, RibbonKind};
use crate::model::month::Month;
use serde::Serialize;

/// Cards a side has captured this round, bagged by kind in capture order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapturePile {
    bright: Vec<Card>,
    animal: Vec<Card>,
    ribbon: Vec<Card>,
    junk: Vec<Card>,
}

impl CapturePile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        let mut pile = Self::new();
        pile.extend(cards);
        pile
    }

    pub fn add(&mut self, card: Card) {
        self.bag_mut(card.kind).push(card);
    }

    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        for card in cards {
            self.add(card);
        }
    }

    /// Copy of this pile with `cards` added.
    pub fn plus(&self, cards: &[Card]) -> Self {
        let mut next = self.clone();
        next.extend(cards.iter().copied());
        next
    }

    pub fn bag(&self, kind: CardKind) -> &[Card] {
        match kind {
            CardKind::Bright => &self.bright,
            CardKind::Animal => &self.animal,
            CardKind::Ribbon => &self.ribbon,
            CardKind::Junk => &self.junk,
        }
    }

    fn bag_mut(&mut self, kind: CardKind) -> &mut Vec<Card> {
        match kind {
            CardKind::Bright => &mut self.bright,
            CardKind::Animal => &mut self.animal,
            CardKind::Ribbon => &mut self.ribbon,
            CardKind::Junk => &mut self.junk,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.bright
            .iter()
            .chain(self.animal.iter())
            .chain(self.ribbon.iter())
            .chain(self.junk.iter())
    }

    pub fn len(&self) -> usize {
        self.bright.len() + self.animal.len() + self.ribbon.len() + self.junk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, card: Card) -> bool {
        self.bag(card.kind).contains(&card)
    }

    pub fn count(&self, kind: CardKind) -> usize {
        self.bag(kind).len()
    }

    pub fn junk_weight(&self) -> u32 {
        self.junk.iter().map(|card| card.junk_weight.max(1) as u32).sum()
    }

    pub fn ribbon_count(&self, ribbon: RibbonKind) -> usize {
        self.ribbon
            .iter()
            .filter(|card| card.ribbon == Some(ribbon))
            .count()
    }

    pub fn has_rain_bright(&self) -> bool {
        self.bright.iter().any(|card| card.month == Month::Rain)
    }

    pub fn godori_count(&self) -> usize {
        Month::GODORI
            .iter()
            .filter(|&&month| self.animal.iter().any(|card| card.month == month))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::CapturePile;
    use crate::model::card::Card;
    use crate::model::kind::{CardKind, RibbonKind};

    fn cards(ids: &[u8]) -> Vec<Card> {
        ids.iter().map(|&id| Card::from_id(id).unwrap()).collect()
    }

    #[test]
    fn cards_are_partitioned_by_kind() {
        let pile = CapturePile::with_cards(cards(&[0, 1, 2, 4]));
        assert_eq!(pile.count(CardKind::Bright), 1);
        assert_eq!(pile.count(CardKind::Ribbon), 1);
        assert_eq!(pile.count(CardKind::Junk), 1);
        assert_eq!(pile.count(CardKind::Animal), 1);
        assert_eq!(pile.len(), 4);
    }

    #[test]
    fn double_junk_counts_two() {
        let pile = CapturePile::with_cards(cards(&[2, 43, 47]));
        assert_eq!(pile.junk_weight(), 5);
    }

    #[test]
    fn ribbon_subtypes_are_counted_separately() {
        let pile = CapturePile::with_cards(cards(&[1, 5, 13, 46]));
        assert_eq!(pile.ribbon_count(RibbonKind::RedPoetry), 2);
        assert_eq!(pile.ribbon_count(RibbonKind::Plain), 1);
        assert_eq!(pile.ribbon_count(RibbonKind::Rain), 1);
    }

    #[test]
    fn plus_leaves_the_original_untouched() {
        let pile = CapturePile::with_cards(cards(&[0]));
        let next = pile.plus(&cards(&[4, 12]));
        assert_eq!(pile.len(), 1);
        assert_eq!(next.len(), 3);
        assert_eq!(next.godori_count(), 2);
    }
}
