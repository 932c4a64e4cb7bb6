use crate::model::card::Card;
use serde::Serialize;

/// How many field cards share the month of a played or flipped card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Nothing matches; the card is placed on the field.
    Empty,
    /// Exactly one match, captured automatically.
    Single,
    /// Two matches; the acting side picks one.
    Choice,
    /// Three or more; everything of the month is captured.
    Bomb,
}

impl MatchKind {
    pub const fn classify(count: usize) -> Self {
        match count {
            0 => MatchKind::Empty,
            1 => MatchKind::Single,
            2 => MatchKind::Choice,
            _ => MatchKind::Bomb,
        }
    }
}

pub fn find_matches(card: Card, field: &[Card]) -> Vec<Card> {
    field
        .iter()
        .copied()
        .filter(|candidate| candidate.month == card.month && candidate.id != card.id)
        .collect()
}

/// A card together with the field cards it could capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidates {
    card: Card,
    cards: Vec<Card>,
}

impl Candidates {
    pub fn find(card: Card, field: &[Card]) -> Self {
        Self {
            card,
            cards: find_matches(card, field),
        }
    }

    pub fn card(&self) -> Card {
        self.card
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn kind(&self) -> MatchKind {
        MatchKind::classify(self.cards.len())
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn needs_choice(&self) -> bool {
        matches!(self.kind(), MatchKind::Choice)
    }

    /// Cards claimed without asking anyone, or `None` when a choice is pending.
    pub fn automatic(&self) -> Option<Vec<Card>> {
        match self.kind() {
            MatchKind::Empty => Some(Vec::new()),
            MatchKind::Single | MatchKind::Bomb => Some(self.cards.clone()),
            MatchKind::Choice => None,
        }
    }

    /// Claimed cards given the acting side's pick. Only a two-way match consults
    /// `choice`, and then it must be one of the candidates.
    pub fn resolve(&self, choice: Option<Card>) -> Option<Vec<Card>> {
        match self.kind() {
            MatchKind::Choice => choice
                .filter(|picked| self.contains(*picked))
                .map(|picked| vec![picked]),
            _ => self.automatic(),
        }
    }
}
