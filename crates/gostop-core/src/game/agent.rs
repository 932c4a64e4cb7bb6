use crate::model::capture::CapturePile;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::score::ScoreBreakdown;
use crate::model::side::Side;
use crate::rules::matching::Candidates;

/// What a deciding side may see: its own hand, the open table and both capture
/// piles. The rival's hand and the draw pile order stay hidden.
#[derive(Debug, Clone, Copy)]
pub struct AgentView<'a> {
    pub side: Side,
    pub hand: &'a Hand,
    pub field: &'a [Card],
    /// Played or flipped cards waiting on this choice, in no zone yet.
    pub in_flight: &'a [Card],
    pub own_capture: &'a CapturePile,
    pub rival_capture: &'a CapturePile,
    pub own_score: &'a ScoreBreakdown,
    pub rival_score: &'a ScoreBreakdown,
    pub go_count: u32,
    pub rival_go_count: u32,
    pub sweeps: u32,
    pub rival_hand_size: usize,
    pub draw_pile_size: usize,
}

impl AgentView<'_> {
    pub fn hand_cards(&self) -> &[Card] {
        self.hand.cards()
    }

    pub fn matches_for(&self, card: Card) -> Candidates {
        Candidates::find(card, self.field)
    }
}

/// Decision seam used for the opponent side. Answers are validated by the
/// state machine; an answer outside the offered options falls back to the first
/// legal option.
pub trait Agent {
    fn choose_card(&mut self, view: &AgentView<'_>) -> Card;

    /// `view.field` is the field the candidates were drawn from.
    fn choose_match(&mut self, view: &AgentView<'_>, candidates: &Candidates) -> Card;

    /// Asked after a scoring event; `view.own_score` already holds the new score.
    fn should_go(&mut self, view: &AgentView<'_>) -> bool;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn choose_card(&mut self, view: &AgentView<'_>) -> Card {
        (**self).choose_card(view)
    }

    fn choose_match(&mut self, view: &AgentView<'_>, candidates: &Candidates) -> Card {
        (**self).choose_match(view, candidates)
    }

    fn should_go(&mut self, view: &AgentView<'_>) -> bool {
        (**self).should_go(view)
    }
}
