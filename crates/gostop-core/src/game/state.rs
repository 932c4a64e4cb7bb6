use crate::game::agent::{Agent, AgentView};
use crate::game::continuation::Continuation;
use crate::game::phase::{PendingMatch, Phase, RoundOutcome};
use crate::model::capture::CapturePile;
use crate::model::card::{Card, DECK_SIZE};
use crate::model::deck::{Deal, Deck};
use crate::model::hand::Hand;
use crate::model::score::{ScoreBoard, ScoreBreakdown, score, stop_payout};
use crate::model::side::Side;
use crate::rules::capture::{Step, TurnCapture, field_after_play, flip_field, resolve_turn};
use crate::rules::matching::Candidates;
use rand::Rng;
use std::fmt;

/// Everything one side owns during a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideState {
    hand: Hand,
    capture: CapturePile,
    score: ScoreBreakdown,
    go_count: u32,
    sweeps: u32,
}

impl SideState {
    fn dealt(hand: Hand) -> Self {
        Self {
            hand,
            ..Self::default()
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn capture(&self) -> &CapturePile {
        &self.capture
    }

    pub fn score(&self) -> &ScoreBreakdown {
        &self.score
    }

    pub fn go_count(&self) -> u32 {
        self.go_count
    }

    pub fn sweeps(&self) -> u32 {
        self.sweeps
    }
}

/// Player-facing vocabulary, dispatched by [`GameState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartGame,
    FinishDeal,
    SelectCard(Card),
    SelectMatch(Card),
    FlipDeck,
    SelectFlipMatch(Card),
    PlayerGo,
    PlayerStop,
    TriggerOpponent,
    NewRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConservationError {
    Duplicate(Card),
    Missing(Card),
}

impl fmt::Display for ConservationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConservationError::Duplicate(card) => write!(f, "{card} appears in two zones"),
            ConservationError::Missing(card) => write!(f, "{card} is in no zone"),
        }
    }
}

impl std::error::Error for ConservationError {}

/// Immutable round snapshot. Every action returns a new value; an action the
/// current phase does not accept returns a clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    phase: Phase,
    draw_pile: Vec<Card>,
    field: Vec<Card>,
    sides: [SideState; 2],
    current_turn: Side,
    last_flipped: Option<Card>,
    last_captured: Vec<Card>,
    message: String,
    round: u32,
    totals: ScoreBoard,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            draw_pile: Vec::new(),
            field: Vec::new(),
            sides: [SideState::default(), SideState::default()],
            current_turn: Side::Player,
            last_flipped: None,
            last_captured: Vec::new(),
            message: String::from("Press start to deal"),
            round: 0,
            totals: ScoreBoard::new(),
        }
    }

    /// A round already past the deal, waiting for the player's card. Useful for
    /// arranged positions.
    pub fn from_deal(deal: Deal) -> Self {
        let mut state = Self::dealt(deal, 1, ScoreBoard::new());
        state.phase = Phase::PlayerPicksCard;
        state.message = String::from("Choose a card to play");
        state
    }

    fn dealt(deal: Deal, round: u32, totals: ScoreBoard) -> Self {
        Self {
            phase: Phase::Dealing,
            draw_pile: deal.draw_pile,
            field: deal.field,
            sides: [
                SideState::dealt(deal.player_hand),
                SideState::dealt(deal.opponent_hand),
            ],
            current_turn: Side::Player,
            last_flipped: None,
            last_captured: Vec::new(),
            message: format!("Round {round}: dealing"),
            round,
            totals,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    pub fn field(&self) -> &[Card] {
        &self.field
    }

    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    pub fn hand(&self, side: Side) -> &Hand {
        &self.side(side).hand
    }

    pub fn capture(&self, side: Side) -> &CapturePile {
        &self.side(side).capture
    }

    pub fn score(&self, side: Side) -> &ScoreBreakdown {
        &self.side(side).score
    }

    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    pub fn last_flipped(&self) -> Option<Card> {
        self.last_flipped
    }

    pub fn last_captured(&self) -> &[Card] {
        &self.last_captured
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn totals(&self) -> &ScoreBoard {
        &self.totals
    }

    /// Payout the side would bank by stopping now.
    pub fn payout_if_stopped(&self, side: Side) -> u32 {
        let seat = self.side(side);
        stop_payout(seat.score.total, seat.go_count)
    }

    /// Timer event the host should schedule, or `None` while waiting on a human.
    pub fn continuation(&self) -> Option<Continuation> {
        match self.phase {
            Phase::Dealing => Some(Continuation::FinishDeal),
            Phase::PlayerFlipsDeck { .. } if !self.draw_pile.is_empty() => {
                Some(Continuation::FlipDeck)
            }
            Phase::OpponentTurn => Some(Continuation::OpponentMove),
            _ => None,
        }
    }

    pub fn view(&self, side: Side) -> AgentView<'_> {
        self.view_with_field(side, &self.field)
    }

    /// View of `side` with an explicit field, for choices made against a field
    /// that differs from the one in the snapshot (the flip field).
    pub fn view_with_field<'a>(&'a self, side: Side, field: &'a [Card]) -> AgentView<'a> {
        self.view_with_table(side, field, &[])
    }

    /// View with an explicit field and the cards travelling between zones while
    /// the choice is pending.
    pub fn view_with_table<'a>(
        &'a self,
        side: Side,
        field: &'a [Card],
        in_flight: &'a [Card],
    ) -> AgentView<'a> {
        let own = self.side(side);
        let rival = self.side(side.other());
        AgentView {
            side,
            hand: &own.hand,
            field,
            in_flight,
            own_capture: &own.capture,
            rival_capture: &rival.capture,
            own_score: &own.score,
            rival_score: &rival.score,
            go_count: own.go_count,
            rival_go_count: rival.go_count,
            sweeps: own.sweeps,
            rival_hand_size: rival.hand.len(),
            draw_pile_size: self.draw_pile.len(),
        }
    }

    /// Field the pending player choice draws its candidates from.
    pub fn match_field(&self) -> Vec<Card> {
        match &self.phase {
            Phase::PlayerPicksFlipMatch { play, .. } => flip_field(&self.field, play),
            _ => self.field.clone(),
        }
    }

    /// Shuffles and deals a new match; totals and round counter start over.
    pub fn start_game<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        Self::dealt(Deck::shuffled(rng).deal(), 1, ScoreBoard::new())
    }

    /// Deals the next round of the current match once the previous one ended.
    pub fn new_round<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        if !self.phase.is_round_over() {
            return self.clone();
        }
        Self::dealt(Deck::shuffled(rng).deal(), self.round + 1, self.totals)
    }

    pub fn finish_deal(&self) -> GameState {
        if self.phase != Phase::Dealing {
            return self.clone();
        }
        let mut next = self.clone();
        next.phase = Phase::PlayerPicksCard;
        next.current_turn = Side::Player;
        next.message = String::from("Choose a card to play");
        next
    }

    pub fn select_card(&self, card: Card) -> GameState {
        if self.phase != Phase::PlayerPicksCard || !self.hand(Side::Player).contains(card) {
            return self.clone();
        }
        let mut next = self.clone();
        next.sides[Side::Player.index()].hand.remove(card);
        next.current_turn = Side::Player;

        let candidates = Candidates::find(card, &self.field);
        match Step::from_candidates(&candidates, None) {
            Some(play) => {
                next.field = field_after_play(&self.field, &play);
                if next.draw_pile.is_empty() {
                    return next.finish_player_turn(&play, None);
                }
                next.message = if play.captures() {
                    format!("{card} matches; flipping the deck")
                } else {
                    format!("{card} placed on the field; flipping the deck")
                };
                next.phase = Phase::PlayerFlipsDeck { play };
            }
            None => {
                next.message = format!("{card} matches two cards; choose one");
                next.phase = Phase::PlayerPicksMatch {
                    pending: PendingMatch {
                        card,
                        candidates: candidates.cards().to_vec(),
                    },
                };
            }
        }
        next
    }

    pub fn select_match(&self, choice: Card) -> GameState {
        let Phase::PlayerPicksMatch { pending } = &self.phase else {
            return self.clone();
        };
        if !pending.candidates.contains(&choice) {
            return self.clone();
        }
        let play = Step::capturing(pending.card, vec![choice]);
        if self.draw_pile.is_empty() {
            return self.clone().finish_player_turn(&play, None);
        }
        let mut next = self.clone();
        next.phase = Phase::PlayerFlipsDeck { play };
        next.message = format!("{} takes {choice}; flipping the deck", pending.card);
        next
    }

    pub fn flip_deck(&self) -> GameState {
        let Phase::PlayerFlipsDeck { play } = &self.phase else {
            return self.clone();
        };
        let Some((&flipped, rest)) = self.draw_pile.split_first() else {
            return self.clone();
        };
        let mut next = self.clone();
        next.draw_pile = rest.to_vec();
        next.last_flipped = Some(flipped);

        let candidates = Candidates::find(flipped, &flip_field(&self.field, play));
        match Step::from_candidates(&candidates, None) {
            Some(flip) => next.finish_player_turn(play, Some(&flip)),
            None => {
                next.message = format!("Flipped {flipped}; choose which card it takes");
                next.phase = Phase::PlayerPicksFlipMatch {
                    play: play.clone(),
                    flip: PendingMatch {
                        card: flipped,
                        candidates: candidates.cards().to_vec(),
                    },
                };
                next
            }
        }
    }

    pub fn select_flip_match(&self, choice: Card) -> GameState {
        let Phase::PlayerPicksFlipMatch { play, flip } = &self.phase else {
            return self.clone();
        };
        if !flip.candidates.contains(&choice) {
            return self.clone();
        }
        let flip_step = Step::capturing(flip.card, vec![choice]);
        self.clone().finish_player_turn(play, Some(&flip_step))
    }

    pub fn player_go(&self) -> GameState {
        if self.phase != Phase::GoStopDecision {
            return self.clone();
        }
        let mut next = self.clone();
        let seat = &mut next.sides[Side::Player.index()];
        seat.go_count += 1;
        next.message = format!("Go {}!", seat.go_count);
        next.phase = Phase::OpponentTurn;
        next.current_turn = Side::Opponent;
        next
    }

    pub fn player_stop(&self) -> GameState {
        if self.phase != Phase::GoStopDecision {
            return self.clone();
        }
        self.clone().stopped(Side::Player)
    }

    /// Runs the whole opponent turn with the same resolver the player uses.
    /// Agent answers outside the legal options fall back to the first option.
    pub fn trigger_opponent<A: Agent + ?Sized>(&self, agent: &mut A) -> GameState {
        if self.phase != Phase::OpponentTurn {
            return self.clone();
        }
        let side = Side::Opponent;
        if self.hand(side).is_empty() {
            return self.clone().hand_back();
        }

        let mut next = self.clone();
        next.current_turn = side;
        let hand = self.hand(side).cards();
        let picked = agent.choose_card(&self.view(side));
        let Some(card) = legal_or_first(picked, hand) else {
            return self.clone();
        };
        next.sides[side.index()].hand.remove(card);

        let candidates = Candidates::find(card, &self.field);
        let choice = next.ask_match(agent, side, &self.field, &[card], &candidates);
        let Some(play) = Step::from_candidates(&candidates, choice) else {
            return self.clone();
        };
        let after = field_after_play(&self.field, &play);

        let mut flip = None;
        if !next.draw_pile.is_empty() {
            let flipped = next.draw_pile.remove(0);
            next.last_flipped = Some(flipped);
            let field = flip_field(&after, &play);
            let flip_candidates = Candidates::find(flipped, &field);
            let held: Vec<Card> = [play.card, flipped]
                .into_iter()
                .filter(|moving| !field.contains(moving))
                .collect();
            let choice = next.ask_match(agent, side, &field, &held, &flip_candidates);
            let Some(step) = Step::from_candidates(&flip_candidates, choice) else {
                return self.clone();
            };
            flip = Some(step);
        }

        let (mut next, scoring) = next.resolve(side, &after, &play, flip.as_ref());
        if scoring {
            if !agent.should_go(&next.view(side)) {
                return next.stopped(side).settled();
            }
            let seat = &mut next.sides[side.index()];
            seat.go_count += 1;
            next.message = format!("{side} declares go {}", seat.go_count);
        }
        next.hand_back().settled()
    }

    pub fn apply<R, A>(&self, action: Action, rng: &mut R, agent: &mut A) -> GameState
    where
        R: Rng + ?Sized,
        A: Agent + ?Sized,
    {
        match action {
            Action::StartGame => self.start_game(rng),
            Action::FinishDeal => self.finish_deal(),
            Action::SelectCard(card) => self.select_card(card),
            Action::SelectMatch(card) => self.select_match(card),
            Action::FlipDeck => self.flip_deck(),
            Action::SelectFlipMatch(card) => self.select_flip_match(card),
            Action::PlayerGo => self.player_go(),
            Action::PlayerStop => self.player_stop(),
            Action::TriggerOpponent => self.trigger_opponent(agent),
            Action::NewRound => self.new_round(rng),
        }
    }

    /// Checks that the 48 cards are split across the zones and the in-flight
    /// cards of the phase with nothing duplicated or lost.
    pub fn check_conservation(&self) -> Result<(), ConservationError> {
        let seen = self.placed_cards()?;
        if let Some(card) = Card::catalog().iter().find(|card| !seen[usize::from(card.id)]) {
            return Err(ConservationError::Missing(*card));
        }
        Ok(())
    }

    /// Marks every card held by a zone or in flight, failing on the first one
    /// found twice.
    fn placed_cards(&self) -> Result<[bool; DECK_SIZE], ConservationError> {
        let in_flight = self.phase.in_flight();
        let zones = self
            .draw_pile
            .iter()
            .chain(self.field.iter())
            .chain(self.sides.iter().flat_map(|seat| seat.hand.iter()))
            .chain(self.sides.iter().flat_map(|seat| seat.capture.iter()))
            .chain(in_flight.iter());

        let mut seen = [false; DECK_SIZE];
        for card in zones {
            let slot = &mut seen[usize::from(card.id)];
            if *slot {
                return Err(ConservationError::Duplicate(*card));
            }
            *slot = true;
        }
        Ok(seen)
    }

    /// End of a turn: no card may sit in two places at once.
    fn settled(self) -> GameState {
        debug_assert!(
            self.placed_cards().is_ok(),
            "turn resolution duplicated a card: {:?}",
            self.placed_cards().err()
        );
        self
    }

    fn ask_match<A: Agent + ?Sized>(
        &self,
        agent: &mut A,
        side: Side,
        field: &[Card],
        in_flight: &[Card],
        candidates: &Candidates,
    ) -> Option<Card> {
        if !candidates.needs_choice() {
            return None;
        }
        let view = self.view_with_table(side, field, in_flight);
        let picked = agent.choose_match(&view, candidates);
        legal_or_first(picked, candidates.cards())
    }

    fn finish_player_turn(self, play: &Step, flip: Option<&Step>) -> GameState {
        let after = self.field.clone();
        let (mut next, scoring) = self.resolve(Side::Player, &after, play, flip);
        if scoring {
            next.message = format!(
                "{} points. Go or stop? Stopping pays {}",
                next.score(Side::Player).total,
                next.payout_if_stopped(Side::Player)
            );
            next.phase = Phase::GoStopDecision;
        } else {
            next.phase = Phase::OpponentTurn;
            next.current_turn = Side::Opponent;
        }
        next.settled()
    }

    /// Applies a finished turn for `side` and reports whether it was a new
    /// scoring event.
    fn resolve(
        mut self,
        side: Side,
        field_after_play: &[Card],
        play: &Step,
        flip: Option<&Step>,
    ) -> (GameState, bool) {
        let turn = resolve_turn(field_after_play, play, flip);
        debug_assert!(turn.captured.iter().all(|card| !turn.field.contains(card)));

        let seat = &mut self.sides[side.index()];
        seat.capture.extend(turn.captured.iter().copied());
        if turn.swept {
            seat.sweeps += 1;
        }
        let previous = seat.score.total;
        seat.score = score(&seat.capture, seat.sweeps);
        let scoring = is_scoring_event(previous, seat.score.total, seat.go_count);

        self.message = turn_message(side, &turn);
        self.field = turn.field;
        self.last_captured = turn.captured;
        (self, scoring)
    }

    fn stopped(mut self, side: Side) -> GameState {
        let total = self.score(side).total;
        let go_count = self.side(side).go_count;
        let payout = stop_payout(total, go_count);
        let outcome = RoundOutcome::Stopped {
            side,
            score: total,
            go_count,
            payout,
        };
        self.totals.add_payout(side, payout);
        self.message = format!("{side} stops with {total} points and collects {payout}");
        self.phase = Phase::RoundEnd { outcome };
        self
    }

    /// Hands control to whichever side still holds cards, player first.
    fn hand_back(mut self) -> GameState {
        let player_out = self.hand(Side::Player).is_empty();
        let opponent_out = self.hand(Side::Opponent).is_empty();
        match (player_out, opponent_out) {
            (true, true) => {
                self.phase = Phase::RoundEnd {
                    outcome: RoundOutcome::Exhausted,
                };
                self.message = String::from("Both hands are empty; the round is a draw");
            }
            (true, false) => {
                self.phase = Phase::OpponentTurn;
                self.current_turn = Side::Opponent;
            }
            (false, _) => {
                self.phase = Phase::PlayerPicksCard;
                self.current_turn = Side::Player;
            }
        }
        self
    }
}

/// A turn opens the go/stop decision only when the score rose and is positive,
/// or the side already committed to a go.
pub fn is_scoring_event(previous: u32, next: u32, go_count: u32) -> bool {
    next > previous && (next >= 1 || go_count > 0)
}

fn legal_or_first(picked: Card, options: &[Card]) -> Option<Card> {
    if options.contains(&picked) {
        Some(picked)
    } else {
        options.first().copied()
    }
}

fn turn_message(side: Side, turn: &TurnCapture) -> String {
    let mut message = if turn.captured.is_empty() {
        format!("{side} captured nothing")
    } else {
        format!("{side} captured {} cards", turn.captured.len())
    };
    if turn.ttak {
        message.push_str(" (ttak)");
    }
    if turn.play_bomb || turn.flip_bomb {
        message.push_str(" (bomb)");
    }
    if turn.swept {
        message.push_str(" and swept the field");
    }
    message
}
