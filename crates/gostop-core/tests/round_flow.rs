use gostop_core::game::{Agent, AgentView, Continuation, GameState, Phase, RoundOutcome};
use gostop_core::model::card::Card;
use gostop_core::model::deck::Deal;
use gostop_core::model::hand::Hand;
use gostop_core::model::side::Side;
use gostop_core::rules::matching::Candidates;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Plays the lowest card, takes the first candidate and never goes.
struct Cautious;

impl Agent for Cautious {
    fn choose_card(&mut self, view: &AgentView<'_>) -> Card {
        view.hand_cards()[0]
    }

    fn choose_match(&mut self, _view: &AgentView<'_>, candidates: &Candidates) -> Card {
        candidates.cards()[0]
    }

    fn should_go(&mut self, _view: &AgentView<'_>) -> bool {
        false
    }
}

/// Answers with a card that is never legal.
struct Confused;

impl Agent for Confused {
    fn choose_card(&mut self, _view: &AgentView<'_>) -> Card {
        Card::from_id(47).unwrap()
    }

    fn choose_match(&mut self, _view: &AgentView<'_>, _candidates: &Candidates) -> Card {
        Card::from_id(47).unwrap()
    }

    fn should_go(&mut self, _view: &AgentView<'_>) -> bool {
        true
    }
}

fn cards(ids: &[u8]) -> Vec<Card> {
    ids.iter().map(|&id| Card::from_id(id).unwrap()).collect()
}

fn card(id: u8) -> Card {
    Card::from_id(id).unwrap()
}

/// Plays the player side with the same cautious choices until the round ends.
fn finish_round(mut state: GameState, opponent: &mut dyn Agent) -> GameState {
    for _ in 0..200 {
        state = match state.phase() {
            Phase::Dealing => state.finish_deal(),
            Phase::PlayerPicksCard => {
                let card = state.hand(Side::Player).cards()[0];
                state.select_card(card)
            }
            Phase::PlayerPicksMatch { pending } => state.select_match(pending.candidates[0]),
            Phase::PlayerFlipsDeck { .. } => state.flip_deck(),
            Phase::PlayerPicksFlipMatch { flip, .. } => state.select_flip_match(flip.candidates[0]),
            Phase::GoStopDecision => state.player_stop(),
            Phase::OpponentTurn => state.trigger_opponent(opponent),
            Phase::Idle | Phase::RoundEnd { .. } => break,
        };
    }
    state
}

#[test]
fn hands_shrink_by_one_per_completed_turn() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut state = GameState::new().start_game(&mut rng).finish_deal();
    let mut opponent = Cautious;

    while state.phase() == &Phase::PlayerPicksCard {
        let player_before = state.hand(Side::Player).len();
        let opponent_before = state.hand(Side::Opponent).len();
        let card = state.hand(Side::Player).cards()[0];
        state = state.select_card(card);
        if let Phase::PlayerPicksMatch { pending } = state.phase() {
            state = state.select_match(pending.candidates[0]);
        }
        state = state.flip_deck();
        if let Phase::PlayerPicksFlipMatch { flip, .. } = state.phase() {
            state = state.select_flip_match(flip.candidates[0]);
        }
        assert_eq!(state.hand(Side::Player).len(), player_before - 1);
        if state.phase() == &Phase::GoStopDecision {
            state = state.player_go();
        }
        state = state.trigger_opponent(&mut opponent);
        if state.phase().is_round_over() {
            break;
        }
        assert_eq!(state.hand(Side::Opponent).len(), opponent_before - 1);
        assert!(state.check_conservation().is_ok());
    }
    assert!(state.phase().is_round_over());
}

#[test]
fn new_round_keeps_totals_and_advances_round() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut opponent = Cautious;
    let first = finish_round(GameState::new().start_game(&mut rng), &mut opponent);
    let Phase::RoundEnd { outcome } = first.phase() else {
        panic!("round did not end");
    };
    let banked = outcome.payout();
    assert_eq!(first.totals().standings().iter().sum::<u32>(), banked);

    let second = first.new_round(&mut rng);
    assert_eq!(second.round(), 2);
    assert_eq!(second.phase(), &Phase::Dealing);
    assert_eq!(second.totals(), first.totals());
    assert!(second.capture(Side::Player).is_empty());
    assert!(second.check_conservation().is_ok());

    let fresh = second.start_game(&mut rng);
    assert_eq!(fresh.round(), 1);
    assert_eq!(fresh.totals().standings(), &[0, 0]);
}

#[test]
fn continuations_follow_the_phase() {
    let mut rng = StdRng::seed_from_u64(9);
    let dealing = GameState::new().start_game(&mut rng);
    assert_eq!(dealing.continuation(), Some(Continuation::FinishDeal));
    let picking = dealing.finish_deal();
    assert_eq!(picking.continuation(), None);

    let card = picking.hand(Side::Player).cards()[0];
    let mut next = picking.select_card(card);
    if let Phase::PlayerPicksMatch { pending } = next.phase() {
        assert_eq!(next.continuation(), None);
        next = next.select_match(pending.candidates[0]);
    }
    assert_eq!(next.continuation(), Some(Continuation::FlipDeck));
}

#[test]
fn opponent_stop_banks_its_payout() {
    let state = GameState::from_deal(Deal {
        player_hand: Hand::with_cards(cards(&[8, 12])),
        opponent_hand: Hand::with_cards(cards(&[0, 16])),
        field: cards(&[1, 20, 10, 26]),
        draw_pile: cards(&[24, 21]),
    });
    // player takes the cherry junk, then bush clover with the flip
    let after_player = state.select_card(card(8)).flip_deck();
    assert_eq!(after_player.field(), cards(&[1, 20]).as_slice());
    assert_eq!(after_player.phase(), &Phase::OpponentTurn);

    // opponent clears pine and peony, sweeping for one point, and stops
    let after_opponent = after_player.trigger_opponent(&mut Cautious);
    assert!(after_opponent.field().is_empty());
    assert_eq!(after_opponent.side(Side::Opponent).sweeps(), 1);
    assert_eq!(
        after_opponent.phase(),
        &Phase::RoundEnd {
            outcome: RoundOutcome::Stopped {
                side: Side::Opponent,
                score: 1,
                go_count: 0,
                payout: 1,
            }
        }
    );
    assert_eq!(after_opponent.totals().score(Side::Opponent), 1);
}

#[test]
fn illegal_agent_answers_fall_back_to_first_option() {
    let state = GameState::from_deal(Deal {
        player_hand: Hand::with_cards(cards(&[8, 12])),
        opponent_hand: Hand::with_cards(cards(&[0, 16])),
        field: cards(&[1, 2, 36]),
        draw_pile: cards(&[24, 28]),
    });
    let after_player = state.select_card(card(12)).flip_deck();
    let after_opponent = after_player.trigger_opponent(&mut Confused);
    assert!(after_opponent.capture(Side::Opponent).contains(card(0)));
    assert!(after_opponent.capture(Side::Opponent).contains(card(1)));
    assert!(after_opponent.field().contains(&card(2)));
    assert_eq!(after_opponent.hand(Side::Opponent).cards(), cards(&[16]).as_slice());
}

#[test]
fn exhausted_round_pays_nobody() {
    let state = GameState::from_deal(Deal {
        player_hand: Hand::with_cards(cards(&[8])),
        opponent_hand: Hand::with_cards(cards(&[12])),
        field: cards(&[36]),
        draw_pile: cards(&[24, 40]),
    });
    let end = state
        .select_card(card(8))
        .flip_deck()
        .trigger_opponent(&mut Cautious);
    assert_eq!(
        end.phase(),
        &Phase::RoundEnd {
            outcome: RoundOutcome::Exhausted
        }
    );
    assert_eq!(end.totals().standings(), &[0, 0]);
}

#[test]
fn empty_draw_pile_resolves_the_turn_without_a_flip() {
    let state = GameState::from_deal(Deal {
        player_hand: Hand::with_cards(cards(&[0, 4])),
        opponent_hand: Hand::with_cards(cards(&[8])),
        field: cards(&[1, 16]),
        draw_pile: vec![],
    });
    let played = state.select_card(card(0));
    assert_eq!(played.phase(), &Phase::OpponentTurn);
    assert!(played.capture(Side::Player).contains(card(0)));
    assert!(played.capture(Side::Player).contains(card(1)));
    assert_eq!(played.field(), cards(&[16]).as_slice());
    assert_eq!(played.last_flipped(), None);

    let placed = played.trigger_opponent(&mut Cautious).select_card(card(4));
    assert_eq!(placed.phase(), &Phase::OpponentTurn);
    assert!(placed.field().contains(&card(4)));

    let end = placed.trigger_opponent(&mut Cautious);
    assert_eq!(end.phase(), &Phase::RoundEnd { outcome: RoundOutcome::Exhausted });
}

#[test]
fn empty_draw_pile_resolves_a_chosen_match() {
    let state = GameState::from_deal(Deal {
        player_hand: Hand::with_cards(cards(&[0, 4])),
        opponent_hand: Hand::with_cards(cards(&[8])),
        field: cards(&[1, 2, 16]),
        draw_pile: vec![],
    });
    let picking = state.select_card(card(0));
    assert!(matches!(picking.phase(), Phase::PlayerPicksMatch { .. }));

    let resolved = picking.select_match(card(2));
    assert_eq!(resolved.phase(), &Phase::OpponentTurn);
    assert!(resolved.capture(Side::Player).contains(card(2)));
    assert_eq!(resolved.field(), cards(&[1, 16]).as_slice());
    assert_eq!(resolved.flip_deck(), resolved);
}

#[test]
fn two_gos_then_stop_pays_four_times_the_score() {
    // every player turn sweeps a single field card for one point
    let mut state = GameState::from_deal(Deal {
        player_hand: Hand::with_cards(cards(&[0, 9, 13])),
        opponent_hand: Hand::with_cards(cards(&[8, 12])),
        field: cards(&[1]),
        draw_pile: vec![],
    });

    for (turn, play) in [0u8, 9].into_iter().enumerate() {
        state = state.select_card(card(play));
        assert_eq!(state.phase(), &Phase::GoStopDecision);
        assert_eq!(state.score(Side::Player).total, turn as u32 + 1);
        state = state.player_go();
        assert_eq!(state.side(Side::Player).go_count(), turn as u32 + 1);
        state = state.trigger_opponent(&mut Cautious);
        assert_eq!(state.phase(), &Phase::PlayerPicksCard);
    }

    state = state.select_card(card(13));
    assert_eq!(state.phase(), &Phase::GoStopDecision);
    assert_eq!(state.side(Side::Player).sweeps(), 3);
    assert_eq!(state.payout_if_stopped(Side::Player), 12);

    let stopped = state.player_stop();
    assert_eq!(
        stopped.phase(),
        &Phase::RoundEnd {
            outcome: RoundOutcome::Stopped {
                side: Side::Player,
                score: 3,
                go_count: 2,
                payout: 12,
            }
        }
    );
    assert_eq!(stopped.totals().score(Side::Player), 12);
    assert_eq!(stopped.totals().score(Side::Opponent), 0);
}
