mod easy;
mod hard;
mod impossible;
mod insane;
mod normal;

pub use easy::EasyPolicy;
pub use hard::HardPolicy;
pub use impossible::ImpossiblePolicy;
pub use insane::InsanePolicy;
pub use normal::NormalPolicy;

use crate::bot::{
    BotDifficulty, GoThresholds, MatchPlanner, PlayPlanner, PlayWeights, ScoredCard, UnseenTracker,
};
use gostop_core::game::AgentView;
use gostop_core::model::card::Card;
use gostop_core::rules::matching::Candidates;
use tracing::{Level, event};

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub view: AgentView<'a>,
    pub tracker: UnseenTracker,
}

impl<'a> PolicyContext<'a> {
    pub fn new(view: AgentView<'a>) -> Self {
        let tracker = UnseenTracker::from_view(&view);
        Self { view, tracker }
    }

    /// Any card from the hand, for when a planner has nothing better.
    pub(crate) fn fallback_card(&self) -> Card {
        self.view
            .hand_cards()
            .first()
            .copied()
            .unwrap_or(Card::catalog()[0])
    }
}

/// One decision-maker per difficulty tier.
pub trait Policy: Send {
    fn difficulty(&self) -> BotDifficulty;

    /// Choose a card from the hand.
    fn choose_card(&mut self, ctx: &PolicyContext<'_>) -> Card;

    /// Choose one of exactly two candidates.
    fn choose_match(&mut self, ctx: &PolicyContext<'_>, candidates: &Candidates) -> Card;

    /// Decide after a new scoring event; the context already carries the new score.
    fn should_go(&mut self, ctx: &PolicyContext<'_>) -> bool;
}

/// Builds the policy for `difficulty`. Only the easy tier consumes `seed`.
pub fn policy_for(difficulty: BotDifficulty, seed: u64) -> Box<dyn Policy> {
    match difficulty {
        BotDifficulty::Easy => Box::new(EasyPolicy::with_seed(seed)),
        BotDifficulty::Normal => Box::new(NormalPolicy),
        BotDifficulty::Hard => Box::new(HardPolicy),
        BotDifficulty::Insane => Box::new(InsanePolicy),
        BotDifficulty::Impossible => Box::new(ImpossiblePolicy),
    }
}

/// Plays the best card under `weights` and logs the ranking.
pub(crate) fn play_by_weights(
    ctx: &PolicyContext<'_>,
    difficulty: BotDifficulty,
    weights: &PlayWeights,
) -> Card {
    let ranked = PlayPlanner::rank(ctx, weights);
    let Some(best) = ranked.first() else {
        return ctx.fallback_card();
    };
    let reason = if best.targets.is_empty() {
        "discard"
    } else {
        "capture"
    };
    log_play_decision(ctx, difficulty, &ranked, best.card, reason);
    best.card
}

pub(crate) fn match_by_weights(
    ctx: &PolicyContext<'_>,
    difficulty: BotDifficulty,
    candidates: &Candidates,
    weights: &PlayWeights,
) -> Card {
    let chosen = MatchPlanner::choose(ctx, candidates, weights)
        .or_else(|| candidates.cards().first().copied())
        .unwrap_or_else(|| ctx.fallback_card());
    log_match_decision(ctx, difficulty, candidates, chosen, "weighted_match");
    chosen
}

pub(crate) fn go_by_thresholds(
    ctx: &PolicyContext<'_>,
    difficulty: BotDifficulty,
    thresholds: &GoThresholds,
    reason: &str,
) -> bool {
    let go = thresholds.should_go(ctx.view.own_score.total, ctx.view.go_count);
    log_go_decision(ctx, difficulty, go, reason);
    go
}

pub(crate) fn log_play_decision(
    ctx: &PolicyContext<'_>,
    difficulty: BotDifficulty,
    ranked: &[ScoredCard],
    chosen: Card,
    reason: &str,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let preview = if decision_details_enabled() {
        ranked
            .iter()
            .map(|scored| format!("{}={:.2}", scored.card, scored.score))
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} cards", ranked.len())
    };

    event!(
        target: "gostop_bot::play",
        Level::INFO,
        side = %ctx.view.side,
        difficulty = %difficulty,
        hand_size = ctx.view.hand.len(),
        field_size = ctx.view.field.len(),
        unseen = ctx.tracker.unseen_count(),
        scored = %preview,
        chosen = %chosen,
        reason,
    );
}

pub(crate) fn log_match_decision(
    ctx: &PolicyContext<'_>,
    difficulty: BotDifficulty,
    candidates: &Candidates,
    chosen: Card,
    reason: &str,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let offered = candidates
        .cards()
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(",");

    event!(
        target: "gostop_bot::match",
        Level::INFO,
        side = %ctx.view.side,
        difficulty = %difficulty,
        hand_size = ctx.view.hand.len(),
        field_size = ctx.view.field.len(),
        card = %candidates.card(),
        offered = %offered,
        chosen = %chosen,
        reason,
    );
}

pub(crate) fn log_go_decision(
    ctx: &PolicyContext<'_>,
    difficulty: BotDifficulty,
    go: bool,
    reason: &str,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    event!(
        target: "gostop_bot::go",
        Level::INFO,
        side = %ctx.view.side,
        difficulty = %difficulty,
        hand_size = ctx.view.hand.len(),
        field_size = ctx.view.field.len(),
        score = ctx.view.own_score.total,
        go_count = ctx.view.go_count,
        rival_score = ctx.view.rival_score.total,
        chosen = if go { "go" } else { "stop" },
        reason,
    );
}

fn decision_details_enabled() -> bool {
    std::env::var("GOSTOP_DECISION_DETAILS")
        .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(false)
}
