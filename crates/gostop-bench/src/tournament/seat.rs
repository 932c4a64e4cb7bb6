use std::time::{Duration, Instant};

use gostop_bot::{BotAgent, BotDifficulty};
use gostop_core::game::{Agent, AgentView};
use gostop_core::model::card::Card;
use gostop_core::rules::matching::Candidates;

/// A configured agent for one round, timing every decision it makes.
pub(super) struct Seat {
    pub(super) agent_index: usize,
    pub(super) name: String,
    pub(super) difficulty: BotDifficulty,
    bot: BotAgent,
    metrics: DecisionMetrics,
}

impl Seat {
    pub(super) fn new(agent_index: usize, name: &str, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            agent_index,
            name: name.to_string(),
            difficulty,
            bot: BotAgent::new(difficulty, seed),
            metrics: DecisionMetrics::default(),
        }
    }

    pub(super) fn summary(&self) -> DecisionSummary {
        self.metrics.summary()
    }

    fn timed<T>(&mut self, decide: impl FnOnce(&mut BotAgent) -> T) -> T {
        let start = Instant::now();
        let answer = decide(&mut self.bot);
        self.metrics.record(start.elapsed());
        answer
    }
}

impl Agent for Seat {
    fn choose_card(&mut self, view: &AgentView<'_>) -> Card {
        self.timed(|bot| bot.choose_card(view))
    }

    fn choose_match(&mut self, view: &AgentView<'_>, candidates: &Candidates) -> Card {
        self.timed(|bot| bot.choose_match(view, candidates))
    }

    fn should_go(&mut self, view: &AgentView<'_>) -> bool {
        self.timed(|bot| bot.should_go(view))
    }
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    decisions: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration) {
        self.total += duration;
        self.decisions += 1;
    }

    fn summary(&self) -> DecisionSummary {
        let total_ms = self.total.as_secs_f64() * 1000.0;
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            total_ms / f64::from(self.decisions)
        };

        DecisionSummary {
            decisions: self.decisions,
            avg_ms_per_decision: avg_ms,
            total_ms,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecisionSummary {
    pub decisions: u32,
    pub avg_ms_per_decision: f64,
    pub total_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::{DecisionMetrics, Seat};
    use gostop_bot::BotDifficulty;
    use gostop_core::game::{Agent, GameState};
    use gostop_core::model::side::Side;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    #[test]
    fn metrics_average_over_decisions() {
        let mut metrics = DecisionMetrics::default();
        assert_eq!(metrics.summary().avg_ms_per_decision, 0.0);
        metrics.record(Duration::from_millis(2));
        metrics.record(Duration::from_millis(4));
        let summary = metrics.summary();
        assert_eq!(summary.decisions, 2);
        assert!((summary.avg_ms_per_decision - 3.0).abs() < 1e-9);
        assert!((summary.total_ms - 6.0).abs() < 1e-9);
    }

    #[test]
    fn seat_counts_each_answer() {
        let mut rng = StdRng::seed_from_u64(11);
        let state = GameState::new().start_game(&mut rng).finish_deal();
        let mut seat = Seat::new(0, "normal", BotDifficulty::Normal, 11);
        let card = seat.choose_card(&state.view(Side::Player));
        assert!(state.hand(Side::Player).contains(card));
        assert_eq!(seat.summary().decisions, 1);
    }
}
