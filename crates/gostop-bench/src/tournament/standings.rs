use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use gostop_bot::BotDifficulty;

/// Per-agent tallies across every round and seating.
#[derive(Debug, Clone)]
pub struct AgentStanding {
    pub name: String,
    pub difficulty: BotDifficulty,
    pub rounds: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub gos: u64,
    pub payout_won: u64,
    pub payout_lost: u64,
    pub decisions: u64,
    pub total_ms: f64,
}

impl AgentStanding {
    fn new(name: &str, difficulty: BotDifficulty) -> Self {
        Self {
            name: name.to_string(),
            difficulty,
            rounds: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            gos: 0,
            payout_won: 0,
            payout_lost: 0,
            decisions: 0,
            total_ms: 0.0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins as f64, self.rounds as f64)
    }

    /// Average payout of the rounds this agent stopped.
    pub fn avg_payout(&self) -> f64 {
        ratio(self.payout_won as f64, self.wins as f64)
    }

    pub fn net_payout(&self) -> i64 {
        self.payout_won as i64 - self.payout_lost as i64
    }

    pub fn avg_ms_per_decision(&self) -> f64 {
        ratio(self.total_ms, self.decisions as f64)
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// What one agent did in one finished round.
#[derive(Debug, Clone, Copy)]
pub(super) struct SeatTally {
    pub(super) agent_index: usize,
    pub(super) result: SeatResult,
    pub(super) payout: u32,
    pub(super) go_count: u32,
    pub(super) decisions: u32,
    pub(super) total_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SeatResult {
    Won,
    Lost,
    Draw,
}

impl SeatResult {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            SeatResult::Won => "won",
            SeatResult::Lost => "lost",
            SeatResult::Draw => "draw",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Standings {
    agents: Vec<AgentStanding>,
    rounds: usize,
}

impl Standings {
    pub(super) fn new(agents: impl IntoIterator<Item = (String, BotDifficulty)>) -> Self {
        Self {
            agents: agents
                .into_iter()
                .map(|(name, difficulty)| AgentStanding::new(&name, difficulty))
                .collect(),
            rounds: 0,
        }
    }

    pub(super) fn record(&mut self, tallies: &[SeatTally]) {
        self.rounds += 1;
        for tally in tallies {
            let Some(agent) = self.agents.get_mut(tally.agent_index) else {
                continue;
            };
            agent.rounds += 1;
            agent.gos += u64::from(tally.go_count);
            agent.decisions += u64::from(tally.decisions);
            agent.total_ms += tally.total_ms;
            match tally.result {
                SeatResult::Won => {
                    agent.wins += 1;
                    agent.payout_won += u64::from(tally.payout);
                }
                SeatResult::Lost => {
                    agent.losses += 1;
                    agent.payout_lost += u64::from(tally.payout);
                }
                SeatResult::Draw => agent.draws += 1,
            }
        }
    }

    pub fn agents(&self) -> &[AgentStanding] {
        &self.agents
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn to_markdown(&self, run_id: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Tournament Summary\n");
        let _ = writeln!(out, "Run `{run_id}`: {} rounds played\n", self.rounds);
        out.push_str("| Agent | Tier | Rounds | Wins | Losses | Draws | Win % | Gos | Avg payout | Net payout | Avg ms/decision |\n");
        out.push_str("|-------|------|--------|------|--------|-------|-------|-----|------------|------------|-----------------|\n");
        for agent in &self.agents {
            let _ = writeln!(
                out,
                "| {name} | {tier} | {rounds} | {wins} | {losses} | {draws} | {win:.1}% | {gos} | {avg:.2} | {net:+} | {latency:.3} |",
                name = agent.name,
                tier = agent.difficulty,
                rounds = agent.rounds,
                wins = agent.wins,
                losses = agent.losses,
                draws = agent.draws,
                win = agent.win_rate() * 100.0,
                gos = agent.gos,
                avg = agent.avg_payout(),
                net = agent.net_payout(),
                latency = agent.avg_ms_per_decision(),
            );
        }
        out
    }

    pub(super) fn write_markdown(&self, path: &Path, run_id: &str) -> std::io::Result<()> {
        fs::write(path, self.to_markdown(run_id))
    }
}

#[cfg(test)]
mod tests {
    use super::{SeatResult, SeatTally, Standings};
    use gostop_bot::BotDifficulty;

    fn tally(agent_index: usize, result: SeatResult, payout: u32, go_count: u32) -> SeatTally {
        SeatTally {
            agent_index,
            result,
            payout,
            go_count,
            decisions: 10,
            total_ms: 1.0,
        }
    }

    fn standings() -> Standings {
        Standings::new([
            ("normal".to_string(), BotDifficulty::Normal),
            ("hard".to_string(), BotDifficulty::Hard),
        ])
    }

    #[test]
    fn wins_losses_and_draws_accumulate() {
        let mut table = standings();
        table.record(&[tally(0, SeatResult::Won, 6, 1), tally(1, SeatResult::Lost, 6, 0)]);
        table.record(&[tally(1, SeatResult::Won, 3, 0), tally(0, SeatResult::Lost, 3, 0)]);
        table.record(&[tally(0, SeatResult::Draw, 0, 0), tally(1, SeatResult::Draw, 0, 0)]);

        assert_eq!(table.rounds(), 3);
        let normal = &table.agents()[0];
        assert_eq!((normal.wins, normal.losses, normal.draws), (1, 1, 1));
        assert_eq!(normal.gos, 1);
        assert_eq!(normal.net_payout(), 3);
        assert!((normal.avg_payout() - 6.0).abs() < 1e-9);
        assert!((normal.avg_ms_per_decision() - 0.1).abs() < 1e-9);

        let hard = &table.agents()[1];
        assert_eq!(hard.net_payout(), -3);
        assert!((hard.win_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn markdown_lists_every_agent() {
        let mut table = standings();
        table.record(&[tally(0, SeatResult::Won, 4, 0), tally(1, SeatResult::Lost, 4, 0)]);
        let markdown = table.to_markdown("demo");
        assert!(markdown.starts_with("# Tournament Summary"));
        assert!(markdown.contains("| normal | normal | 1 | 1 | 0 | 0 | 100.0% |"));
        assert!(markdown.contains("| hard | hard | 1 | 0 | 1 | 0 | 0.0% |"));
    }
}
