mod seat;
mod standings;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gostop_bot::{BotDifficulty, ParseDifficultyError};
use gostop_core::game::{Agent, GameState, Phase, RoundOutcome};
use gostop_core::model::card::Card;
use gostop_core::model::side::Side;
use gostop_core::rules::matching::Candidates;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BenchmarkConfig, ResolvedOutputs};
use crate::logging::telemetry_dir;

pub use seat::DecisionSummary;
pub use standings::{AgentStanding, Standings};

use seat::Seat;
use standings::{SeatResult, SeatTally};

/// Upper bound on engine transitions per round; a finished round needs far fewer.
const MAX_STEPS_PER_ROUND: usize = 512;

/// Primary entry point for orchestrating tournaments.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub rounds_played: usize,
    pub seatings: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
    pub standings: Standings,
}

#[derive(Debug, Clone)]
struct AgentBlueprint {
    name: String,
    difficulty: BotDifficulty,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = config
            .agents
            .iter()
            .map(|agent| {
                agent
                    .difficulty()
                    .map(|difficulty| AgentBlueprint {
                        name: agent.name.clone(),
                        difficulty,
                    })
                    .map_err(|source| RunnerError::Agent {
                        name: agent.name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if agents.len() != 2 {
            return Err(RunnerError::AgentCount {
                found: agents.len(),
            });
        }

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            agents,
        })
    }

    /// Execute the tournament, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.deals.seed.unwrap_or(0));
        let seatings = self.config.deals.seatings();
        let mut standings = Standings::new(
            self.agents
                .iter()
                .map(|agent| (agent.name.clone(), agent.difficulty)),
        );
        let mut rows_written = 0usize;

        for round_index in 0..self.config.deals.rounds {
            let deal_seed = rng.next_u64();

            for seating in 0..seatings {
                let outcome = self.play_round(round_index, seating, deal_seed)?;
                standings.record(&outcome.tallies());
                rows_written += write_round_rows(
                    &mut writer,
                    &self.config.run_id,
                    round_index,
                    seating,
                    deal_seed,
                    &outcome,
                )?;
            }
        }

        writer.flush()?;
        standings.write_markdown(&self.outputs.summary_md, &self.config.run_id)?;

        let telemetry_path = if self.logging_enabled {
            Some(telemetry_dir(&self.outputs).join("telemetry.jsonl"))
        } else {
            None
        };

        Ok(RunSummary {
            rounds_played: self.config.deals.rounds,
            seatings,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
            standings,
        })
    }

    /// Plays one deal. Seating 0 puts the first agent on the player side;
    /// seating 1 swaps the sides over the same shuffle.
    fn play_round(
        &self,
        round_index: usize,
        seating: usize,
        deal_seed: u64,
    ) -> Result<RoundRecord, RunnerError> {
        let (player_index, opponent_index) = if seating == 0 { (0, 1) } else { (1, 0) };
        let mut player = self.seat(player_index, deal_seed);
        let mut opponent = self.seat(opponent_index, deal_seed);

        let mut rng = StdRng::seed_from_u64(deal_seed);
        let mut state = GameState::new().start_game(&mut rng);
        let mut steps = 0usize;

        let outcome = loop {
            if let Phase::RoundEnd { outcome } = state.phase() {
                break *outcome;
            }
            if steps >= MAX_STEPS_PER_ROUND {
                return Err(RunnerError::game(format!(
                    "round {round_index} seating {seating} did not finish in {MAX_STEPS_PER_ROUND} steps"
                )));
            }

            let next = advance(&state, &mut player, &mut opponent);
            if next == state {
                return Err(RunnerError::game(format!(
                    "round {round_index} seating {seating} stalled in phase {}",
                    state.phase().name()
                )));
            }
            if let Err(err) = next.check_conservation() {
                return Err(RunnerError::game(format!(
                    "round {round_index} seating {seating}: {err}"
                )));
            }
            state = next;
            steps += 1;
        };

        if self.logging_enabled && tracing::enabled!(Level::INFO) {
            let winner = outcome
                .winner()
                .map(|side| side.to_string())
                .unwrap_or_else(|| "none".to_string());
            event!(
                target: "gostop_bench::round",
                Level::INFO,
                run_id = %self.config.run_id,
                round_index = round_index as u32,
                seating = seating as u32,
                deal_seed,
                player = %player.name,
                opponent = %opponent.name,
                winner = %winner,
                payout = outcome.payout(),
                steps = steps as u32,
            );
        }

        Ok(RoundRecord {
            outcome,
            seats: [
                SeatRecord::capture(&state, Side::Player, &player),
                SeatRecord::capture(&state, Side::Opponent, &opponent),
            ],
        })
    }

    fn seat(&self, agent_index: usize, deal_seed: u64) -> Seat {
        let agent = &self.agents[agent_index];
        Seat::new(
            agent_index,
            &agent.name,
            agent.difficulty,
            deal_seed.wrapping_add(agent_index as u64),
        )
    }
}

/// One engine transition: timer events fire immediately, decisions go to the
/// seat on turn.
fn advance(state: &GameState, player: &mut Seat, opponent: &mut Seat) -> GameState {
    match state.phase() {
        Phase::Dealing => state.finish_deal(),
        Phase::PlayerFlipsDeck { .. } => state.flip_deck(),
        Phase::OpponentTurn => state.trigger_opponent(opponent),
        Phase::PlayerPicksCard => {
            let card = player.choose_card(&state.view(Side::Player));
            state.select_card(card)
        }
        Phase::PlayerPicksMatch { pending } => {
            let choice = player_match(state, pending.card, player);
            state.select_match(choice)
        }
        Phase::PlayerPicksFlipMatch { flip, .. } => {
            let choice = player_match(state, flip.card, player);
            state.select_flip_match(choice)
        }
        Phase::GoStopDecision => {
            if player.should_go(&state.view(Side::Player)) {
                state.player_go()
            } else {
                state.player_stop()
            }
        }
        Phase::Idle | Phase::RoundEnd { .. } => state.clone(),
    }
}

fn player_match(state: &GameState, card: Card, player: &mut Seat) -> Card {
    let field = state.match_field();
    let candidates = Candidates::find(card, &field);
    let in_flight = state.phase().in_flight();
    let view = state.view_with_table(Side::Player, &field, &in_flight);
    player.choose_match(&view, &candidates)
}

struct RoundRecord {
    outcome: RoundOutcome,
    seats: [SeatRecord; 2],
}

impl RoundRecord {
    fn tallies(&self) -> Vec<SeatTally> {
        self.seats
            .iter()
            .map(|seat| SeatTally {
                agent_index: seat.agent_index,
                result: self.result_for(seat.side),
                payout: self.outcome.payout(),
                go_count: seat.go_count,
                decisions: seat.metrics.decisions,
                total_ms: seat.metrics.total_ms,
            })
            .collect()
    }

    fn result_for(&self, side: Side) -> SeatResult {
        match self.outcome.winner() {
            Some(winner) if winner == side => SeatResult::Won,
            Some(_) => SeatResult::Lost,
            None => SeatResult::Draw,
        }
    }
}

struct SeatRecord {
    side: Side,
    agent_index: usize,
    name: String,
    difficulty: BotDifficulty,
    score: u32,
    go_count: u32,
    sweeps: u32,
    captured: usize,
    metrics: DecisionSummary,
}

impl SeatRecord {
    fn capture(state: &GameState, side: Side, seat: &Seat) -> Self {
        let side_state = state.side(side);
        Self {
            side,
            agent_index: seat.agent_index,
            name: seat.name.clone(),
            difficulty: seat.difficulty,
            score: side_state.score().total,
            go_count: side_state.go_count(),
            sweeps: side_state.sweeps(),
            captured: side_state.capture().len(),
            metrics: seat.summary(),
        }
    }
}

#[derive(Serialize)]
struct RoundLogRow {
    run_id: String,
    deal_id: String,
    round_index: usize,
    seating: usize,
    deal_seed: u64,
    side: Side,
    bot: String,
    difficulty: String,
    opponent: String,
    result: &'static str,
    payout: i64,
    score: u32,
    go_count: u32,
    sweeps: u32,
    captured: usize,
    decisions: u32,
    speed_ms_decision: f64,
}

fn write_round_rows(
    writer: &mut BufWriter<File>,
    run_id: &str,
    round_index: usize,
    seating: usize,
    deal_seed: u64,
    record: &RoundRecord,
) -> Result<usize, RunnerError> {
    let deal_id = format!("R{round_index:05}_S{seating}");
    let payout = i64::from(record.outcome.payout());

    let mut rows_written = 0usize;
    for (index, seat) in record.seats.iter().enumerate() {
        let rival = &record.seats[1 - index];
        let result = record.result_for(seat.side);
        let row = RoundLogRow {
            run_id: run_id.to_string(),
            deal_id: deal_id.clone(),
            round_index,
            seating,
            deal_seed,
            side: seat.side,
            bot: seat.name.clone(),
            difficulty: seat.difficulty.to_string(),
            opponent: rival.name.clone(),
            result: result.as_str(),
            payout: match result {
                SeatResult::Won => payout,
                SeatResult::Lost => -payout,
                SeatResult::Draw => 0,
            },
            score: seat.score,
            go_count: seat.go_count,
            sweeps: seat.sweeps,
            captured: seat.captured,
            decisions: seat.metrics.decisions,
            speed_ms_decision: seat.metrics.avg_ms_per_decision,
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }

    Ok(rows_written)
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("agent '{name}': {source}")]
    Agent {
        name: String,
        #[source]
        source: ParseDifficultyError,
    },
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {message}")]
    Game { message: String },
    #[error("configuration requires exactly 2 agents but found {found}")]
    AgentCount { found: usize },
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}
