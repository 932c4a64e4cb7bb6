use crate::model::capture::CapturePile;
use crate::model::kind::{CardKind, RibbonKind};
use crate::model::side::Side;
use core::fmt;
use serde::Serialize;

/// A single scoring combination found in a capture pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "combination", content = "count")]
pub enum Combination {
    FiveBrights,
    FourBrights,
    RainThreeBrights,
    ThreeBrights,
    Godori,
    RedPoetryRibbons,
    PlainRibbons,
    BluePoetryRibbons,
    Ribbons(u32),
    Animals(u32),
    Junk(u32),
    Sweeps(u32),
}

impl Combination {
    fn ribbon_set(kind: RibbonKind) -> Option<Self> {
        match kind {
            RibbonKind::RedPoetry => Some(Combination::RedPoetryRibbons),
            RibbonKind::Plain => Some(Combination::PlainRibbons),
            RibbonKind::BluePoetry => Some(Combination::BluePoetryRibbons),
            RibbonKind::Rain => None,
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combination::FiveBrights => f.write_str("5 brights"),
            Combination::FourBrights => f.write_str("4 brights"),
            Combination::RainThreeBrights => f.write_str("3 brights with rain"),
            Combination::ThreeBrights => f.write_str("3 brights"),
            Combination::Godori => f.write_str("godori"),
            Combination::RedPoetryRibbons => f.write_str("red poetry ribbons"),
            Combination::PlainRibbons => f.write_str("plain ribbons"),
            Combination::BluePoetryRibbons => f.write_str("blue poetry ribbons"),
            Combination::Ribbons(n) => write!(f, "{n} ribbons"),
            Combination::Animals(n) => write!(f, "{n} animals"),
            Combination::Junk(n) => write!(f, "{n} junk"),
            Combination::Sweeps(n) => write!(f, "{n} sweeps"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreLine {
    pub combination: Combination,
    pub points: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub total: u32,
    pub lines: Vec<ScoreLine>,
    pub bright_count: u32,
    pub animal_count: u32,
    pub ribbon_count: u32,
    pub junk_weight: u32,
}

impl ScoreBreakdown {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points_for(&self, combination: Combination) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.combination == combination)
            .map(|line| line.points)
    }

    fn push(&mut self, combination: Combination, points: u32) {
        self.lines.push(ScoreLine {
            combination,
            points,
        });
        self.total += points;
    }
}

const BRIGHTS_FIVE: u32 = 15;
const BRIGHTS_FOUR: u32 = 4;
const BRIGHTS_THREE: u32 = 3;
const BRIGHTS_THREE_WITH_RAIN: u32 = 2;
const GODORI_POINTS: u32 = 5;
const RIBBON_SET_POINTS: u32 = 3;
const RIBBON_SET_SIZE: usize = 3;
const RIBBON_THRESHOLD: u32 = 5;
const ANIMAL_THRESHOLD: u32 = 5;
const JUNK_THRESHOLD: u32 = 10;

/// Scores a capture pile. Every combination is evaluated independently and summed.
pub fn score(pile: &CapturePile, sweeps: u32) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown {
        bright_count: pile.count(CardKind::Bright) as u32,
        animal_count: pile.count(CardKind::Animal) as u32,
        ribbon_count: pile.count(CardKind::Ribbon) as u32,
        junk_weight: pile.junk_weight(),
        ..ScoreBreakdown::default()
    };

    match breakdown.bright_count {
        5 => breakdown.push(Combination::FiveBrights, BRIGHTS_FIVE),
        4 => breakdown.push(Combination::FourBrights, BRIGHTS_FOUR),
        3 if pile.has_rain_bright() => {
            breakdown.push(Combination::RainThreeBrights, BRIGHTS_THREE_WITH_RAIN)
        }
        3 => breakdown.push(Combination::ThreeBrights, BRIGHTS_THREE),
        _ => {}
    }

    if pile.godori_count() == 3 {
        breakdown.push(Combination::Godori, GODORI_POINTS);
    }

    for kind in RibbonKind::SETS {
        if pile.ribbon_count(kind) >= RIBBON_SET_SIZE {
            if let Some(combination) = Combination::ribbon_set(kind) {
                breakdown.push(combination, RIBBON_SET_POINTS);
            }
        }
    }

    let ribbons = breakdown.ribbon_count;
    if ribbons >= RIBBON_THRESHOLD {
        breakdown.push(Combination::Ribbons(ribbons), 1 + ribbons - RIBBON_THRESHOLD);
    }

    let animals = breakdown.animal_count;
    if animals >= ANIMAL_THRESHOLD {
        breakdown.push(Combination::Animals(animals), 1 + animals - ANIMAL_THRESHOLD);
    }

    let junk = breakdown.junk_weight;
    if junk >= JUNK_THRESHOLD {
        breakdown.push(Combination::Junk(junk), 1 + junk - JUNK_THRESHOLD);
    }

    if sweeps > 0 {
        breakdown.push(Combination::Sweeps(sweeps), sweeps);
    }

    breakdown
}

/// Payout for stopping: score doubled once per go.
pub fn stop_payout(score: u32, go_count: u32) -> u32 {
    score.saturating_mul(2u32.saturating_pow(go_count))
}

/// Cumulative totals across the rounds of one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreBoard {
    totals: [u32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 2] }
    }

    pub fn add_payout(&mut self, side: Side, points: u32) {
        self.totals[side.index()] += points;
    }

    pub fn score(&self, side: Side) -> u32 {
        self.totals[side.index()]
    }

    pub fn standings(&self) -> &[u32; 2] {
        &self.totals
    }

    pub fn leader(&self) -> Option<Side> {
        let [player, opponent] = self.totals;
        match player.cmp(&opponent) {
            core::cmp::Ordering::Greater => Some(Side::Player),
            core::cmp::Ordering::Less => Some(Side::Opponent),
            core::cmp::Ordering::Equal => None,
        }
    }
}
