mod eval;
mod go;
mod play;
mod tracker;

pub use eval::{
    denial_value, discard_risk, exposed_brights, flip_extension, followups, open_pairs,
    projected_field, score_gain,
};
pub use go::GoThresholds;
pub use play::{MatchPlanner, PlayPlanner, PlayWeights, ScoredCard};
pub use tracker::UnseenTracker;

use gostop_core::model::card::Card;
use gostop_core::model::kind::CardKind;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotDifficulty {
    Easy,
    Normal,
    Hard,
    Insane,
    Impossible,
}

impl Default for BotDifficulty {
    fn default() -> Self {
        Self::Normal
    }
}

impl BotDifficulty {
    pub const ALL: [BotDifficulty; 5] = [
        BotDifficulty::Easy,
        BotDifficulty::Normal,
        BotDifficulty::Hard,
        BotDifficulty::Insane,
        BotDifficulty::Impossible,
    ];

    /// Reads `GOSTOP_BOT_DIFFICULTY` once per process; unknown values fall back
    /// to the default tier.
    pub fn from_env() -> Self {
        static CACHED: OnceLock<BotDifficulty> = OnceLock::new();
        *CACHED.get_or_init(|| {
            Self::from_setting(std::env::var("GOSTOP_BOT_DIFFICULTY").ok().as_deref())
        })
    }

    pub fn from_setting(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BotDifficulty::Easy => "easy",
            BotDifficulty::Normal => "normal",
            BotDifficulty::Hard => "hard",
            BotDifficulty::Insane => "insane",
            BotDifficulty::Impossible => "impossible",
        }
    }
}

impl fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError(String);

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown bot difficulty '{}'", self.0)
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for BotDifficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "beginner" => Ok(BotDifficulty::Easy),
            "normal" | "default" | "medium" => Ok(BotDifficulty::Normal),
            "hard" => Ok(BotDifficulty::Hard),
            "insane" | "expert" => Ok(BotDifficulty::Insane),
            "impossible" | "max" => Ok(BotDifficulty::Impossible),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Shared value of a card for every tier.
pub const fn card_priority(card: Card) -> i32 {
    match card.kind {
        CardKind::Bright => 10,
        CardKind::Animal => 5,
        CardKind::Ribbon => 3,
        CardKind::Junk => 1,
    }
}

pub fn priority_sum(cards: &[Card]) -> i32 {
    cards.iter().copied().map(card_priority).sum()
}

/// Lowest priority card; ties keep hand order.
pub fn lowest_priority(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().min_by_key(|card| card_priority(*card))
}

/// Highest priority card; ties keep the first one offered.
pub fn highest_priority(cards: &[Card]) -> Option<Card> {
    cards
        .iter()
        .copied()
        .rev()
        .max_by_key(|card| card_priority(*card))
}

#[cfg(test)]
mod tests {
    use super::{BotDifficulty, card_priority, highest_priority, lowest_priority};
    use gostop_core::model::card::Card;

    fn cards(ids: &[u8]) -> Vec<Card> {
        ids.iter().map(|&id| Card::from_id(id).unwrap()).collect()
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("Hard".parse::<BotDifficulty>(), Ok(BotDifficulty::Hard));
        assert_eq!(" expert ".parse::<BotDifficulty>(), Ok(BotDifficulty::Insane));
        assert_eq!("max".parse::<BotDifficulty>(), Ok(BotDifficulty::Impossible));
        assert!("grandmaster".parse::<BotDifficulty>().is_err());
    }

    #[test]
    fn setting_falls_back_to_normal() {
        assert_eq!(BotDifficulty::from_setting(None), BotDifficulty::Normal);
        assert_eq!(BotDifficulty::from_setting(Some("??")), BotDifficulty::Normal);
        assert_eq!(BotDifficulty::from_setting(Some("easy")), BotDifficulty::Easy);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for difficulty in BotDifficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<BotDifficulty>(), Ok(difficulty));
        }
    }

    #[test]
    fn priorities_follow_kind() {
        let [bright, animal, ribbon, junk] = [0, 4, 1, 2].map(|id| Card::from_id(id).unwrap());
        assert_eq!(card_priority(bright), 10);
        assert_eq!(card_priority(animal), 5);
        assert_eq!(card_priority(ribbon), 3);
        assert_eq!(card_priority(junk), 1);
    }

    #[test]
    fn extremes_break_ties_by_order() {
        let hand = cards(&[2, 3, 4, 0]);
        assert_eq!(lowest_priority(&hand), Some(hand[0]));
        assert_eq!(highest_priority(&hand), Some(hand[3]));
        let ribbons = cards(&[1, 5]);
        assert_eq!(highest_priority(&ribbons), Some(ribbons[0]));
    }
}
