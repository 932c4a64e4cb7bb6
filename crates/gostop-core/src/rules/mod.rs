pub mod capture;
pub mod matching;

pub use capture::{Step, TurnCapture, field_after_play, flip_field, resolve_from_start, resolve_turn};
pub use matching::{Candidates, MatchKind, find_matches};
