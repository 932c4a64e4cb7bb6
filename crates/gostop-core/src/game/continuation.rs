use serde::Serialize;
use std::time::Duration;

/// Timer-driven advance the host is expected to schedule. The engine never waits
/// on its own; the host calls the matching action once the delay has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Continuation {
    FinishDeal,
    FlipDeck,
    OpponentMove,
}

impl Continuation {
    pub const fn delay(self) -> Duration {
        match self {
            Continuation::FinishDeal => Duration::from_millis(800),
            Continuation::FlipDeck => Duration::from_millis(500),
            Continuation::OpponentMove => Duration::from_millis(1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Continuation;
    use std::time::Duration;

    #[test]
    fn delays_are_fixed() {
        assert_eq!(Continuation::FinishDeal.delay(), Duration::from_millis(800));
        assert_eq!(Continuation::OpponentMove.delay(), Duration::from_secs(1));
    }
}
