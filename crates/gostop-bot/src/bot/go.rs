/// Score bands under which a tier keeps playing after a scoring event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoThresholds {
    /// Go whenever the score is at most this.
    pub always: u32,
    /// Go while fewer than two gos have been declared.
    pub early: u32,
    /// Go only for the first declaration.
    pub first: Option<u32>,
    /// No further go once this many have been declared.
    pub cap: u32,
}

impl GoThresholds {
    pub const NEVER: GoThresholds = GoThresholds {
        always: 0,
        early: 0,
        first: None,
        cap: 0,
    };

    pub const NORMAL: GoThresholds = GoThresholds {
        always: 2,
        early: 4,
        first: None,
        cap: 3,
    };

    pub const HARD: GoThresholds = GoThresholds {
        always: 3,
        early: 5,
        first: Some(7),
        cap: 4,
    };

    pub const INSANE: GoThresholds = GoThresholds {
        always: 4,
        early: 7,
        first: Some(10),
        cap: 5,
    };

    pub const CAUTIOUS: GoThresholds = GoThresholds {
        always: 0,
        early: 2,
        first: None,
        cap: 2,
    };

    pub fn should_go(&self, score: u32, go_count: u32) -> bool {
        if go_count >= self.cap {
            return false;
        }
        if score <= self.always {
            return true;
        }
        if score <= self.early && go_count < 2 {
            return true;
        }
        matches!(self.first, Some(limit) if go_count == 0 && score <= limit)
    }
}
