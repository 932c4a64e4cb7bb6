use crate::bot::BotDifficulty;
use crate::policy::{Policy, PolicyContext, policy_for};
use gostop_core::game::{Agent, AgentView};
use gostop_core::model::card::Card;
use gostop_core::rules::matching::Candidates;

/// Adapts a difficulty policy to the engine's agent seam.
pub struct BotAgent {
    policy: Box<dyn Policy>,
}

impl BotAgent {
    pub fn new(difficulty: BotDifficulty, seed: u64) -> Self {
        Self::with_policy(policy_for(difficulty, seed))
    }

    /// Tier chosen by `GOSTOP_BOT_DIFFICULTY`.
    pub fn from_env(seed: u64) -> Self {
        Self::new(BotDifficulty::from_env(), seed)
    }

    pub fn with_policy(policy: Box<dyn Policy>) -> Self {
        Self { policy }
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.policy.difficulty()
    }
}

impl Agent for BotAgent {
    fn choose_card(&mut self, view: &AgentView<'_>) -> Card {
        self.policy.choose_card(&PolicyContext::new(*view))
    }

    fn choose_match(&mut self, view: &AgentView<'_>, candidates: &Candidates) -> Card {
        self.policy
            .choose_match(&PolicyContext::new(*view), candidates)
    }

    fn should_go(&mut self, view: &AgentView<'_>) -> bool {
        self.policy.should_go(&PolicyContext::new(*view))
    }
}

#[cfg(test)]
mod tests {
    use super::BotAgent;
    use crate::bot::BotDifficulty;
    use crate::policy::NormalPolicy;

    #[test]
    fn reports_policy_tier() {
        assert_eq!(BotAgent::new(BotDifficulty::Hard, 0).difficulty(), BotDifficulty::Hard);
        let agent = BotAgent::with_policy(Box::new(NormalPolicy));
        assert_eq!(agent.difficulty(), BotDifficulty::Normal);
    }
}
