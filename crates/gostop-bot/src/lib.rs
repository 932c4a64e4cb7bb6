pub mod agent;
pub mod bot;
pub mod policy;

pub use agent::BotAgent;
pub use bot::{
    BotDifficulty, GoThresholds, MatchPlanner, ParseDifficultyError, PlayPlanner, PlayWeights,
    ScoredCard, UnseenTracker, card_priority,
};
pub use policy::{
    EasyPolicy, HardPolicy, ImpossiblePolicy, InsanePolicy, NormalPolicy, Policy, PolicyContext,
    policy_for,
};
