pub mod agent;
pub mod continuation;
pub mod events;
pub mod phase;
pub mod serialization;
pub mod state;

pub use agent::{Agent, AgentView};
pub use continuation::Continuation;
pub use phase::{PendingMatch, Phase, RoundOutcome};
pub use state::{Action, ConservationError, GameState, SideState};
