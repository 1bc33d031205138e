pub mod agent;
pub mod config;
pub mod env;
pub mod error;
pub mod render;
pub mod state_space;

pub use agent::{Action, Agent, AgentId, Coord, JointAction, PerAgent};
pub use config::WorldConfig;
pub use env::{Goal, StepOutcome, World};
pub use error::WorldError;
pub use state_space::StateSpace;
