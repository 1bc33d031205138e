use thiserror::Error;

use crate::agent::AgentId;

#[derive(Error, Debug)]
pub enum WorldError {
    #[error("World size has not been set")]
    WorldSizeNotSet,

    #[error("Invalid world size: {cols}x{rows}")]
    InvalidWorldSize { cols: usize, rows: usize },

    #[error("Agent {0} has not been placed")]
    AgentNotPlaced(AgentId),

    #[error("Goal for agent {0} has not been set")]
    GoalNotSet(AgentId),

    #[error("Invalid goal reward for agent {id}: {reward}")]
    InvalidReward { id: AgentId, reward: f32 },

    #[error("Agent {id} at ({x}, {y}) is outside the {cols}x{rows} grid")]
    AgentOutOfBounds {
        id: AgentId,
        x: usize,
        y: usize,
        cols: usize,
        rows: usize,
    },

    #[error("Agents share the cell ({x}, {y})")]
    AgentsOverlap { x: usize, y: usize },

    #[error("Both agents hold the ball")]
    BallContested,

    #[error("State space of a {cols}x{rows} grid is too large")]
    StateSpaceTooLarge { cols: usize, rows: usize },

    #[error("Invalid action: {0:?}")]
    InvalidAction(String),

    #[error("Invalid action index: {0}")]
    InvalidActionIndex(usize),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorldError {
    /// Errors raised by a world that is not ready to step.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            WorldError::WorldSizeNotSet
                | WorldError::InvalidWorldSize { .. }
                | WorldError::AgentNotPlaced(_)
                | WorldError::GoalNotSet(_)
                | WorldError::InvalidReward { .. }
                | WorldError::AgentOutOfBounds { .. }
                | WorldError::AgentsOverlap { .. }
                | WorldError::BallContested
        )
    }
}
