use survivor_bt::BtError;
use survivor_core::BlackboardError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("invalid behavior tree: {0}")]
    Tree(#[from] BtError),

    #[error("failed to seed blackboard: {0}")]
    Blackboard(#[from] BlackboardError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
