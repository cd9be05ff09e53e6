use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BanditError>;

#[derive(Error, Debug)]
pub enum BanditError {
    /// A parameter was rejected before any trial ran.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// An action id outside `[0, k)` reached the environment or the agent.
    #[error("invalid action {action}: expected an action in [0, {num_actions})")]
    InvalidAction { action: usize, num_actions: usize },
    #[error("failed to build report table: {0}")]
    Report(#[from] PolarsError),
}

impl BanditError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        BanditError::InvalidConfiguration(message.into())
    }
}

/// Rejects an action id that does not index one of `num_actions` arms.
pub(crate) fn check_action(action: usize, num_actions: usize) -> Result<()> {
    if action < num_actions {
        Ok(())
    } else {
        Err(BanditError::InvalidAction { action, num_actions })
    }
}
