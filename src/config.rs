use crate::constants::{ NUM_OF_ACTIONS, NUM_OF_TIMESTEPS, NUM_OF_TRIALS };
use crate::error::{ BanditError, Result };

/// Decides which action counts as optimal on a given timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimalityCriterion {
    /// Draw one reward per action on every timestep and take the best draw.
    #[default]
    SampledRewards,
    /// Compare against the action with the highest hidden true value.
    TrueValues,
}

/// How the aggregator schedules trials. Both modes give bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    Sequential,
    #[default]
    Parallel,
}

/// Parameters of one experiment: N trials of T timesteps for a single epsilon.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    pub num_actions: usize,
    pub epsilon: f64,
    pub num_timesteps: usize,
    pub num_trials: usize,
    pub optimality: OptimalityCriterion,
    pub execution: ExecutionMode,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            num_actions: NUM_OF_ACTIONS,
            epsilon: 0.0,
            num_timesteps: NUM_OF_TIMESTEPS,
            num_trials: NUM_OF_TRIALS,
            optimality: OptimalityCriterion::default(),
            execution: ExecutionMode::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn new(num_actions: usize, epsilon: f64, num_timesteps: usize, num_trials: usize) -> Self {
        ExperimentConfig {
            num_actions,
            epsilon,
            num_timesteps,
            num_trials,
            ..Default::default()
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_optimality(mut self, optimality: OptimalityCriterion) -> Self {
        self.optimality = optimality;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_actions == 0 {
            return Err(BanditError::config("number of actions must be at least 1"));
        }
        if self.num_timesteps == 0 {
            return Err(BanditError::config("number of timesteps must be at least 1"));
        }
        if self.num_trials == 0 {
            return Err(BanditError::config("number of trials must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(
                BanditError::config(format!("epsilon must be in the range [0, 1], got {}", self.epsilon))
            );
        }
        Ok(())
    }
}
