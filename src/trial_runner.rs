use tracing::{ debug, trace };

use crate::config::{ ExperimentConfig, OptimalityCriterion };
use crate::environments::{ argmax, GaussianBanditEnvironment };
use crate::epsilon_greedy_agent::EpsilonGreedyAgent;
use crate::error::{ BanditError, Result };

/// What happened on one timestep of a trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestepRecord {
    /// Reward received for the action the agent took.
    pub reward_received: f64,
    /// Whether the action taken was the optimal one on this timestep.
    pub was_optimal: bool,
    /// Share of optimal actions over the timesteps before this one, in percent.
    pub percent_optimal: f64,
}

/// Records of one trial, index is the timestep.
pub type Trajectory = Vec<TimestepRecord>;

/// Runs one trial: a fresh environment and a fresh agent playing for `num_timesteps` turns.
/// Nothing is shared with other trials, so trials with different seeds may run in parallel.
#[derive(Debug, Clone)]
pub struct TrialRunner {
    num_timesteps: usize,
    seed: u64,
    optimality: OptimalityCriterion,
    environment: GaussianBanditEnvironment,
    agent: EpsilonGreedyAgent,
}

impl TrialRunner {
    pub fn new(num_actions: usize, epsilon: f64, num_timesteps: usize, seed: u64) -> Result<Self> {
        if num_timesteps == 0 {
            return Err(BanditError::config("number of timesteps must be at least 1"));
        }
        Ok(TrialRunner {
            num_timesteps,
            seed,
            optimality: OptimalityCriterion::default(),
            environment: GaussianBanditEnvironment::new(num_actions, seed)?,
            agent: EpsilonGreedyAgent::new(num_actions, epsilon)?,
        })
    }

    pub fn from_config(config: &ExperimentConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(
            Self::new(
                config.num_actions,
                config.epsilon,
                config.num_timesteps,
                seed
            )?.with_optimality(config.optimality)
        )
    }

    pub fn with_optimality(mut self, optimality: OptimalityCriterion) -> Self {
        self.optimality = optimality;
        self
    }

    /// Plays the trial to the end and returns its trajectory.
    pub fn run(mut self) -> Result<Trajectory> {
        let mut trajectory = Vec::with_capacity(self.num_timesteps);
        let mut optimal_count: usize = 0;
        let true_optimal_action = self.environment.optimal_action();

        for timestep in 0..self.num_timesteps {
            let action = self.agent.select_action(timestep, self.environment.rng());
            let reward = self.environment.sample(action)?;

            let best_action = match self.optimality {
                OptimalityCriterion::SampledRewards => argmax(&self.environment.sample_all()),
                OptimalityCriterion::TrueValues => true_optimal_action,
            };
            let was_optimal = action == best_action;

            self.agent.update(action, reward)?;

            // Counts timesteps [0, timestep), the current one is not included yet.
            let percent_optimal = if timestep == 0 {
                0.0
            } else {
                (100.0 * (optimal_count as f64)) / (timestep as f64)
            };
            if was_optimal {
                optimal_count += 1;
            }

            trace!(timestep, action, reward, was_optimal, "trial step");
            trajectory.push(TimestepRecord {
                reward_received: reward,
                was_optimal,
                percent_optimal,
            });
        }

        debug!(
            seed = self.seed,
            epsilon = self.agent.epsilon(),
            optimal_count,
            "finished trial"
        );
        Ok(trajectory)
    }

    pub fn environment(&self) -> &GaussianBanditEnvironment {
        &self.environment
    }

    pub fn agent(&self) -> &EpsilonGreedyAgent {
        &self.agent
    }
}
