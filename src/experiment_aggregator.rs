use rayon::prelude::*;
use std::time::Instant;
use tracing::{ debug, info };

use crate::config::{ ExecutionMode, ExperimentConfig };
use crate::constants::{ EPSILONS, PARALLEL_BATCH_SIZE };
use crate::error::{ BanditError, Result };
use crate::trial_runner::{ Trajectory, TrialRunner };

/// Learning curves for one epsilon, averaged over all trials. Index is the timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResult {
    pub epsilon: f64,
    pub num_trials: usize,
    pub mean_reward: Vec<f64>,
    pub percent_optimal: Vec<f64>,
}

impl AggregatedResult {
    pub fn num_timesteps(&self) -> usize {
        self.mean_reward.len()
    }

    /// Average reward on the last timestep.
    pub fn final_mean_reward(&self) -> f64 {
        self.mean_reward.last().copied().unwrap_or(0.0)
    }

    /// Average percent of optimal actions on the last timestep.
    pub fn final_percent_optimal(&self) -> f64 {
        self.percent_optimal.last().copied().unwrap_or(0.0)
    }

    /// Rows `(timestep, mean_reward, percent_optimal)` for timesteps 0, interval, 2 * interval...
    pub fn sampled(&self, interval: usize) -> Result<Vec<(usize, f64, f64)>> {
        if interval == 0 {
            return Err(BanditError::config("report interval must be at least 1"));
        }
        Ok(
            (0..self.num_timesteps())
                .step_by(interval)
                .map(|t| (t, self.mean_reward[t], self.percent_optimal[t]))
                .collect()
        )
    }
}

/// Element-wise sums of trajectories. Trajectories must be added in trial order for the
/// result to be reproducible bit for bit.
struct RunningSums {
    reward: Vec<f64>,
    percent_optimal: Vec<f64>,
    num_trials: usize,
}

impl RunningSums {
    fn new(num_timesteps: usize) -> Self {
        RunningSums {
            reward: vec![0.0; num_timesteps],
            percent_optimal: vec![0.0; num_timesteps],
            num_trials: 0,
        }
    }

    fn add(&mut self, trajectory: &Trajectory) {
        for (t, record) in trajectory.iter().enumerate() {
            self.reward[t] += record.reward_received;
            self.percent_optimal[t] += record.percent_optimal;
        }
        self.num_trials += 1;
    }

    fn finish(self, epsilon: f64) -> AggregatedResult {
        let n = self.num_trials as f64;
        AggregatedResult {
            epsilon,
            num_trials: self.num_trials,
            mean_reward: self.reward
                .into_iter()
                .map(|sum| sum / n)
                .collect(),
            percent_optimal: self.percent_optimal
                .into_iter()
                .map(|sum| sum / n)
                .collect(),
        }
    }
}

/// Runs `num_trials` independent trials for one epsilon and averages their trajectories.
/// Trial `n` is seeded with `n`.
#[derive(Debug, Clone)]
pub struct ExperimentAggregator {
    config: ExperimentConfig,
}

impl ExperimentAggregator {
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        Ok(ExperimentAggregator { config })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn run(&self) -> Result<AggregatedResult> {
        let start_time = Instant::now();
        let mut sums = RunningSums::new(self.config.num_timesteps);

        match self.config.execution {
            ExecutionMode::Sequential => self.run_sequential(&mut sums)?,
            ExecutionMode::Parallel => self.run_in_parallel(&mut sums)?,
        }

        let result = sums.finish(self.config.epsilon);
        info!(
            epsilon = self.config.epsilon,
            trials = result.num_trials,
            final_mean_reward = result.final_mean_reward(),
            final_percent_optimal = result.final_percent_optimal(),
            elapsed = ?start_time.elapsed(),
            "finished experiment"
        );
        Ok(result)
    }

    fn run_trial(&self, seed: u64) -> Result<Trajectory> {
        TrialRunner::from_config(&self.config, seed)?.run()
    }

    fn run_sequential(&self, sums: &mut RunningSums) -> Result<()> {
        for seed in 0..self.config.num_trials as u64 {
            let trajectory = self.run_trial(seed)?;
            sums.add(&trajectory);
        }
        Ok(())
    }

    /// Trials of a batch run on the rayon pool. The batch is collected in seed order and
    /// folded into the sums by this thread, so the summation order never changes.
    fn run_in_parallel(&self, sums: &mut RunningSums) -> Result<()> {
        let seeds: Vec<u64> = (0..self.config.num_trials as u64).collect();
        for batch in seeds.chunks(PARALLEL_BATCH_SIZE) {
            let trajectories: Vec<Trajectory> = batch
                .par_iter()
                .map(|&seed| self.run_trial(seed))
                .collect::<Result<Vec<_>>>()?;
            for trajectory in &trajectories {
                sums.add(trajectory);
            }
            debug!(completed = sums.num_trials, "folded batch of trials");
        }
        Ok(())
    }
}

/// Runs the same experiment for several exploration rates.
#[derive(Debug, Clone)]
pub struct ExperimentSuite {
    base: ExperimentConfig,
    epsilons: Vec<f64>,
}

impl Default for ExperimentSuite {
    fn default() -> Self {
        ExperimentSuite {
            base: ExperimentConfig::default(),
            epsilons: EPSILONS.to_vec(),
        }
    }
}

impl ExperimentSuite {
    pub fn new(base: ExperimentConfig, epsilons: Vec<f64>) -> Result<Self> {
        if epsilons.is_empty() {
            return Err(BanditError::config("at least one epsilon is required"));
        }
        for &epsilon in &epsilons {
            base.clone().with_epsilon(epsilon).validate()?;
        }
        Ok(ExperimentSuite { base, epsilons })
    }

    pub fn epsilons(&self) -> &[f64] {
        &self.epsilons
    }

    /// Results are returned in the order of the epsilons.
    pub fn run(&self) -> Result<Vec<AggregatedResult>> {
        self.epsilons
            .iter()
            .map(|&epsilon| {
                info!(
                    epsilon,
                    actions = self.base.num_actions,
                    timesteps = self.base.num_timesteps,
                    trials = self.base.num_trials,
                    "running experiment"
                );
                ExperimentAggregator::new(self.base.clone().with_epsilon(epsilon))?.run()
            })
            .collect()
    }
}
