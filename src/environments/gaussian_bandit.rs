use rand::rngs::StdRng;
use rand::{ Rng, SeedableRng };
use rand_distr::StandardNormal;
use tracing::trace;

use crate::error::{ check_action, BanditError, Result };

/// Identifies one arm of the bandit, in the range [0, k).
pub type ActionId = usize;

/// Returns the index of the largest value, the lowest index wins on ties.
pub fn argmax(values: &[f64]) -> ActionId {
    let mut best = 0;
    for (index, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = index;
        }
    }
    best
}

/// GaussianBanditEnvironment represents k slot machine levers. Every lever pays a reward drawn
/// from a normal distribution with unit variance around its own true value. True values are
/// drawn once from the standard normal distribution when the environment is created and are not
/// known to the agent.
///
/// The environment owns the random source of one trial. The agent borrows it through
/// [`GaussianBanditEnvironment::rng`] so that a trial consumes a single stream.
#[derive(Debug, Clone)]
pub struct GaussianBanditEnvironment {
    true_values: Vec<f64>,
    rng: StdRng,
}

impl GaussianBanditEnvironment {
    pub fn new(num_actions: usize, seed: u64) -> Result<Self> {
        if num_actions == 0 {
            return Err(BanditError::config("number of actions must be at least 1"));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let true_values: Vec<f64> = (0..num_actions)
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect();
        trace!(seed, ?true_values, "created gaussian bandit environment");

        Ok(GaussianBanditEnvironment { true_values, rng })
    }

    /// Pulls a lever and returns a reward from Normal(true_value, 1).
    pub fn sample(&mut self, action: ActionId) -> Result<f64> {
        check_action(action, self.true_values.len())?;
        let noise: f64 = self.rng.sample(StandardNormal);
        Ok(self.true_values[action] + noise)
    }

    /// Draws one reward for every action, in action order.
    pub fn sample_all(&mut self) -> Vec<f64> {
        let rng = &mut self.rng;
        self.true_values
            .iter()
            .map(|&mean| {
                let noise: f64 = rng.sample(StandardNormal);
                mean + noise
            })
            .collect()
    }

    /// Added ONLY for collecting statistics. The agent never looks at true values.
    pub fn true_values(&self) -> &[f64] {
        &self.true_values
    }

    /// Action with the highest true value.
    pub fn optimal_action(&self) -> ActionId {
        argmax(&self.true_values)
    }

    pub fn num_actions(&self) -> usize {
        self.true_values.len()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
