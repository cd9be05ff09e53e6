use rand::Rng;
use tracing::trace;

use crate::environments::{ argmax, ActionId };
use crate::error::{ check_action, BanditError, Result };

/// Outcome of the exploration coin flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

/// This agent learns the value of each action of a k-armed bandit with the sample-average
/// method and selects actions with an epsilon greedy policy.
///
/// Estimates are updated with the incremental rule
///
/// Q<sub>n+1</sub> = Q<sub>n</sub> + (R<sub>n</sub> - Q<sub>n</sub>) / n
///
/// where n is the number of times the action has been selected so far.
#[derive(PartialEq, Debug, Clone)]
pub struct EpsilonGreedyAgent {
    /// What the agent has learned about each action. Index is the action, value is the
    /// estimated mean reward.
    estimates: Vec<f64>,
    /// Number of times each action was selected.
    visit_counts: Vec<u64>,
    /// Should be in range: 0 <= epsilon <= 1
    /// Represents the probability with which to take exploratory action (random action).
    /// If epsilon = 0, greedy action is always taken after the first timestep. If epsilon = 1,
    /// random action is always taken.
    epsilon: f64,
}

impl EpsilonGreedyAgent {
    pub fn new(num_actions: usize, epsilon: f64) -> Result<Self> {
        if num_actions == 0 {
            return Err(BanditError::config("number of actions must be at least 1"));
        }
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(BanditError::config(format!("epsilon must be in the range [0, 1], got {epsilon}")));
        }
        Ok(EpsilonGreedyAgent {
            estimates: vec![0.0; num_actions],
            visit_counts: vec![0; num_actions],
            epsilon,
        })
    }

    /// Flips the exploration coin. The first timestep always explores because no estimate
    /// exists yet.
    pub fn choose<R: Rng + ?Sized>(&self, timestep: usize, rng: &mut R) -> Choice {
        if timestep == 0 {
            return Choice::Explore;
        }
        if rng.gen::<f64>() < 1.0 - self.epsilon {
            Choice::Exploit
        } else {
            Choice::Explore
        }
    }

    pub fn select_action<R: Rng + ?Sized>(&self, timestep: usize, rng: &mut R) -> ActionId {
        let action = match self.choose(timestep, rng) {
            Choice::Exploit => self.greedy_action(),
            Choice::Explore => rng.gen_range(0..self.estimates.len()),
        };
        trace!(timestep, action, "selected action");
        action
    }

    /// Action with the highest estimate, the lowest index wins on ties.
    pub fn greedy_action(&self) -> ActionId {
        argmax(&self.estimates)
    }

    /// Simulates mean average update for the selected action.
    pub fn update(&mut self, action: ActionId, reward: f64) -> Result<()> {
        check_action(action, self.estimates.len())?;
        self.visit_counts[action] += 1;
        let step_size = 1.0 / (self.visit_counts[action] as f64);
        self.estimates[action] += step_size * (reward - self.estimates[action]);
        Ok(())
    }

    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    pub fn visit_counts(&self) -> &[u64] {
        &self.visit_counts
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn num_actions(&self) -> usize {
        self.estimates.len()
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_creation_of_agent() {
        let agent = EpsilonGreedyAgent::new(10, 0.1).unwrap();

        assert_eq!(agent.num_actions(), 10);
        assert_eq!(agent.estimates(), vec![0.0; 10].as_slice());
        assert_eq!(agent.visit_counts(), vec![0; 10].as_slice());
        assert_eq!(agent.epsilon(), 0.1);
    }

    #[test]
    fn test_creation_with_invalid_epsilon_fails() {
        for epsilon in [-0.1, 1.5, f64::NAN] {
            let result = EpsilonGreedyAgent::new(10, epsilon);
            assert!(
                matches!(result, Err(BanditError::InvalidConfiguration(_))),
                "Epsilon {} should be rejected",
                epsilon
            );
        }
    }

    #[test]
    fn test_creation_with_zero_actions_fails() {
        assert!(EpsilonGreedyAgent::new(0, 0.1).is_err());
    }

    #[test]
    fn test_update_estimate_is_mean_of_rewards() {
        let action = 3;
        let rewards = [1.5, -0.25, 2.0, 0.75, -1.0, 3.125];
        let mut agent = EpsilonGreedyAgent::new(5, 0.1).unwrap();

        for reward in rewards {
            agent.update(action, reward).unwrap();
        }

        let expected_mean = rewards.iter().sum::<f64>() / (rewards.len() as f64);
        assert_relative_eq!(agent.estimates()[action], expected_mean, epsilon = 1e-12);
        assert_eq!(agent.visit_counts()[action], rewards.len() as u64);
    }

    #[test]
    fn test_update_only_changes_selected_action() {
        let mut agent = EpsilonGreedyAgent::new(4, 0.0).unwrap();

        agent.update(1, 2.0).unwrap();

        assert_eq!(agent.estimates(), &[0.0, 2.0, 0.0, 0.0]);
        assert_eq!(agent.visit_counts(), &[0, 1, 0, 0]);
    }

    #[test]
    fn test_update_with_invalid_action_fails() {
        let mut agent = EpsilonGreedyAgent::new(4, 0.0).unwrap();

        let result = agent.update(4, 1.0);

        assert!(matches!(result, Err(BanditError::InvalidAction { action: 4, num_actions: 4 })));
        assert_eq!(agent.visit_counts(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_first_timestep_always_explores() {
        let mut rng = StdRng::seed_from_u64(0);
        for epsilon in [0.0, 0.01, 0.1, 0.5, 0.99] {
            let mut agent = EpsilonGreedyAgent::new(5, epsilon).unwrap();
            // A strongly preferred action would be picked by the greedy branch.
            agent.update(2, 10.0).unwrap();

            for _ in 0..1000 {
                assert_eq!(agent.choose(0, &mut rng), Choice::Explore);
            }
        }
    }

    #[test]
    fn test_zero_epsilon_always_exploits_after_first_timestep() {
        let mut rng = StdRng::seed_from_u64(1);
        let agent = EpsilonGreedyAgent::new(5, 0.0).unwrap();

        for timestep in 1..1000 {
            assert_eq!(agent.choose(timestep, &mut rng), Choice::Exploit);
        }
    }

    #[test]
    fn test_greedy_policy_when_one_value_is_the_best() {
        let expected_action = 3;
        let mut agent = EpsilonGreedyAgent::new(6, 0.0).unwrap();
        agent.update(expected_action, 0.9).unwrap();

        assert_eq!(agent.greedy_action(), expected_action);
    }

    #[test]
    fn test_greedy_policy_breaks_ties_by_lowest_index() {
        let mut agent = EpsilonGreedyAgent::new(6, 0.0).unwrap();
        agent.update(4, 0.9).unwrap();
        agent.update(2, 0.9).unwrap();

        assert_eq!(agent.greedy_action(), 2);
    }

    #[test]
    fn test_random_actions_are_uniform_when_epsilon_is_one() {
        let num_of_actions = 10;
        let num_of_turns = 20_000;
        let expected = (num_of_turns / num_of_actions) as f64;
        let mut rng = StdRng::seed_from_u64(42);
        let mut agent = EpsilonGreedyAgent::new(num_of_actions, 1.0).unwrap();

        for turn in 0..num_of_turns {
            let action = agent.select_action(turn, &mut rng);
            assert!(action < num_of_actions);
            agent.update(action, 0.0).unwrap();
        }

        for (action, &count) in agent.visit_counts().iter().enumerate() {
            assert!(
                (expected * 0.9..=expected * 1.1).contains(&(count as f64)),
                "Action {} selected {} times, expected about {}",
                action,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_single_action_is_always_selected() {
        let mut rng = StdRng::seed_from_u64(5);
        let agent = EpsilonGreedyAgent::new(1, 0.0).unwrap();

        for timestep in 0..100 {
            assert_eq!(agent.select_action(timestep, &mut rng), 0);
        }
    }

    #[test]
    fn test_epsilon_greedy_takes_greedy_action_most_of_the_time() {
        let turns = 100_000;
        let epsilon = 0.1;
        let mut rng = StdRng::seed_from_u64(3);
        let mut agent = EpsilonGreedyAgent::new(10, epsilon).unwrap();
        agent.update(7, 1.0).unwrap();

        let greedy_count = (1..=turns)
            .filter(|&turn| agent.select_action(turn, &mut rng) == 7)
            .count() as f64;

        // Greedy share is (1 - epsilon) plus epsilon / k from exploration.
        let expected = (1.0 - epsilon + epsilon / 10.0) * (turns as f64);
        assert_relative_eq!(greedy_count, expected, max_relative = 0.01);
    }
}
