//! Epsilon-greedy agents on the k-armed bandit testbed.
//!
//! Each trial pits a sample-average [`EpsilonGreedyAgent`] against a fresh
//! [`GaussianBanditEnvironment`]; the [`ExperimentAggregator`] averages many trials into learning
//! curves of mean reward and percent of optimal actions.

pub mod config;
pub mod constants;
pub mod environments;
pub mod epsilon_greedy_agent;
pub mod error;
pub mod experiment_aggregator;
pub mod report;
pub mod trial_runner;

pub use config::{ ExecutionMode, ExperimentConfig, OptimalityCriterion };
pub use environments::{ ActionId, GaussianBanditEnvironment };
pub use epsilon_greedy_agent::{ Choice, EpsilonGreedyAgent };
pub use error::{ BanditError, Result };
pub use experiment_aggregator::{ AggregatedResult, ExperimentAggregator, ExperimentSuite };
pub use trial_runner::{ TimestepRecord, Trajectory, TrialRunner };
