/// Represents the number of slot machines in the k-armed bandit problem, it is the number k.
pub const NUM_OF_ACTIONS: usize = 10;
/// Represents the number of timesteps in one trial.
pub const NUM_OF_TIMESTEPS: usize = 1001;
/// Represent number of independent trials averaged for each epsilon.
pub const NUM_OF_TRIALS: usize = 2000;
/// Exploration rates compared by the testbed. Epsilon is the probability with which a random
/// action is selected. When EPSILON = 0, agent always takes the greedy action (except on the
/// first timestep). When EPSILON = 1, agent always explores.
pub const EPSILONS: [f64; 3] = [0.0, 0.01, 0.1];
/// Report tables print one row every this many timesteps.
pub const REPORT_INTERVAL: usize = 100;
/// Number of significant digits printed in the report tables.
pub const SIGNIFICANT_DIGITS: usize = 4;
/// Number of trials handed to the rayon pool at once. Trajectories of one batch are kept in
/// memory until they are folded into the running sums.
pub const PARALLEL_BATCH_SIZE: usize = 256;
/// Caps the number of rows polars prints for a report table.
pub const POLARS_MAX_ROWS: &str = "64";
