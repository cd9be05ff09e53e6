use epsilon_greedy_testbed::constants::REPORT_INTERVAL;
use epsilon_greedy_testbed::report::render_report;
use epsilon_greedy_testbed::ExperimentSuite;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let suite = ExperimentSuite::default();
    let results = suite.run()?;

    println!("{}", render_report(&results, REPORT_INTERVAL)?);
    Ok(())
}
