use polars::prelude::*;

use crate::constants::{ POLARS_MAX_ROWS, SIGNIFICANT_DIGITS };
use crate::error::{ BanditError, Result };
use crate::experiment_aggregator::AggregatedResult;

/// Which learning curve a table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MeanReward,
    PercentOptimal,
}

impl Metric {
    pub fn title(&self) -> &'static str {
        match self {
            Metric::MeanReward => "Average reward",
            Metric::PercentOptimal => "% Optimal action",
        }
    }
}

/// Set environment variables so that the whole table is printed
pub fn set_polars_environment_variables() {
    std::env::set_var("POLARS_FMT_MAX_ROWS", POLARS_MAX_ROWS);
}

/// Rounds `value` to `digits` significant digits.
pub fn significant_digits(value: f64, digits: usize) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = (10.0_f64).powi((digits as i32) - 1 - magnitude);
    // Subnormal inputs overflow the factor.
    if !factor.is_finite() {
        return value;
    }
    (value * factor).round() / factor
}

fn column_name(epsilon: f64) -> String {
    format!("eps={}", epsilon)
}

/// Builds a table with a `step` column and one column per epsilon, one row every `interval`
/// timesteps.
pub fn build_table(results: &[AggregatedResult], metric: Metric, interval: usize) -> Result<DataFrame> {
    let first = results
        .first()
        .ok_or_else(|| BanditError::config("at least one result is required for a report"))?;
    let steps: Vec<u64> = first
        .sampled(interval)?
        .into_iter()
        .map(|(t, _, _)| t as u64)
        .collect();

    let mut columns = vec![Series::new("step", steps)];
    for result in results {
        let values: Vec<f64> = result
            .sampled(interval)?
            .into_iter()
            .map(|(_, reward, percent)| {
                let value = match metric {
                    Metric::MeanReward => reward,
                    Metric::PercentOptimal => percent,
                };
                significant_digits(value, SIGNIFICANT_DIGITS)
            })
            .collect();
        columns.push(Series::new(&column_name(result.epsilon), values));
    }

    Ok(DataFrame::new(columns)?)
}

/// Renders the mean reward and percent optimal tables one after another.
pub fn render_report(results: &[AggregatedResult], interval: usize) -> Result<String> {
    set_polars_environment_variables();
    let mut lines: Vec<String> = Vec::new();
    for metric in [Metric::MeanReward, Metric::PercentOptimal] {
        let df = build_table(results, metric, interval)?;
        lines.push(format!("### {} ###", metric.title()));
        lines.push(format!("{}\n", df));
    }
    Ok(lines.join("\n"))
}
