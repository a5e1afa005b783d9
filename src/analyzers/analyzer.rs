use std::fmt;

use tracing::{debug, warn};

use crate::analyzers::aggregate::{group, group_pair};
use crate::analyzers::metric::MetricSpec;
use crate::analyzers::reducers;
use crate::analyzers::types::GroupStats;
use crate::error::Result;
use crate::record::{ProblemType, Record};

/// A statistic requested for one metric, or for a pair of metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statistic {
    Average(MetricSpec),
    Variance(MetricSpec),
    Maximum(MetricSpec),
    Quantile { probability: f64, spec: MetricSpec },
    Correlation(MetricSpec, MetricSpec),
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Average(spec) => write!(f, "avg:{}", spec),
            Statistic::Variance(spec) => write!(f, "var:{}", spec),
            Statistic::Maximum(spec) => write!(f, "max:{}", spec),
            Statistic::Quantile { probability, spec } => {
                write!(f, "quan:{},{}", probability, spec)
            }
            Statistic::Correlation(first, second) => write!(f, "corr:{},{}", first, second),
        }
    }
}

/// Evaluates `statistic` over the records of `problem_type`, one value per node count.
///
/// Any degenerate group (empty, zero ratio denominator, constant series in a
/// correlation) fails the whole statistic.
#[tracing::instrument(skip(records, statistic), fields(record_count = records.len(), statistic = %statistic))]
pub fn evaluate(
    records: &[Record],
    problem_type: ProblemType,
    statistic: &Statistic,
) -> Result<GroupStats> {
    let stats = match *statistic {
        Statistic::Average(spec) => reducers::average(&group(records, problem_type, &spec)?)?,
        Statistic::Variance(spec) => reducers::variance(&group(records, problem_type, &spec)?)?,
        Statistic::Maximum(spec) => reducers::maximum(&group(records, problem_type, &spec)?)?,
        Statistic::Quantile { probability, spec } => {
            reducers::quantile(&group(records, problem_type, &spec)?, probability)?
        }
        Statistic::Correlation(first, second) => {
            let (grouped_first, grouped_second) =
                group_pair(records, problem_type, &first, &second)?;
            reducers::correlation(&grouped_first, &grouped_second)?
        }
    };

    if stats.is_empty() {
        warn!(%problem_type, "No records of this problem type");
    } else {
        debug!(group_count = stats.len(), "Statistic evaluated");
    }

    Ok(stats)
}
