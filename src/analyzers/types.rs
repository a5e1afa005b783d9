//! Data types used by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::record::ProblemType;

/// Extracted values keyed by node count, in record order within a group.
pub type Grouped = BTreeMap<usize, Vec<f64>>;

/// One reduced value per node count.
pub type GroupStats = BTreeMap<usize, f64>;

/// The result of one directive, as written by the JSON formatter.
#[derive(Debug, Serialize)]
pub struct DirectiveReport {
    pub(crate) directive: String,
    pub(crate) problem_type: ProblemType,
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) values: GroupStats,
}

impl DirectiveReport {
    pub fn new(directive: String, problem_type: ProblemType, values: GroupStats) -> Self {
        DirectiveReport {
            directive,
            problem_type,
            generated_at: Utc::now(),
            values,
        }
    }

    pub fn values(&self) -> &GroupStats {
        &self.values
    }
}
