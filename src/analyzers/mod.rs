//! Statistics over the experiment log.
//!
//! Records are filtered by problem type, turned into scalars through a
//! [`metric::MetricSpec`], grouped by node count, and each group is reduced
//! to a single value by one of the reducers.

pub mod aggregate;
pub mod analyzer;
pub mod metric;
pub mod reducers;
pub mod types;
pub mod utility;
