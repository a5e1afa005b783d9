//! Resolution of a metric (a trait or a ratio of two traits) against a record.

use std::fmt;

use crate::error::{Error, Result};
use crate::record::{Record, Trait};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSpec {
    Single(Trait),
    Ratio { numerator: Trait, denominator: Trait },
}

impl MetricSpec {
    /// Evaluates the metric on one record.
    ///
    /// # Errors
    ///
    /// A ratio whose denominator is exactly zero fails with
    /// [`Error::DivisionByZero`] instead of yielding an infinite or NaN value.
    pub fn extract(&self, record: &Record) -> Result<f64> {
        match *self {
            MetricSpec::Single(t) => Ok(record.trait_value(t)),
            MetricSpec::Ratio {
                numerator,
                denominator,
            } => {
                let divisor = record.trait_value(denominator);
                if divisor == 0.0 {
                    return Err(Error::DivisionByZero {
                        numerator,
                        denominator,
                        node_count: record.node_count,
                    });
                }
                Ok(record.trait_value(numerator) / divisor)
            }
        }
    }
}

impl fmt::Display for MetricSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricSpec::Single(t) => write!(f, "{}", t),
            MetricSpec::Ratio {
                numerator,
                denominator,
            } => write!(f, "ratio:{},{}", numerator, denominator),
        }
    }
}
