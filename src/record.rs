//! A single experiment observation and the closed set of traits that can be read from it.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of columns every row of the result log carries.
pub const FIELD_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProblemType {
    #[serde(rename = "BTSP-approx")]
    BtspApprox,
    #[serde(rename = "BTSPP-approx")]
    BtsppApprox,
    #[serde(rename = "BTSVPP-approx")]
    BtsvppApprox,
    #[serde(rename = "BTSP-exact")]
    BtspExact,
    #[serde(rename = "BTSPP-exact")]
    BtsppExact,
    #[serde(rename = "TSP-exact")]
    TspExact,
}

impl ProblemType {
    /// Maps the integer code written in column 0 of the log.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::BtspApprox),
            1 => Some(Self::BtsppApprox),
            2 => Some(Self::BtsvppApprox),
            3 => Some(Self::BtspExact),
            4 => Some(Self::BtsppExact),
            5 => Some(Self::TspExact),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::BtspApprox => "BTSP-approx",
            Self::BtsppApprox => "BTSPP-approx",
            Self::BtsvppApprox => "BTSVPP-approx",
            Self::BtspExact => "BTSP-exact",
            Self::BtsppExact => "BTSPP-exact",
            Self::TspExact => "TSP-exact",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named scalar that can be read from a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trait {
    Nodes,
    Objective,
    LowerBoundOnOpt,
    AFortiori,
    Edges,
    EdgesInMinimally,
    Time,
    Ears,
}

impl Trait {
    pub const ALL: [Trait; 8] = [
        Trait::Nodes,
        Trait::Objective,
        Trait::LowerBoundOnOpt,
        Trait::AFortiori,
        Trait::Edges,
        Trait::EdgesInMinimally,
        Trait::Time,
        Trait::Ears,
    ];

    /// The token used for this trait on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Trait::Nodes => "nodes",
            Trait::Objective => "objective",
            Trait::LowerBoundOnOpt => "lowerBoundOnOpt",
            Trait::AFortiori => "a-fortiori",
            Trait::Edges => "edges",
            Trait::EdgesInMinimally => "edgesInMinimally",
            Trait::Time => "time",
            Trait::Ears => "ears",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Trait {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Trait::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| Error::UnknownTrait(s.to_string()))
    }
}

/// One row of the experiment log.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub problem_type: ProblemType,
    pub node_count: usize,
    pub objective: f64,
    pub lower_bound_on_opt: f64,
    pub a_fortiori_guarantee: f64,
    pub biconnected_edge_count: u64,
    pub minimally_biconnected_edge_count: u64,
    pub runtime_seconds: f64,
}

impl Record {
    /// Builds a record from the eight numeric columns of a log row.
    ///
    /// `line` is only used to locate the row in error messages.
    pub fn from_fields(line: u64, fields: &[f64]) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedRecord { line, reason };

        if fields.len() != FIELD_COUNT {
            return Err(malformed(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            )));
        }

        let type_code = as_count(fields[0]).ok_or_else(|| {
            malformed(format!("problem type code {} is not an integer", fields[0]))
        })?;
        let problem_type = ProblemType::from_code(type_code)
            .ok_or_else(|| malformed(format!("unknown problem type code {}", type_code)))?;

        let node_count = as_count(fields[1])
            .filter(|&n| n > 0)
            .ok_or_else(|| malformed(format!("node count {} is not a positive integer", fields[1])))?
            as usize;

        let biconnected_edge_count = as_count(fields[5])
            .ok_or_else(|| malformed(format!("edge count {} is not an integer", fields[5])))?;
        let minimally_biconnected_edge_count = as_count(fields[6]).ok_or_else(|| {
            malformed(format!("minimal edge count {} is not an integer", fields[6]))
        })?;

        let real = |index: usize, name: &str, min: f64| {
            at_least(fields[index], min).ok_or_else(|| {
                malformed(format!("{} {} is not a finite value >= {}", name, fields[index], min))
            })
        };

        Ok(Record {
            problem_type,
            node_count,
            objective: real(2, "objective", 0.0)?,
            lower_bound_on_opt: real(3, "lower bound", 0.0)?,
            a_fortiori_guarantee: real(4, "a fortiori guarantee", 1.0)?,
            biconnected_edge_count,
            minimally_biconnected_edge_count,
            runtime_seconds: real(7, "runtime", 0.0)?,
        })
    }

    /// Ears in an ear decomposition of the minimally biconnected graph.
    pub fn ear_count(&self) -> f64 {
        self.minimally_biconnected_edge_count as f64 - self.node_count as f64 + 1.0
    }

    pub fn trait_value(&self, t: Trait) -> f64 {
        match t {
            Trait::Nodes => self.node_count as f64,
            Trait::Objective => self.objective,
            Trait::LowerBoundOnOpt => self.lower_bound_on_opt,
            Trait::AFortiori => self.a_fortiori_guarantee,
            Trait::Edges => self.biconnected_edge_count as f64,
            Trait::EdgesInMinimally => self.minimally_biconnected_edge_count as f64,
            Trait::Time => self.runtime_seconds,
            Trait::Ears => self.ear_count(),
        }
    }
}

/// Integer columns are stored as floats in the log; accept them only when integral.
fn as_count(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

fn at_least(value: f64, min: f64) -> Option<f64> {
    (value.is_finite() && value >= min).then_some(value)
}
