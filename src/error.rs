//! Error type shared by the loader, the directive grammar and the reducers.

use std::path::PathBuf;
use thiserror::Error;

use crate::record::Trait;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot open input file {path}: {source}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown trait <{0}>")]
    UnknownTrait(String),

    #[error("Unknown statistic <{0}>")]
    UnknownStatistic(String),

    #[error("No delimiter '{delimiter}' found in <{input}>")]
    MissingDelimiter { delimiter: char, input: String },

    #[error("Invalid quantile probability <{0}>")]
    InvalidProbability(String),

    #[error("Invalid output format <{0}>, expected text or json")]
    InvalidFormat(String),

    #[error("Directive <{0}> appears before any problem type was selected")]
    MissingProblemType(String),

    #[error("Group for {node_count} nodes is empty")]
    EmptyGroup { node_count: usize },

    #[error("Group for {node_count} nodes contains a NaN or infinite value")]
    NonFiniteValue { node_count: usize },

    #[error("Ratio {numerator}/{denominator} divides by zero in a record with {node_count} nodes")]
    DivisionByZero {
        numerator: Trait,
        denominator: Trait,
        node_count: usize,
    },

    #[error("Correlation undefined for {node_count} nodes: a series has zero variance")]
    ZeroVariance { node_count: usize },

    #[error("Correlation inputs disagree for {node_count} nodes")]
    MismatchedGroups { node_count: usize },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
