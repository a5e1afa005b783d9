//! Command-line directive grammar.
//!
//! Tokens are read left to right. A problem-type token (`btsp`, `btspp`, ...)
//! applies to every directive after it; `-space-separation` may appear
//! anywhere. Directives look like `avg:objective`,
//! `quan:0.9,ratio:objective,lowerBoundOnOpt` or `corr:ratio:objective,lowerBoundOnOpt,time`.

use std::fmt;

use crate::analyzers::analyzer::Statistic;
use crate::analyzers::metric::MetricSpec;
use crate::error::{Error, Result};
use crate::record::{ProblemType, Trait};

const RATIO_PREFIX: &str = "ratio:";
const STATISTIC_NAMES: [&str; 5] = ["avg", "var", "max", "quan", "corr"];

/// One statistic bound to the problem type that was current when it was read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directive {
    pub problem_type: ProblemType,
    pub statistic: Statistic,
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.statistic)
    }
}

/// The parsed command line.
#[derive(Debug, Default, PartialEq)]
pub struct Plan {
    pub directives: Vec<Directive>,
    pub space_separated: bool,
    /// Set when `--format json` appears among the tokens.
    pub json: bool,
}

fn problem_type_token(token: &str) -> Option<ProblemType> {
    match token {
        "btsp" => Some(ProblemType::BtspApprox),
        "btspp" => Some(ProblemType::BtsppApprox),
        "btsvpp" => Some(ProblemType::BtsvppApprox),
        "btsp-exact" => Some(ProblemType::BtspExact),
        "btspp-exact" => Some(ProblemType::BtsppExact),
        "tsp-exact" => Some(ProblemType::TspExact),
        _ => None,
    }
}

fn is_space_separation_flag(token: &str) -> bool {
    matches!(token, "-space-separation" | "--space-separation")
}

fn is_json_format(value: &str) -> Result<bool> {
    match value {
        "json" => Ok(true),
        "text" => Ok(false),
        other => Err(Error::InvalidFormat(other.to_string())),
    }
}

/// Parses every token after the input path into a [`Plan`].
///
/// `--format <text|json>` (or `--format=<text|json>`) is accepted among the
/// tokens as well, since everything after the input path lands here.
///
/// # Errors
///
/// Fails on the first token that is not a valid directive, or on a directive
/// that precedes every problem-type token.
pub fn parse_plan<S: AsRef<str>>(tokens: &[S]) -> Result<Plan> {
    let mut plan = Plan::default();
    let mut current: Option<ProblemType> = None;
    let mut tokens = tokens.iter().map(AsRef::as_ref);

    while let Some(token) = tokens.next() {
        if let Some(problem_type) = problem_type_token(token) {
            current = Some(problem_type);
        } else if is_space_separation_flag(token) {
            plan.space_separated = true;
        } else if token == "--format" {
            plan.json = is_json_format(tokens.next().unwrap_or_default())?;
        } else if let Some(value) = token.strip_prefix("--format=") {
            plan.json = is_json_format(value)?;
        } else {
            let statistic = parse_statistic(token)?;
            let problem_type =
                current.ok_or_else(|| Error::MissingProblemType(token.to_string()))?;
            plan.directives.push(Directive {
                problem_type,
                statistic,
            });
        }
    }

    Ok(plan)
}

fn split_at_delimiter(input: &str, delimiter: char) -> Result<(&str, &str)> {
    input
        .split_once(delimiter)
        .ok_or_else(|| Error::MissingDelimiter {
            delimiter,
            input: input.to_string(),
        })
}

/// Parses a single `<stat>:<spec>` directive.
pub fn parse_statistic(token: &str) -> Result<Statistic> {
    let Some((name, rest)) = token.split_once(':') else {
        return Err(if STATISTIC_NAMES.contains(&token) {
            Error::MissingDelimiter {
                delimiter: ':',
                input: token.to_string(),
            }
        } else {
            Error::UnknownStatistic(token.to_string())
        });
    };

    match name {
        "avg" => Ok(Statistic::Average(parse_metric(rest)?)),
        "var" => Ok(Statistic::Variance(parse_metric(rest)?)),
        "max" => Ok(Statistic::Maximum(parse_metric(rest)?)),
        "quan" => {
            let (probability, spec) = split_at_delimiter(rest, ',')?;
            Ok(Statistic::Quantile {
                probability: parse_probability(probability)?,
                spec: parse_metric(spec)?,
            })
        }
        "corr" => {
            let (first, remainder) = split_leading_metric(rest)?;
            Ok(Statistic::Correlation(first, parse_metric(remainder)?))
        }
        other => Err(Error::UnknownStatistic(other.to_string())),
    }
}

/// Parses `<trait>` or `ratio:<trait>,<trait>`.
pub fn parse_metric(input: &str) -> Result<MetricSpec> {
    match input.strip_prefix(RATIO_PREFIX) {
        Some(pair) => {
            let (numerator, denominator) = split_at_delimiter(pair, ',')?;
            Ok(MetricSpec::Ratio {
                numerator: numerator.parse()?,
                denominator: denominator.parse()?,
            })
        }
        None => Ok(MetricSpec::Single(input.parse()?)),
    }
}

/// Splits the first metric of a correlation pair off `input`.
fn split_leading_metric(input: &str) -> Result<(MetricSpec, &str)> {
    match input.strip_prefix(RATIO_PREFIX) {
        Some(pair) => {
            let (numerator, rest) = split_at_delimiter(pair, ',')?;
            let (denominator, remainder) = split_at_delimiter(rest, ',')?;
            let spec = MetricSpec::Ratio {
                numerator: numerator.parse::<Trait>()?,
                denominator: denominator.parse::<Trait>()?,
            };
            Ok((spec, remainder))
        }
        None => {
            let (name, remainder) = split_at_delimiter(input, ',')?;
            Ok((MetricSpec::Single(name.parse()?), remainder))
        }
    }
}

fn parse_probability(input: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| !p.is_nan())
        .ok_or_else(|| Error::InvalidProbability(input.to_string()))
}
