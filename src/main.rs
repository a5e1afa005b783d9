//! CLI entry point for the BTSP experiment statistics tool.
//!
//! Loads a result log, then evaluates each directive on the command line with
//! the problem type selected before it and prints one result block per directive.

use anyhow::{Context, Result};
use btsp_stats::analyzers::analyzer::evaluate;
use btsp_stats::analyzers::types::DirectiveReport;
use btsp_stats::directive::parse_plan;
use btsp_stats::output::{OutputFormat, format_report};
use btsp_stats::parser::load_records;
use clap::{CommandFactory, Parser, ValueEnum};
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use tracing::{error, info};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DIRECTIVE_HELP: &str = "\
Tokens are processed left to right:
  btsp | btspp | btsvpp               select an approximate problem type
  btsp-exact | btspp-exact | tsp-exact select an exact problem type
  -space-separation                   print one `nodes value` pair per line
  --format <text|json>                may also follow FILE among the tokens
  avg:<spec> | var:<spec> | max:<spec>
  quan:<p>,<spec>                     quantile with probability p in [0,1]
  corr:<spec>,<spec>                  per-size correlation of two metrics

<spec> is a trait or ratio:<trait>,<trait>.
Traits: nodes, objective, lowerBoundOnOpt, a-fortiori, edges, edgesInMinimally, time, ears";

#[derive(Parser)]
#[command(name = "btsp_stats")]
#[command(about = "Per-size statistics over bottleneck TSP experiment logs", long_about = None)]
#[command(after_help = DIRECTIVE_HELP)]
struct Cli {
    /// Result log to analyze, or `help` to print this message
    #[arg(value_name = "FILE")]
    input: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Problem types, flags and directives
    #[arg(value_name = "TOKENS", trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + optional JSON rolling log file
    let file_layer = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .unwrap_or(Path::new("logs"))
                .to_path_buf();
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("btsp_stats.log"))
                .to_os_string();

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            Some(tracing_appender::non_blocking(file_appender))
        }
        Err(_) => None,
    };
    let (file_writer, _file_guard) = match file_layer {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::WARN));

    let json_layer = file_writer.map(|writer| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(writer)
            .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG))
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    if cli.input == "help" {
        Cli::command().print_help()?;
        return Ok(());
    }

    run(&cli).inspect_err(|e| error!(error = %failure_message(e), "btsp_stats failed"))
}

/// Filter from `var`, falling back to `default` only when the variable sets no level.
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    filter_from(&std::env::var(var).unwrap_or_default(), default)
}

fn filter_from(directives: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives)
}

fn failure_message(e: &anyhow::Error) -> String {
    format!("{e:#}")
}

fn run(cli: &Cli) -> Result<()> {
    let plan = parse_plan(cli.tokens.as_slice()).context("Invalid command line")?;

    let format = match cli.format {
        _ if plan.json => OutputFormat::Json,
        Format::Json => OutputFormat::Json,
        Format::Text if plan.space_separated => OutputFormat::SpaceSeparated,
        Format::Text => OutputFormat::Tuples,
    };

    let records = load_records(Path::new(&cli.input))
        .with_context(|| format!("Failed to load {}", cli.input))?;
    info!(
        record_count = records.len(),
        directive_count = plan.directives.len(),
        "Evaluating directives"
    );

    let mut stdout = std::io::stdout().lock();

    for directive in &plan.directives {
        let values = evaluate(&records, directive.problem_type, &directive.statistic)
            .with_context(|| format!("Directive {} failed", directive))?;

        let report = DirectiveReport::new(directive.to_string(), directive.problem_type, values);
        stdout.write_all(format_report(&report, format)?.as_bytes())?;
        stdout.flush()?;
    }

    Ok(())
}
