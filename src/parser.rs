//! CSV loader for the experiment result log.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::Record;

/// Reads every row of `reader` into a [`Record`].
///
/// The log has no header row. Blank lines are skipped; every other line must
/// hold exactly eight numeric fields.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] for the first row that is not a valid
/// record, or [`Error::Csv`] if the underlying reader fails.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();

    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let fields = row
            .iter()
            .map(|cell| {
                cell.parse::<f64>().map_err(|_| Error::MalformedRecord {
                    line,
                    reason: format!("<{}> is not a number", cell),
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        records.push(Record::from_fields(line, &fields)?);
    }

    Ok(records)
}

/// Opens the log at `path` and parses it with [`parse_records`].
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(file)?;
    debug!(record_count = records.len(), "Result log loaded");

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ProblemType;

    #[test]
    fn test_parse_two_rows() {
        let input = "0,4,10.0,8.0,1.25,6,5,0.01\n0,4,12.0,8.0,1.5,6,5,0.02\n";
        let records = parse_records(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].objective, 12.0);
        assert_eq!(records[1].problem_type, ProblemType::BtspApprox);
    }

    #[test]
    fn test_parse_empty_input() {
        let records = parse_records("".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_skips_blank_lines_and_trims() {
        let input = "1, 6, 3.5, 3.0, 1.1, 9, 7, 0.5\n\n2,5,1,1,1,5,5,0\n";
        let records = parse_records(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].problem_type, ProblemType::BtsppApprox);
        assert_eq!(records[1].problem_type, ProblemType::BtsvppApprox);
    }

    #[test]
    fn test_parse_rejects_non_numeric_field() {
        let input = "0,4,10.0,8.0,1.25,6,5,0.01\n0,4,abc,8.0,1.5,6,5,0.02\n";
        let err = parse_records(input.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_non_finite_values() {
        for input in [
            "0,6,NaN,6,1,9,7,0.1\n",
            "0,6,9,inf,1,9,7,0.1\n",
            "0,6,9,6,1,9,7,-inf\n",
        ] {
            let err = parse_records(input.as_bytes()).unwrap_err();
            assert!(matches!(err, Error::MalformedRecord { line: 1, .. }), "{}", input);
        }
    }

    #[test]
    fn test_parse_rejects_negative_measurements() {
        let input = "0,4,10.0,8.0,1.25,6,5,0.01\n0,4,12.0,-3,1.5,6,5,-1\n";
        let err = parse_records(input.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let input = "0,4,10.0,8.0,1.25,6,5\n";
        let err = parse_records(input.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("btsp_stats_test_does_not_exist.csv");
        let _ = std::fs::remove_file(&path);

        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
