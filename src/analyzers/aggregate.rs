use crate::analyzers::metric::MetricSpec;
use crate::analyzers::types::Grouped;
use crate::error::Result;
use crate::record::{ProblemType, Record};

/// Groups the metric values of all records of `problem_type` by node count.
///
/// Records of other problem types are ignored. Keys are ascending; values keep
/// the order of the records they came from.
pub fn group(records: &[Record], problem_type: ProblemType, spec: &MetricSpec) -> Result<Grouped> {
    let mut grouped = Grouped::new();

    for record in records.iter().filter(|r| r.problem_type == problem_type) {
        grouped
            .entry(record.node_count)
            .or_default()
            .push(spec.extract(record)?);
    }

    Ok(grouped)
}

/// Groups two metrics over the same filtered records in a single pass.
///
/// Both groupings have the same keys and the same number of values per key,
/// and the i-th values of a key come from the same record.
pub fn group_pair(
    records: &[Record],
    problem_type: ProblemType,
    first: &MetricSpec,
    second: &MetricSpec,
) -> Result<(Grouped, Grouped)> {
    let mut grouped_first = Grouped::new();
    let mut grouped_second = Grouped::new();

    for record in records.iter().filter(|r| r.problem_type == problem_type) {
        let a = first.extract(record)?;
        let b = second.extract(record)?;

        grouped_first.entry(record.node_count).or_default().push(a);
        grouped_second.entry(record.node_count).or_default().push(b);
    }

    Ok((grouped_first, grouped_second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::record::Trait;

    fn row(fields: [f64; 8]) -> Record {
        Record::from_fields(1, &fields).unwrap()
    }

    fn dataset() -> Vec<Record> {
        vec![
            row([0.0, 6.0, 7.0, 5.0, 1.4, 9.0, 7.0, 0.1]),
            row([0.0, 4.0, 10.0, 8.0, 1.25, 6.0, 5.0, 0.01]),
            row([1.0, 4.0, 99.0, 1.0, 1.0, 6.0, 5.0, 0.3]),
            row([0.0, 4.0, 12.0, 8.0, 1.5, 6.0, 5.0, 0.02]),
            row([0.0, 6.0, 9.0, 5.0, 1.8, 10.0, 7.0, 0.2]),
        ]
    }

    #[test]
    fn test_group_filters_and_keys_by_nodes() {
        let grouped = group(
            &dataset(),
            ProblemType::BtspApprox,
            &MetricSpec::Single(Trait::Objective),
        )
        .unwrap();

        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![4, 6]);
        assert_eq!(grouped[&4], vec![10.0, 12.0]);
        assert_eq!(grouped[&6], vec![7.0, 9.0]);
    }

    #[test]
    fn test_group_is_a_partition() {
        let records = dataset();
        let spec = MetricSpec::Single(Trait::Time);
        let grouped = group(&records, ProblemType::BtspApprox, &spec).unwrap();

        let mut flattened: Vec<f64> = grouped.values().flatten().copied().collect();
        let mut expected: Vec<f64> = records
            .iter()
            .filter(|r| r.problem_type == ProblemType::BtspApprox)
            .map(|r| r.runtime_seconds)
            .collect();
        flattened.sort_by(f64::total_cmp);
        expected.sort_by(f64::total_cmp);

        assert_eq!(flattened, expected);
    }

    #[test]
    fn test_group_unknown_type_is_empty() {
        let grouped = group(
            &dataset(),
            ProblemType::TspExact,
            &MetricSpec::Single(Trait::Objective),
        )
        .unwrap();

        assert!(grouped.is_empty());
    }

    #[test]
    fn test_group_propagates_division_by_zero() {
        let mut records = dataset();
        records.push(row([0.0, 5.0, 3.0, 0.0, 1.0, 5.0, 5.0, 0.1]));
        let spec = MetricSpec::Ratio {
            numerator: Trait::Objective,
            denominator: Trait::LowerBoundOnOpt,
        };

        let err = group(&records, ProblemType::BtspApprox, &spec).unwrap_err();
        assert!(matches!(err, Error::DivisionByZero { node_count: 5, .. }));
    }

    #[test]
    fn test_group_pair_is_parallel() {
        let (objective, bound) = group_pair(
            &dataset(),
            ProblemType::BtspApprox,
            &MetricSpec::Single(Trait::Objective),
            &MetricSpec::Single(Trait::AFortiori),
        )
        .unwrap();

        assert_eq!(
            objective.keys().collect::<Vec<_>>(),
            bound.keys().collect::<Vec<_>>()
        );
        for (nodes, values) in &objective {
            assert_eq!(values.len(), bound[nodes].len());
        }
        assert_eq!(bound[&6], vec![1.4, 1.8]);
    }
}
