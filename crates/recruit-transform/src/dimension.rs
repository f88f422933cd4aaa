//! Generic surrogate key assignment.
//!
//! Every dimension follows the same recipe: extract a natural key per row,
//! deduplicate, order by the dimension's policy, then number the members
//! `1..=n`. The result is verified before it is handed to the fact builder.

use std::collections::HashSet;
use std::hash::Hash;

use recruit_model::{Dimension, SurrogateKey, TableName};
use tracing::debug;

use crate::error::{Result, TransformError};

/// Member ordering applied before surrogate keys are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy {
    /// Keep the order in which natural keys first appear in the rows.
    FirstOccurrence,
    /// Sort natural keys ascending (chronological for dates, byte-wise
    /// lexicographic for labels).
    Ascending,
}

/// Build one dimension from `rows`.
///
/// An empty row set yields an empty dimension.
pub fn build_dimension<R, K, F>(
    table: TableName,
    rows: &[R],
    natural_key: F,
    policy: SortPolicy,
) -> Result<Dimension<K>>
where
    K: Clone + Eq + Hash + Ord,
    F: Fn(&R) -> K,
{
    let mut seen: HashSet<K> = HashSet::new();
    let mut members: Vec<K> = Vec::new();
    for row in rows {
        let key = natural_key(row);
        if seen.insert(key.clone()) {
            members.push(key);
        }
    }

    if policy == SortPolicy::Ascending {
        members.sort();
    }

    if let Some(last) = members.len().checked_sub(1)
        && SurrogateKey::from_position(last).is_none()
    {
        return Err(TransformError::KeySpaceExhausted {
            table,
            members: members.len(),
        });
    }

    let dimension = Dimension::assign(table, members);
    verify_assignment(&dimension)?;
    debug!(table = %table, rows = dimension.len(), ?policy, "dimension keys assigned");
    Ok(dimension)
}

/// Check that keys are exactly `1..=n` and that each maps back to its member.
pub fn verify_assignment<K>(dimension: &Dimension<K>) -> Result<()>
where
    K: Clone + Eq + Hash,
{
    let table = dimension.table();
    if dimension.index_len() != dimension.len() {
        return Err(TransformError::Assignment {
            table,
            detail: format!(
                "{} members share {} distinct natural keys",
                dimension.len(),
                dimension.index_len()
            ),
        });
    }

    let mut numbered = 0usize;
    for (position, (key, member)) in dimension.rows().enumerate() {
        numbered += 1;
        let expected = position + 1;
        if usize::try_from(key.get()).ok() != Some(expected) {
            return Err(TransformError::Assignment {
                table,
                detail: format!("expected key {expected}, found {key}"),
            });
        }
        if dimension.key_of(member) != Some(key) {
            return Err(TransformError::Assignment {
                table,
                detail: format!("key {key} does not map back to its member"),
            });
        }
    }

    if numbered != dimension.len() {
        return Err(TransformError::Assignment {
            table,
            detail: format!("{numbered} of {} members received keys", dimension.len()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn ascending_policy_sorts_labels() {
        let rows = labels(&["Python", "Go", "Python", "Java"]);
        let dim = build_dimension(
            TableName::DimTechnology,
            &rows,
            Clone::clone,
            SortPolicy::Ascending,
        )
        .expect("build dimension");
        assert_eq!(dim.members(), labels(&["Go", "Java", "Python"]).as_slice());
        assert_eq!(dim.key_of(&"Go".to_string()).map(SurrogateKey::get), Some(1));
        assert_eq!(dim.key_of(&"Python".to_string()).map(SurrogateKey::get), Some(3));
    }

    #[test]
    fn first_occurrence_keeps_input_order() {
        let rows = labels(&["Zed", "Amy", "Zed", "Bob"]);
        let dim = build_dimension(
            TableName::DimCandidate,
            &rows,
            Clone::clone,
            SortPolicy::FirstOccurrence,
        )
        .expect("build dimension");
        assert_eq!(dim.members(), labels(&["Zed", "Amy", "Bob"]).as_slice());
    }

    #[test]
    fn lexicographic_order_is_case_sensitive() {
        let rows = labels(&["banana", "Apple", "apple"]);
        let dim = build_dimension(
            TableName::DimCountry,
            &rows,
            Clone::clone,
            SortPolicy::Ascending,
        )
        .expect("build dimension");
        assert_eq!(dim.members(), labels(&["Apple", "apple", "banana"]).as_slice());
    }

    #[test]
    fn empty_rows_build_empty_dimension() {
        let rows: Vec<String> = Vec::new();
        let dim = build_dimension(TableName::DimCountry, &rows, Clone::clone, SortPolicy::Ascending)
            .expect("build dimension");
        assert!(dim.is_empty());
    }

    #[test]
    fn duplicated_members_are_an_assignment_defect() {
        let dim = Dimension::assign(TableName::DimSeniority, labels(&["Lead", "Lead"]));
        let err = verify_assignment(&dim).expect_err("duplicates detected");
        assert!(matches!(
            err,
            TransformError::Assignment {
                table: TableName::DimSeniority,
                ..
            }
        ));
    }
}
