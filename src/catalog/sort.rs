//! Sort stage: stable ordering by a single field

use super::descriptor::SortOrder;
use super::record::{FieldValue, Record};
use std::cmp::Ordering;

/// Compare two optional field values.
///
/// Absent values order first. Values of different kinds compare equal so the
/// stable sort leaves them where the filter stage put them.
pub fn compare_values(a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(&b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(&b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Flag(a), FieldValue::Flag(b)) => a.cmp(&b),
            (FieldValue::Tags(a), FieldValue::Tags(b)) => a.cmp(b),
            _ => Ordering::Equal,
        },
    }
}

/// Sort in place by `field`.
///
/// Both directions are stable: records with equal keys keep their relative
/// order.
pub fn sort_by_field<R: Record>(records: &mut [&R], field: &str, order: SortOrder) {
    match order {
        SortOrder::Ascending => {
            records.sort_by(|a, b| compare_values(a.field(field), b.field(field)))
        }
        SortOrder::Descending => {
            records.sort_by(|a, b| compare_values(b.field(field), a.field(field)))
        }
    }
}
