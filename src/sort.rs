//! Row ordering for the values table.

use crate::model::{SortOrder, ValueRow};
use std::cmp::Ordering;

/// Order the rows of one values file according to the chosen policy.
///
/// Total for any input: the result holds exactly the input rows, merely
/// reordered. Both policies use a stable sort so rows with equal keys keep
/// their relative source order.
pub fn sort_rows(mut rows: Vec<ValueRow>, order: SortOrder) -> Vec<ValueRow> {
    match order {
        SortOrder::FileOrder => rows.sort_by(file_order),
        SortOrder::AlphaNum => rows.sort_by(|a, b| a.key.cmp(&b.key)),
    }
    rows
}

/// Two-key comparator: by line, ties broken by column.
fn file_order(a: &ValueRow, b: &ValueRow) -> Ordering {
    match a.line.cmp(&b.line) {
        Ordering::Equal => a.column.cmp(&b.column),
        other => other,
    }
}
