//! FILENAME: core/pivot-engine/src/engine.rs
//! Pivot Engine - The calculation core that transforms records into a renderable view.
//!
//! This module takes a PivotDefinition (configuration) and the host's
//! rows (data) and produces a PivotView (dense matrix plus span
//! metadata, ready for rendering).
//!
//! Algorithm:
//! 1. Extract typed records from the opaque host rows
//! 2. Sort records by (category, subcategory) with the priority override
//! 3. Compose one structural key per record and pivot long-to-wide
//! 4. Scan the body rows for contiguous top-level runs (vertical spans)

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::definition::{Hierarchy, NumberFormatSpec, PivotDefinition, HIERARCHY_DELIMITER};
use crate::record::{extract_records, ExtractError, Record, SourceRow};
use crate::view::{CompositeKey, MatrixValue, PivotMatrix, PivotRow, PivotView};

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised while shaping already extracted records.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A body row decomposes into a different number of hierarchy
    /// segments than the configured variant expects. Rows of mixed
    /// depth cannot be merged meaningfully, so this aborts the refresh
    /// instead of mis-rendering.
    #[error("key {key:?} splits into {found} hierarchy segments, expected {expected}")]
    DepthMismatch {
        key: String,
        expected: usize,
        found: usize,
    },
}

/// Any failure of the full extract-sort-pivot-group pipeline.
#[derive(Debug, Error)]
pub enum PivotError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

// ============================================================================
// KEY COMPOSER
// ============================================================================

/// Builds the structural grouping key for a record: the trimmed category
/// path segments followed by the format discriminator. Deterministic and
/// side-effect-free; the same record always composes the same key.
pub fn compose_key(record: &Record) -> CompositeKey {
    let mut segments: SmallVec<[String; 3]> = record
        .category
        .split(HIERARCHY_DELIMITER)
        .map(|segment| segment.trim().to_string())
        .collect();
    segments.push(record.format_label.clone());
    CompositeKey::from_segments(segments)
}

// ============================================================================
// SORTER
// ============================================================================

/// Orders records by (category, subcategory) with the priority override.
/// The sort is stable: records with equal tuples keep their input order.
pub fn sort_records(records: &mut [Record], priority: &[String]) {
    records.sort_by(|a, b| compare_records(a, b, priority));
}

fn compare_records(a: &Record, b: &Record, priority: &[String]) -> Ordering {
    let (category_a, subcategory_a) = sort_fields(&a.category);
    let (category_b, subcategory_b) = sort_fields(&b.category);

    category_a
        .cmp(category_b)
        .then_with(|| match (subcategory_a, subcategory_b) {
            (Some(sub_a), Some(sub_b)) => {
                priority_rank(sub_a, priority).cmp(&priority_rank(sub_b, priority))
            }
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        })
}

/// Splits a category path into its sort tuple: the first trimmed segment
/// and, when the path has more than one level, the last trimmed segment.
fn sort_fields(category: &str) -> (&str, Option<&str>) {
    let mut segments = category.split(HIERARCHY_DELIMITER).map(str::trim);
    let first = segments.next().unwrap_or("");
    (first, segments.last())
}

/// Sort rank for a subcategory value. Values on the priority list rank
/// before every value absent from it and order among themselves by list
/// index; absent values fall back to plain lexicographic order.
fn priority_rank<'a>(subcategory: &'a str, priority: &[String]) -> (u8, usize, &'a str) {
    match priority.iter().position(|p| p == subcategory) {
        Some(index) => (0, index, ""),
        None => (1, 0, subcategory),
    }
}

// ============================================================================
// PIVOT TRANSFORMER
// ============================================================================

/// Accumulates one output row while grouping.
struct RowBucket {
    format: NumberFormatSpec,
    cells: FxHashMap<String, MatrixValue>,
}

/// Long-to-wide transform: sparse (key, column, value) triples into a
/// dense matrix.
///
/// Records must already be ordered by [`sort_records`]; body row order is
/// the first-seen order of keys in the input. If two records share both
/// key and column, the later one wins the cell. Empty input yields a
/// header-only matrix.
pub fn pivot(records: &[Record], definition: &PivotDefinition) -> PivotMatrix {
    let mut buckets: FxHashMap<CompositeKey, RowBucket> = FxHashMap::default();
    let mut key_order: Vec<CompositeKey> = Vec::new();
    let mut columns: Vec<String> = Vec::new();

    for record in records {
        let key = compose_key(record);

        if !columns.contains(&record.pivot_axis) {
            columns.push(record.pivot_axis.clone());
        }

        let bucket = buckets.entry(key.clone()).or_insert_with(|| {
            key_order.push(key);
            RowBucket {
                format: record.format.clone(),
                cells: FxHashMap::default(),
            }
        });

        let value = match record.value {
            Some(v) => MatrixValue::Number(v),
            None => MatrixValue::Missing,
        };
        bucket.cells.insert(record.pivot_axis.clone(), value);
    }

    // Column order is visual order: sorted ascending, independent of
    // row order.
    columns.sort();
    columns.dedup();

    let mut rows = Vec::with_capacity(key_order.len());
    for key in key_order {
        let Some(bucket) = buckets.remove(&key) else {
            continue;
        };
        let cells = columns
            .iter()
            .map(|column| bucket.cells.get(column).copied().unwrap_or(MatrixValue::Missing))
            .collect();
        rows.push(PivotRow {
            key,
            format: bucket.format,
            cells,
        });
    }

    PivotMatrix {
        axis_label: definition.axis_label.clone(),
        columns,
        rows,
    }
}

// ============================================================================
// HIERARCHY GROUPER
// ============================================================================

/// Computes per-row vertical spans over contiguous runs of a shared
/// top-level category segment.
///
/// Validates first that every row decomposes into the depth the variant
/// expects; mixed-depth rows abort with [`EngineError::DepthMismatch`].
/// The first row of each run receives the run length, the remaining rows
/// receive 0.
pub fn compute_spans(matrix: &PivotMatrix, hierarchy: Hierarchy) -> Result<Vec<usize>, EngineError> {
    let expected = hierarchy.path_depth() + 1;
    for row in &matrix.rows {
        if row.key.depth() != expected {
            return Err(EngineError::DepthMismatch {
                key: row.key.to_string(),
                expected,
                found: row.key.depth(),
            });
        }
    }

    let mut spans = vec![0usize; matrix.rows.len()];
    let mut start = 0;
    while start < matrix.rows.len() {
        let top = matrix.rows[start].key.top_level();
        let mut run = 1;
        while start + run < matrix.rows.len() && matrix.rows[start + run].key.top_level() == top {
            run += 1;
        }
        spans[start] = run;
        start += run;
    }

    Ok(spans)
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Runs the full pipeline for one refresh: a pure function of
/// (rows, definition) with no shared mutable state.
pub fn calculate_pivot<R: SourceRow>(
    rows: &[R],
    definition: &PivotDefinition,
) -> Result<PivotView, PivotError> {
    let mut records = extract_records(rows, definition)?;
    sort_records(&mut records, &definition.sort_priority);
    let matrix = pivot(&records, definition);
    let spans = compute_spans(&matrix, definition.hierarchy)?;

    Ok(PivotView {
        matrix,
        spans,
        hierarchy: definition.hierarchy,
    })
}
