//! FILENAME: core/pivot-engine/src/record.rs
//! Row Extractor - Maps opaque host rows into typed records.
//!
//! The host hands the pipeline an opaque row collection; this module is
//! the only place that touches it. Extraction is a pure mapping with no
//! side effects. A missing axis accessor is a configuration error and
//! propagates; bad *data* (an absent measure) is not an error and flows
//! through as `None`.

use thiserror::Error;

use crate::definition::{NumberFormatSpec, PivotDefinition};

// ============================================================================
// SOURCE ROW BOUNDARY
// ============================================================================

/// A single opaque row as exposed by the host data-access API.
///
/// Categorical axes expose an already formatted string value; continuous
/// axes expose a numeric value that may be absent for a given row.
pub trait SourceRow {
    /// Formatted value of a categorical axis, or `None` if no axis with
    /// that name exists on this row.
    fn categorical(&self, axis: &str) -> Option<&str>;

    /// Numeric value of a continuous axis. The outer `None` means no
    /// axis with that name exists; `Some(None)` means the axis exists
    /// but this row carries no value for it.
    fn continuous(&self, axis: &str) -> Option<Option<f64>>;
}

// ============================================================================
// RECORD
// ============================================================================

/// One extracted input record: the unit the sorter and pivot transform
/// operate on.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Raw hierarchical category path, levels separated by
    /// [`HIERARCHY_DELIMITER`](crate::definition::HIERARCHY_DELIMITER).
    pub category: String,

    /// Pivot-axis label; distinct values become output columns.
    pub pivot_axis: String,

    /// Trimmed format-axis token, used as the key discriminator.
    pub format_label: String,

    /// Format descriptor parsed from `format_label`.
    pub format: NumberFormatSpec,

    /// Numeric measure; `None` renders as the sentinel, never an error.
    pub value: Option<f64>,
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Errors raised when the configured axes do not match the host schema.
/// These indicate a malformed integration, not bad data, and are fatal
/// to the refresh that hit them.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("row {row} exposes no categorical axis named {axis:?}")]
    MissingCategoricalAxis { axis: String, row: usize },

    #[error("row {row} exposes no continuous axis named {axis:?}")]
    MissingContinuousAxis { axis: String, row: usize },
}

/// Maps host rows into plain records per the definition's axis names.
pub fn extract_records<R: SourceRow>(
    rows: &[R],
    definition: &PivotDefinition,
) -> Result<Vec<Record>, ExtractError> {
    let mut records = Vec::with_capacity(rows.len());

    for (row_idx, row) in rows.iter().enumerate() {
        let category = categorical(row, &definition.category_axis, row_idx)?;
        let pivot_axis = categorical(row, &definition.pivot_axis, row_idx)?;
        let format_label = categorical(row, &definition.format_axis, row_idx)?.trim().to_string();

        let value = row.continuous(&definition.value_axis).ok_or_else(|| {
            ExtractError::MissingContinuousAxis {
                axis: definition.value_axis.clone(),
                row: row_idx,
            }
        })?;

        let format = NumberFormatSpec::parse_token(&format_label, &definition.default_format);

        records.push(Record {
            category: category.to_string(),
            pivot_axis: pivot_axis.to_string(),
            format_label,
            format,
            value,
        });
    }

    Ok(records)
}

fn categorical<'a, R: SourceRow>(
    row: &'a R,
    axis: &str,
    row_idx: usize,
) -> Result<&'a str, ExtractError> {
    row.categorical(axis)
        .ok_or_else(|| ExtractError::MissingCategoricalAxis {
            axis: axis.to_string(),
            row: row_idx,
        })
}
