//! FILENAME: core/pivot-engine/src/view.rs
//! Pivot View - Renderable output for the table sink.
//!
//! Everything a renderer needs and nothing it doesn't: the dense matrix,
//! per-row span counts, and per-row format descriptors. The view is
//! rebuilt from scratch on every refresh; nothing in it survives across
//! refreshes.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::definition::{Hierarchy, NumberFormatSpec, KEY_DISPLAY_DELIMITER, SENTINEL};

// ============================================================================
// COMPOSITE KEY
// ============================================================================

/// Identity of one pivoted output row.
///
/// Holds the trimmed category path segments plus the trailing
/// discriminator segment. Identity (`Eq`/`Hash`) is over the segment
/// list, so category text containing the display delimiter cannot
/// collide two distinct keys; only the *displayed* form can become
/// ambiguous in that case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeKey {
    segments: SmallVec<[String; 3]>,
}

impl CompositeKey {
    pub fn from_segments(segments: SmallVec<[String; 3]>) -> Self {
        CompositeKey { segments }
    }

    /// All segments: category path levels followed by the discriminator.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Total segment count.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Top-level category segment; the unit of vertical merging.
    pub fn top_level(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or("")
    }

    /// Second path segment, when the key carries one beyond the
    /// top-level category and the discriminator.
    pub fn subcategory(&self) -> Option<&str> {
        if self.segments.len() > 2 {
            Some(self.segments[1].as_str())
        } else {
            None
        }
    }

    /// Trailing discriminator segment.
    pub fn discriminator(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(KEY_DISPLAY_DELIMITER))
    }
}

// ============================================================================
// MATRIX CELLS
// ============================================================================

/// One cell of the pivoted matrix. `Missing` marks a (key, column) pair
/// no record supplied a value for; it displays as the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatrixValue {
    Number(f64),
    Missing,
}

impl MatrixValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, MatrixValue::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MatrixValue::Number(n) => Some(*n),
            MatrixValue::Missing => None,
        }
    }
}

impl fmt::Display for MatrixValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixValue::Number(n) => write!(f, "{}", n),
            MatrixValue::Missing => write!(f, "{}", SENTINEL),
        }
    }
}

// ============================================================================
// MATRIX
// ============================================================================

/// One body row: its key, its format descriptor, and one cell per
/// header column (aligned with `PivotMatrix::columns`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotRow {
    pub key: CompositeKey,
    pub format: NumberFormatSpec,
    pub cells: Vec<MatrixValue>,
}

/// The dense pivoted matrix. Column labels are sorted ascending and
/// deduplicated; body rows appear in first-seen order of their keys in
/// the (already sorted) input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotMatrix {
    /// Header label of the row-axis column.
    pub axis_label: String,

    /// Sorted distinct pivot-axis values.
    pub columns: Vec<String>,

    /// Body rows, one per distinct composite key.
    pub rows: Vec<PivotRow>,
}

impl PivotMatrix {
    /// The header row: axis label followed by the sorted column labels.
    pub fn header(&self) -> Vec<&str> {
        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push(self.axis_label.as_str());
        header.extend(self.columns.iter().map(String::as_str));
        header
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// VIEW
// ============================================================================

/// The complete renderable result of one refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotView {
    pub matrix: PivotMatrix,

    /// Per-row vertical span of the category cell, aligned with
    /// `matrix.rows`. The first row of each contiguous top-level run
    /// carries the run length; the remaining rows of the run carry 0
    /// (their category cell is merged into the first).
    pub spans: Vec<usize>,

    /// Hierarchy variant the renderer must lay the rows out with.
    pub hierarchy: Hierarchy,
}
