//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE the pivot view.
//! These structures are designed to be:
//! - Serializable (for saving/loading a visualization setup)
//! - Immutable snapshots of configuration
//! - Threaded through the pipeline by reference; a refresh never mutates them

use serde::{Deserialize, Serialize};

// ============================================================================
// FIXED CONSTANTS
// ============================================================================

/// Separator between levels inside a category path (e.g. "Assets»Cash").
pub const HIERARCHY_DELIMITER: char = '»';

/// Joiner used for the *displayed* form of a composite key. Key identity
/// is structural (see `CompositeKey`), so category text containing this
/// sequence can only make the displayed key ambiguous, never the row
/// identity.
pub const KEY_DISPLAY_DELIMITER: &str = " » ";

/// Placeholder rendered for missing or non-numeric cells.
pub const SENTINEL: &str = "-";

// ============================================================================
// HIERARCHY
// ============================================================================

/// Grouping depth of the category axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hierarchy {
    /// Single-level: the path is one category segment. Only the category
    /// cell is rendered, spanned over its contiguous run.
    Flat,
    /// Two-level: category plus subcategory segments. Every row renders
    /// its own subcategory cell; only the first row of a contiguous
    /// category run renders (and spans) the category cell.
    Nested,
}

impl Hierarchy {
    /// Number of category-path segments this variant expects,
    /// excluding the trailing discriminator segment.
    pub fn path_depth(&self) -> usize {
        match self {
            Hierarchy::Flat => 1,
            Hierarchy::Nested => 2,
        }
    }
}

impl Default for Hierarchy {
    fn default() -> Self {
        Hierarchy::Nested
    }
}

// ============================================================================
// NUMBER FORMAT
// ============================================================================

/// Numeric display style, from the format-axis token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatStyle {
    Currency,
    Decimal,
    Percent,
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle::Currency
    }
}

/// Explicit per-row numeric format descriptor.
///
/// Parsed once from the format-axis token during extraction (the token
/// carries a style word and a fraction-digit count, e.g. "currency - 2").
/// The renderer consumes this descriptor directly and never re-derives
/// format information from key text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormatSpec {
    pub style: FormatStyle,

    /// ISO 4217 currency code, used when `style` is `Currency`.
    pub currency: String,

    /// Fraction digits always shown.
    pub min_fraction_digits: u8,

    /// Fraction digits at most shown (values are rounded to this count).
    pub max_fraction_digits: u8,
}

impl NumberFormatSpec {
    /// Parses a format-axis token of the form "<style> - <digits>".
    /// An unrecognized style word or digit count falls back to the
    /// corresponding field of `fallback`.
    pub fn parse_token(token: &str, fallback: &NumberFormatSpec) -> NumberFormatSpec {
        let mut parts = token.split('-').map(str::trim);

        let style = match parts.next() {
            Some("currency") => FormatStyle::Currency,
            Some("decimal") => FormatStyle::Decimal,
            Some("percent") => FormatStyle::Percent,
            _ => fallback.style,
        };

        let digits = parts
            .next()
            .and_then(|d| d.parse::<u8>().ok())
            .unwrap_or(fallback.max_fraction_digits);

        NumberFormatSpec {
            style,
            currency: fallback.currency.clone(),
            min_fraction_digits: digits,
            max_fraction_digits: digits,
        }
    }
}

impl Default for NumberFormatSpec {
    fn default() -> Self {
        NumberFormatSpec {
            style: FormatStyle::Currency,
            currency: "USD".to_string(),
            min_fraction_digits: 0,
            max_fraction_digits: 0,
        }
    }
}

// ============================================================================
// MAIN DEFINITION STRUCT
// ============================================================================

/// The complete, serializable definition of the pivot view.
///
/// Names the host axes the extractor reads, selects the hierarchy
/// variant, and carries the static ordering/highlight configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotDefinition {
    /// Categorical axis holding the hierarchical category path.
    pub category_axis: String,

    /// Categorical axis whose distinct values become output columns.
    pub pivot_axis: String,

    /// Categorical axis holding the per-row format token.
    pub format_axis: String,

    /// Continuous axis holding the numeric measure.
    pub value_axis: String,

    /// Header label for the row-axis column of the abstract matrix.
    #[serde(default)]
    pub axis_label: String,

    /// Row grouping depth.
    #[serde(default)]
    pub hierarchy: Hierarchy,

    /// Subcategory values that sort before all others, in list order.
    #[serde(default = "default_sort_priority")]
    pub sort_priority: Vec<String>,

    /// Column labels that receive a distinguishing visual class.
    /// Purely a rendering hint; carries no pivoting semantics.
    #[serde(default = "default_featured_columns")]
    pub featured_columns: Vec<String>,

    /// Format applied when a row's format token cannot be parsed.
    #[serde(default)]
    pub default_format: NumberFormatSpec,
}

fn default_sort_priority() -> Vec<String> {
    vec!["Ending Balance".to_string()]
}

fn default_featured_columns() -> Vec<String> {
    vec!["Forecast".to_string()]
}

impl PivotDefinition {
    /// Creates a definition with the given axis names and default
    /// ordering/highlight configuration.
    pub fn new(
        category_axis: impl Into<String>,
        pivot_axis: impl Into<String>,
        format_axis: impl Into<String>,
        value_axis: impl Into<String>,
    ) -> Self {
        PivotDefinition {
            category_axis: category_axis.into(),
            pivot_axis: pivot_axis.into(),
            format_axis: format_axis.into(),
            value_axis: value_axis.into(),
            axis_label: String::new(),
            hierarchy: Hierarchy::default(),
            sort_priority: default_sort_priority(),
            featured_columns: default_featured_columns(),
            default_format: NumberFormatSpec::default(),
        }
    }

    /// Total segments a composite key decomposes into: the category path
    /// levels plus the trailing discriminator.
    pub fn expected_key_depth(&self) -> usize {
        self.hierarchy.path_depth() + 1
    }
}
