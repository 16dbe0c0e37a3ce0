//! FILENAME: core/table-render/src/lib.rs
//! Table renderer for the pivot view.
//!
//! Consumes the computed PivotView and produces the visual table. The
//! renderer is a sink: it receives the already-computed matrix and span
//! metadata, and never reaches back into pivoting logic. Leading key
//! columns are always rendered as text; only measure cells go through
//! numeric formatting.
//!
//! Layers:
//! - `format`: Numeric display formatting (grouping, currency, percent)
//! - `html`: Concrete HTML string sink

pub mod format;
pub mod html;

use thiserror::Error;

use pivot_engine::{PivotDefinition, PivotView};

pub use format::format_value;
pub use html::HtmlTable;

// ============================================================================
// RENDER OPTIONS
// ============================================================================

/// Static rendering hints, derived from configuration once and reused
/// across refreshes.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Column labels that receive the distinguishing `featured` class.
    pub featured_columns: Vec<String>,
}

impl RenderOptions {
    pub fn from_definition(definition: &PivotDefinition) -> Self {
        RenderOptions {
            featured_columns: definition.featured_columns.clone(),
        }
    }
}

// ============================================================================
// SINK CONTRACT
// ============================================================================

/// Errors raised by a sink while writing a view.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("span metadata covers {spans} rows but the matrix has {rows}")]
    SpanMismatch { spans: usize, rows: usize },
}

/// A render target for the pivot view. `render` replaces any previously
/// written content wholesale; there is no incremental patching.
pub trait TableSink {
    /// Drop all previously rendered content.
    fn clear(&mut self);

    /// Write a freshly computed view, replacing prior content.
    fn render(&mut self, view: &PivotView, options: &RenderOptions) -> Result<(), RenderError>;
}
