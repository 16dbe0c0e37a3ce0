//! FILENAME: core/viz-host/src/dataview.rs
//! PURPOSE: Asynchronous data-access boundary to the host.
//! CONTEXT: The host owns the data; the pipeline only ever sees it
//! through this trait. A data view is checked for validation errors
//! first; pivoting runs only on a clean view.

use async_trait::async_trait;
use thiserror::Error;

use pivot_engine::record::SourceRow;

// ============================================================================
// ERRORS
// ============================================================================

/// Any failure of a refresh, from the host call through rendering.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host could not supply rows for the current data view.
    #[error("data view unavailable: {0}")]
    ViewUnavailable(String),

    #[error(transparent)]
    Pivot(#[from] pivot_engine::PivotError),

    #[error(transparent)]
    Render(#[from] table_render::RenderError),
}

// ============================================================================
// DATA VIEW
// ============================================================================

/// One host data view: a finite snapshot of rows plus the validation
/// state the host computed for it. Retrieval is asynchronous and may
/// stall indefinitely; the refresh driver guarantees a stalled call
/// never corrupts previously rendered output.
#[async_trait]
pub trait DataView: Send + Sync {
    type Row: SourceRow + Send + Sync;

    /// Validation problems the host found in this view. An empty list
    /// means the view is clean and rows may be retrieved.
    async fn validation_errors(&self) -> Vec<String>;

    /// The full row set of this view. The collection is complete; there
    /// is no streaming or pagination at this boundary.
    async fn rows(&self) -> Result<Vec<Self::Row>, HostError>;
}
