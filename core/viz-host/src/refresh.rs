//! FILENAME: core/viz-host/src/refresh.rs
//! PURPOSE: Refresh driver - one pipeline run per host data notification.
//! CONTEXT: The host signals "new data view available"; the driver pulls
//! the view, runs the pure pipeline, and swaps the sink content. When
//! refreshes overlap, the most recently started one wins: an older
//! in-flight refresh that completes late discards its result instead of
//! overwriting newer output (there is no cancellation primitive for the
//! host call itself).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use pivot_engine::{calculate_pivot, PivotDefinition};
use table_render::{RenderOptions, TableSink};

use crate::dataview::{DataView, HostError};

// ============================================================================
// HOST CONTROLS
// ============================================================================

/// Host-side lifecycle surface: the error overlay and the render-ready
/// signal used for export/snapshotting.
pub trait HostControls {
    fn show_error_overlay(&self, errors: &[String]);

    fn hide_error_overlay(&self);

    /// Emitted exactly once per successful render, after the sink has
    /// been fully written.
    fn signal_render_complete(&self);
}

impl<T: HostControls + ?Sized> HostControls for Arc<T> {
    fn show_error_overlay(&self, errors: &[String]) {
        (**self).show_error_overlay(errors);
    }

    fn hide_error_overlay(&self) {
        (**self).hide_error_overlay();
    }

    fn signal_render_complete(&self) {
        (**self).signal_render_complete();
    }
}

// ============================================================================
// REFRESH DRIVER
// ============================================================================

/// Outcome of one refresh call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The view was computed and swapped into the sink.
    Rendered,

    /// The host reported validation errors; the overlay was shown and
    /// prior content cleared. The next refresh retries naturally.
    ValidationFailed,

    /// A newer refresh started while this one was in flight; its result
    /// was discarded without touching the sink.
    Superseded,
}

/// Drives the pipeline against a sink. All state here is either static
/// configuration or the current rendered output; nothing else survives
/// across refreshes.
pub struct RefreshDriver<S, C> {
    definition: PivotDefinition,
    options: RenderOptions,
    sink: Mutex<S>,
    controls: C,
    generation: AtomicU64,
}

impl<S: TableSink, C: HostControls> RefreshDriver<S, C> {
    pub fn new(definition: PivotDefinition, sink: S, controls: C) -> Self {
        let options = RenderOptions::from_definition(&definition);
        RefreshDriver {
            definition,
            options,
            sink: Mutex::new(sink),
            controls,
            generation: AtomicU64::new(0),
        }
    }

    pub fn definition(&self) -> &PivotDefinition {
        &self.definition
    }

    /// Runs one refresh to completion. The only suspension points are
    /// the data-view calls; once rows are in hand the pipeline runs
    /// synchronously and the sink is written under the lock in one
    /// piece (render-then-swap).
    pub async fn refresh<V: DataView>(&self, view: &V) -> Result<RefreshOutcome, HostError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("refresh {} started", ticket);

        let errors = view.validation_errors().await;
        if !errors.is_empty() {
            let mut sink = self.sink.lock().unwrap();
            if self.is_stale(ticket) {
                debug!("refresh {} superseded during validation", ticket);
                return Ok(RefreshOutcome::Superseded);
            }
            warn!(
                "refresh {}: {} validation error(s), suppressing render",
                ticket,
                errors.len()
            );
            // Clear rather than leave stale rows under the overlay.
            sink.clear();
            self.controls.show_error_overlay(&errors);
            return Ok(RefreshOutcome::ValidationFailed);
        }

        let rows = view.rows().await?;
        let pivot_view = calculate_pivot(&rows, &self.definition)?;

        let mut sink = self.sink.lock().unwrap();
        if self.is_stale(ticket) {
            debug!("refresh {} superseded, result discarded", ticket);
            return Ok(RefreshOutcome::Superseded);
        }

        self.controls.hide_error_overlay();
        sink.clear();
        sink.render(&pivot_view, &self.options)?;
        self.controls.signal_render_complete();

        debug!(
            "refresh {} rendered {} rows x {} columns",
            ticket,
            pivot_view.matrix.rows.len(),
            pivot_view.matrix.columns.len()
        );
        Ok(RefreshOutcome::Rendered)
    }

    /// Reads the current sink state, e.g. to export rendered output.
    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let sink = self.sink.lock().unwrap();
        f(&sink)
    }

    fn is_stale(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != ticket
    }
}
