//! FILENAME: core/pivot-engine/src/lib.rs
//! Pivot pipeline for the merged hierarchical table.
//!
//! This crate is the pure calculation core: it turns the host's flat,
//! row-oriented records into a dense pivoted matrix with span metadata,
//! without touching any UI. Rendering and host glue live in sibling
//! crates (`table-render`, `viz-host`).
//!
//! Layers:
//! - `definition`: Serializable configuration (what the pivot view IS)
//! - `record`: Host-row boundary and typed record extraction
//! - `engine`: Sort, key composition, pivot transform, span grouping
//! - `view`: Renderable output for the table sink (WHAT we display)

pub mod definition;
pub mod engine;
pub mod record;
pub mod view;

pub use definition::*;
pub use engine::{
    calculate_pivot, compose_key, compute_spans, pivot, sort_records, EngineError, PivotError,
};
pub use record::{extract_records, ExtractError, Record, SourceRow};
pub use view::*;
