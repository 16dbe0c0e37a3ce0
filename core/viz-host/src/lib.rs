//! FILENAME: core/viz-host/src/lib.rs
//! Host glue for the merged pivot table.
//!
//! Connects the pure pipeline (`pivot-engine`) and the renderer
//! (`table-render`) to the host visualization lifecycle: asynchronous
//! row retrieval with validation errors, the error overlay, the
//! render-complete signal, and last-call-wins refresh semantics.
//!
//! Layers:
//! - `dataview`: The asynchronous data-access boundary
//! - `refresh`: The refresh driver and host lifecycle surface

pub mod dataview;
pub mod refresh;

pub use dataview::{DataView, HostError};
pub use refresh::{HostControls, RefreshDriver, RefreshOutcome};
