//! Incremental release of the dataset to the analysis service
//!
//! The dataset is first down-sampled to the rows that sit on interval
//! boundaries. The scheduler then walks that sequence against a virtual
//! clock, overwriting the snapshot artifact with the cumulative prefix at
//! each tick and notifying the uploader.

mod schedule;
mod scheduler;

pub use schedule::{eligible_rows, is_aligned, ReleaseTick, ALIGNMENT_EPSILON};
pub use scheduler::{release_schema, ReleaseReport, ReleaseScheduler, ReleaseSettings};
