//! Trip Feature Engineering
//!
//! Derives the fixed feature schema the trained trip-duration model expects
//! from raw trip parameters. The transform is pure and deterministic; schema
//! reconciliation is an explicit typed step, not a dynamic patch.

mod input;
mod schema;
mod transform;

pub use input::TripInput;
pub use schema::{ColumnSet, ColumnValue, FeatureVector, EXPECTED_COLUMNS, FEATURE_DIMENSION};
pub use transform::{transform, LOG_COLUMNS};
