pub mod aligner;
pub mod early_order;
pub mod headsign_merger;
pub mod pass_through;
mod route_outcome;
mod run_summary;
mod split_engine;
mod split_error;
pub mod trip_splitter;

pub use early_order::{compare_early, EarlyOrder};
pub use route_outcome::RouteOutcome;
pub use run_summary::{RunReport, RunSummary};
pub use split_engine::SplitEngine;
pub use split_error::{
    ClassificationFailure, ClassificationFailureReason, DataIntegrityWarning, MergeFailure,
};
pub use trip_splitter::{split_trip, TripSplit};
