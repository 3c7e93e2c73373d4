use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle a run that
/// produced classification or merge failures
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// write only the summary and exit with an error
    #[default]
    Strict,
    /// write the variants of unaffected routes and exit cleanly
    Permissive,
}
