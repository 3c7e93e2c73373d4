use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// what to do with trips on routes that have no reference sequences
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnregisteredRoutePolicy {
    #[default]
    PassThrough,
    Skip,
}

impl UnregisteredRoutePolicy {
    pub fn passes_through(&self) -> bool {
        matches!(self, UnregisteredRoutePolicy::PassThrough)
    }
}
