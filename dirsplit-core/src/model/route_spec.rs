use super::DirectionSpec;
use serde::{Deserialize, Serialize};

/// the two directions of a route. the array type fixes the direction count; the registry
/// checks that both directions belong to `route_id` and are non-empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub route_id: String,
    pub directions: [DirectionSpec; 2],
}

impl RouteSpec {
    pub fn new(route_id: &str, first: DirectionSpec, second: DirectionSpec) -> Self {
        Self {
            route_id: route_id.to_string(),
            directions: [first, second],
        }
    }

    /// the direction at `index`, where index is 0 or 1.
    pub fn direction(&self, index: usize) -> &DirectionSpec {
        &self.directions[index % 2]
    }

    /// the direction opposite to `index`.
    pub fn opposite(&self, index: usize) -> &DirectionSpec {
        &self.directions[(index + 1) % 2]
    }
}
