mod pass_through_table;
mod registry_config;
mod registry_error;
mod spec_registry;

pub use pass_through_table::PassThroughTable;
pub use registry_config::{
    DirectionSpecConfig, PassThroughHeadsignConfig, RegistryConfig, RouteSpecConfig,
    StopRefConfig,
};
pub use registry_error::RegistryError;
pub use spec_registry::SpecRegistry;
