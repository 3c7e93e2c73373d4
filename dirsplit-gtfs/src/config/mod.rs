mod failure_policy;
mod split_app_configuration;
mod unregistered_route_policy;

pub use failure_policy::FailurePolicy;
pub use split_app_configuration::SplitAppConfiguration;
pub use unregistered_route_policy::UnregisteredRoutePolicy;
