use super::{FailurePolicy, UnregisteredRoutePolicy};
use crate::feed::RouteKeyRules;
use ::config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// prefix of environment variables that override the configuration file,
/// such as `DIRSPLIT_FAILURE_POLICY=permissive`.
pub const ENV_PREFIX: &str = "DIRSPLIT";

/// settings of a split run that are not part of the route registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SplitAppConfiguration {
    pub failure_policy: FailurePolicy,
    pub unregistered_routes: UnregisteredRoutePolicy,
    /// trips with one of these headsigns are not revenue service. compared case-insensitively.
    pub excluded_headsigns: Vec<String>,
    /// regular expressions removed from each raw stop id, in order
    pub stop_id_patterns: Vec<String>,
    /// key routes by a number derived from the route short name instead of the route_id
    pub derive_route_ids: bool,
    pub route_key_rules: RouteKeyRules,
    pub overwrite: bool,
}

impl Default for SplitAppConfiguration {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            unregistered_routes: UnregisteredRoutePolicy::default(),
            excluded_headsigns: vec![String::from("Not In Service")],
            stop_id_patterns: vec![],
            derive_route_ids: false,
            route_key_rules: RouteKeyRules::default(),
            overwrite: false,
        }
    }
}

impl SplitAppConfiguration {
    /// reads the configuration from an optional file (format chosen by extension),
    /// layered under `DIRSPLIT_*` environment variables.
    pub fn new(configuration_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(f) = configuration_file {
            builder = builder.add_source(File::with_name(f));
        }
        let config = builder.add_source(environment()).build()?;
        config.try_deserialize()
    }

    /// reads the configuration from a TOML string without consulting the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// the rules used to key routes, or None when trips keep their feed route_id.
    pub fn route_keys(&self) -> Option<RouteKeyRules> {
        if self.derive_route_ids {
            Some(self.route_key_rules.clone())
        } else {
            None
        }
    }
}

/// `DIRSPLIT_` followed by the field name. nested fields are joined with `__`,
/// such as `DIRSPLIT_ROUTE_KEY_RULES__DIRECTION_MARKERS`.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let conf = SplitAppConfiguration::from_toml_str("").expect("valid configuration");
        assert_eq!(conf, SplitAppConfiguration::default());
        assert_eq!(conf.excluded_headsigns, vec!["Not In Service"]);
        assert!(conf.route_keys().is_none());
    }

    #[test]
    fn test_read_policies_and_rules() {
        let toml = r#"
failure_policy = "permissive"
unregistered_routes = "skip"
stop_id_patterns = ["(?i)^mi", "(?i)t$"]
derive_route_ids = true

[route_key_rules]
direction_markers = ["EB", "WB"]

[route_key_rules.special_names]
DMSF = 99000
"#;
        let conf = SplitAppConfiguration::from_toml_str(toml).expect("valid configuration");
        assert_eq!(conf.failure_policy, FailurePolicy::Permissive);
        assert_eq!(conf.unregistered_routes, UnregisteredRoutePolicy::Skip);
        assert!(!conf.unregistered_routes.passes_through());
        assert_eq!(conf.stop_id_patterns.len(), 2);
        let rules = conf.route_keys().expect("route keys are derived");
        assert_eq!(rules.direction_markers, vec!["EB", "WB"]);
        // omitted rule tables fall back to their defaults
        assert_eq!(rules.suffix_offsets.get("B"), Some(&20_000));
        let key = crate::feed::route_key::derive_route_key("DMSF", &rules).expect("special name");
        assert_eq!(key, 99_000);
    }

    #[test]
    fn test_sample_configuration() {
        let toml = include_str!("../../config/milton_transit_app.toml");
        let conf = SplitAppConfiguration::from_toml_str(toml).expect("valid configuration");
        assert_eq!(conf.failure_policy, FailurePolicy::Strict);
        assert!(conf.unregistered_routes.passes_through());
        assert_eq!(conf.stop_id_patterns, vec!["(?i)^mi", "(?i)t$"]);
        assert_eq!(conf.route_keys(), Some(RouteKeyRules::default()));
    }

    #[test]
    fn test_environment_overrides_file() {
        let variables = ::config::Map::from([
            (String::from("DIRSPLIT_FAILURE_POLICY"), String::from("permissive")),
            (String::from("DIRSPLIT_OVERWRITE"), String::from("true")),
        ]);
        let conf: SplitAppConfiguration = Config::builder()
            .add_source(File::from_str(r#"failure_policy = "strict""#, FileFormat::Toml))
            .add_source(environment().source(Some(variables)))
            .build()
            .expect("valid sources")
            .try_deserialize()
            .expect("valid configuration");
        assert_eq!(conf.failure_policy, FailurePolicy::Permissive);
        assert!(conf.overwrite);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = SplitAppConfiguration::from_toml_str(r#"failure_policy = "lenient""#);
        assert!(result.is_err());
    }
}
