use super::RegistryError;
use crate::model::{DirectionSpec, HeadsignClass, RouteSpec, StopRef};
use serde::{Deserialize, Serialize};

/// file representation of the reference registry, in TOML or JSON.
///
/// ```toml
/// [[routes]]
/// route_id = "3"
///
/// [[routes.directions]]
/// direction_id = "north"
/// headsign = "Milton Go"
/// stops = ["2286", "2287", { stop_id = "2123", role = "shared" }]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegistryConfig {
    #[serde(default)]
    pub routes: Vec<RouteSpecConfig>,
    /// headsign tables for routes without reference sequences
    #[serde(default)]
    pub headsigns: Vec<PassThroughHeadsignConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RouteSpecConfig {
    pub route_id: String,
    pub directions: Vec<DirectionSpecConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DirectionSpecConfig {
    pub direction_id: String,
    pub headsign: String,
    /// optional, but must match the enclosing route when given
    #[serde(default)]
    pub route_id: Option<String>,
    /// GTFS direction_id of this direction, defaults to its position in the route
    #[serde(default)]
    pub feed_direction_id: Option<u8>,
    pub stops: Vec<StopRefConfig>,
    #[serde(default)]
    pub headsign_classes: Vec<HeadsignClass>,
}

/// a reference stop is written either as a bare stop id (plain) or as a table with a role.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum StopRefConfig {
    Id(String),
    Tagged(StopRef),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PassThroughHeadsignConfig {
    pub route_id: String,
    pub feed_direction_id: u8,
    #[serde(default)]
    pub classes: Vec<HeadsignClass>,
    /// headsigns that assign this feed direction to trips missing a GTFS direction_id
    #[serde(default)]
    pub direction_headsigns: Vec<String>,
}

impl From<&StopRefConfig> for StopRef {
    fn from(value: &StopRefConfig) -> Self {
        match value {
            StopRefConfig::Id(stop_id) => StopRef::plain(stop_id),
            StopRefConfig::Tagged(stop_ref) => stop_ref.clone(),
        }
    }
}

impl RouteSpecConfig {
    /// converts the file representation into a RouteSpec. only structural checks happen
    /// here; stop roles are validated by the registry.
    pub fn to_route_spec(&self) -> Result<RouteSpec, RegistryError> {
        let directions = self
            .directions
            .iter()
            .enumerate()
            .map(|(idx, d)| d.to_direction_spec(&self.route_id, idx))
            .collect::<Result<Vec<_>, _>>()?;
        match <[DirectionSpec; 2]>::try_from(directions) {
            Ok(directions) => Ok(RouteSpec {
                route_id: self.route_id.clone(),
                directions,
            }),
            Err(found) => Err(RegistryError::DirectionCount {
                route_id: self.route_id.clone(),
                count: found.len(),
            }),
        }
    }
}

impl DirectionSpecConfig {
    fn to_direction_spec(&self, route_id: &str, index: usize) -> Result<DirectionSpec, RegistryError> {
        if let Some(declared) = &self.route_id {
            if declared != route_id {
                return Err(RegistryError::RouteIdMismatch {
                    registered: route_id.to_string(),
                    declared: declared.clone(),
                    direction_id: self.direction_id.clone(),
                });
            }
        }
        let feed_direction_id = self.feed_direction_id.unwrap_or(index as u8);
        let reference_sequence = self.stops.iter().map(StopRef::from).collect();
        let spec = DirectionSpec::new(
            route_id,
            &self.direction_id,
            &self.headsign,
            feed_direction_id,
            reference_sequence,
        )
        .with_headsign_classes(self.headsign_classes.clone());
        Ok(spec)
    }
}

impl RegistryConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, RegistryError> {
        toml::from_str(s).map_err(|e| {
            RegistryError::ConfigurationFileError(format!("failure decoding toml: {e}"))
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self, RegistryError> {
        serde_json::from_str(s).map_err(|e| {
            RegistryError::ConfigurationFileError(format!("failure decoding json: {e}"))
        })
    }
}

impl TryFrom<&String> for RegistryConfig {
    type Error = RegistryError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let read = |f: &String| {
            std::fs::read_to_string(f).map_err(|e| {
                RegistryError::ConfigurationFileError(format!("failure reading {f}: {e}"))
            })
        };
        if f.ends_with(".toml") {
            let s = read(f)?;
            toml::from_str(&s).map_err(|e| {
                RegistryError::ConfigurationFileError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = read(f)?;
            serde_json::from_str(&s).map_err(|e| {
                RegistryError::ConfigurationFileError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(RegistryError::ConfigurationFileError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
