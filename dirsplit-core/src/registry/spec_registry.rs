use super::{PassThroughTable, RegistryConfig, RegistryError};
use crate::model::{DirectionSpec, HeadsignTable, RouteSpec, StopRole};
use std::collections::{BTreeMap, HashMap};

/// immutable reference data for a run: route specs keyed by route id, plus headsign tables.
///
/// built once, validated up front, then shared read-only (behind an `Arc`) by every
/// worker of the engine.
#[derive(Debug, Clone, Default)]
pub struct SpecRegistry {
    routes: BTreeMap<String, RouteSpec>,
    headsign_tables: BTreeMap<(String, String), HeadsignTable>,
    pass_through: BTreeMap<(String, u8), PassThroughTable>,
}

impl SpecRegistry {
    /// validates and stores each route under the key it is registered with.
    pub fn new(
        routes: BTreeMap<String, RouteSpec>,
        pass_through: Vec<PassThroughTable>,
    ) -> Result<Self, RegistryError> {
        let mut headsign_tables = BTreeMap::new();
        for (route_id, spec) in routes.iter() {
            validate_route(route_id, spec)?;
            for direction in spec.directions.iter() {
                let table =
                    HeadsignTable::new(Some(&direction.headsign_label), &direction.headsign_classes);
                headsign_tables.insert(
                    (route_id.clone(), direction.direction_id.clone()),
                    table,
                );
            }
        }

        let mut pass_through_tables: BTreeMap<(String, u8), PassThroughTable> = BTreeMap::new();
        let mut direction_headsigns: HashMap<(&str, &str), u8> = HashMap::new();
        for table in pass_through.iter() {
            for headsign in table.direction_headsigns.iter() {
                let key = (table.route_id.as_str(), headsign.as_str());
                let previous = direction_headsigns.insert(key, table.feed_direction_id);
                if previous.is_some_and(|p| p != table.feed_direction_id) {
                    return Err(RegistryError::ConflictingDirectionHeadsign {
                        route_id: table.route_id.clone(),
                        headsign: headsign.clone(),
                    });
                }
            }
            let key = (table.route_id.clone(), table.feed_direction_id);
            if pass_through_tables.contains_key(&key) {
                return Err(RegistryError::DuplicateHeadsignTable {
                    route_id: table.route_id.clone(),
                    feed_direction_id: table.feed_direction_id,
                });
            }
            pass_through_tables.insert(key, table.clone());
        }

        Ok(Self {
            routes,
            headsign_tables,
            pass_through: pass_through_tables,
        })
    }

    /// reference spec for a route, or None when the route is not registered.
    pub fn lookup(&self, route_id: &str) -> Option<&RouteSpec> {
        self.routes.get(route_id)
    }

    /// headsign table of a registered route direction.
    pub fn headsign_table(&self, route_id: &str, direction_id: &str) -> Option<&HeadsignTable> {
        self.headsign_tables
            .get(&(route_id.to_string(), direction_id.to_string()))
    }

    /// headsign rules of an unregistered route for a GTFS direction.
    pub fn pass_through_table(&self, route_id: &str, feed_direction_id: u8) -> Option<&PassThroughTable> {
        self.pass_through
            .get(&(route_id.to_string(), feed_direction_id))
    }

    /// whether any pass-through table assigns directions from headsigns for this route.
    pub fn infers_direction_from_headsign(&self, route_id: &str) -> bool {
        self.pass_through
            .values()
            .any(|t| t.route_id == route_id && !t.direction_headsigns.is_empty())
    }

    /// feed direction that a pass-through route assigns to a trip headsign.
    pub fn direction_for_headsign(&self, route_id: &str, headsign: &str) -> Option<u8> {
        self.pass_through
            .values()
            .find(|t| t.route_id == route_id && t.direction_headsigns.contains(headsign))
            .map(|t| t.feed_direction_id)
    }

    pub fn route_ids(&self) -> impl Iterator<Item = &String> {
        self.routes.keys()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl TryFrom<&RegistryConfig> for SpecRegistry {
    type Error = RegistryError;

    fn try_from(config: &RegistryConfig) -> Result<Self, Self::Error> {
        let mut routes = BTreeMap::new();
        for route_config in config.routes.iter() {
            let spec = route_config.to_route_spec()?;
            if routes.contains_key(&spec.route_id) {
                return Err(RegistryError::DuplicateRoute(spec.route_id));
            }
            routes.insert(spec.route_id.clone(), spec);
        }
        let pass_through = config.headsigns.iter().map(PassThroughTable::from).collect();
        SpecRegistry::new(routes, pass_through)
    }
}

impl TryFrom<&String> for SpecRegistry {
    type Error = RegistryError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let config = RegistryConfig::try_from(f)?;
        SpecRegistry::try_from(&config)
    }
}

fn validate_route(route_id: &str, spec: &RouteSpec) -> Result<(), RegistryError> {
    let [first, second] = &spec.directions;
    if spec.route_id != route_id {
        return Err(RegistryError::RouteIdMismatch {
            registered: route_id.to_string(),
            declared: spec.route_id.clone(),
            direction_id: first.direction_id.clone(),
        });
    }
    if first.direction_id == second.direction_id {
        return Err(RegistryError::DuplicateDirectionId {
            route_id: route_id.to_string(),
            direction_id: first.direction_id.clone(),
        });
    }
    if first.feed_direction_id == second.feed_direction_id {
        return Err(RegistryError::DuplicateFeedDirection {
            route_id: route_id.to_string(),
            feed_direction_id: first.feed_direction_id,
        });
    }
    validate_direction(route_id, first, second)?;
    validate_direction(route_id, second, first)?;
    Ok(())
}

fn validate_direction(
    route_id: &str,
    direction: &DirectionSpec,
    opposite: &DirectionSpec,
) -> Result<(), RegistryError> {
    if direction.route_id != route_id {
        return Err(RegistryError::RouteIdMismatch {
            registered: route_id.to_string(),
            declared: direction.route_id.clone(),
            direction_id: direction.direction_id.clone(),
        });
    }
    if direction.is_empty() {
        return Err(RegistryError::EmptyReferenceSequence {
            route_id: route_id.to_string(),
            direction_id: direction.direction_id.clone(),
        });
    }

    for stop_ref in direction.reference_sequence.iter() {
        let count = direction.occurrences(&stop_ref.stop_id);
        match stop_ref.role {
            StopRole::Shared if !opposite.contains(&stop_ref.stop_id) => {
                return Err(RegistryError::SharedStopNotInOpposite {
                    route_id: route_id.to_string(),
                    direction_id: direction.direction_id.clone(),
                    stop_id: stop_ref.stop_id.clone(),
                })
            }
            StopRole::Plain if opposite.contains(&stop_ref.stop_id) => {
                return Err(RegistryError::UntaggedSharedStop {
                    route_id: route_id.to_string(),
                    direction_id: direction.direction_id.clone(),
                    stop_id: stop_ref.stop_id.clone(),
                })
            }
            StopRole::Ambiguous if count < 2 => {
                return Err(RegistryError::AmbiguousStopNotRepeated {
                    route_id: route_id.to_string(),
                    direction_id: direction.direction_id.clone(),
                    stop_id: stop_ref.stop_id.clone(),
                })
            }
            StopRole::Plain | StopRole::Shared if count > 1 => {
                return Err(RegistryError::UntaggedRepeatedStop {
                    route_id: route_id.to_string(),
                    direction_id: direction.direction_id.clone(),
                    stop_id: stop_ref.stop_id.clone(),
                    count,
                })
            }
            _ => {}
        }
    }

    // every label maps to exactly one class; the direction label counts as its own class
    let mut owners: HashMap<&str, usize> = HashMap::new();
    owners.insert(direction.headsign_label.as_str(), 0);
    for (idx, class) in direction.headsign_classes.iter().enumerate() {
        let owner = if class.canonical == direction.headsign_label {
            0
        } else {
            idx + 1
        };
        for label in class.labels() {
            let previous = owners.insert(label.as_str(), owner);
            if previous.is_some_and(|p| p != owner) {
                return Err(RegistryError::ConflictingHeadsignLabel {
                    route_id: route_id.to_string(),
                    direction_id: direction.direction_id.clone(),
                    label: label.clone(),
                });
            }
        }
    }
    Ok(())
}
