mod classified_stop;
mod direction_spec;
mod headsign_class;
mod raw_trip;
mod route_spec;
mod stop_ref;
mod trip_variant;

pub use classified_stop::{CanonicalPosition, ClassifiedStop, Placement};
pub use direction_spec::DirectionSpec;
pub use headsign_class::{HeadsignClass, HeadsignTable};
pub use raw_trip::{RawTrip, RawTripStop};
pub use route_spec::RouteSpec;
pub use stop_ref::{StopRef, StopRole};
pub use trip_variant::TripVariant;
