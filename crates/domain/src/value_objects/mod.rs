//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod location_query;

pub use geo_location::GeoLocation;
pub use location_query::LocationQuery;
