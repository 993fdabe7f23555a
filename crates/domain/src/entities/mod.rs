//! Domain entities - Readings delivered by the sources and the snapshot built from them

mod air_quality;
mod current_conditions;
mod forecast;
mod snapshot;
mod uv_reading;

pub use air_quality::{AirQualityReading, pollutant_label};
pub use current_conditions::{CurrentConditions, sky_glyph};
pub use forecast::{ForecastPoint, ForecastSeries};
pub use snapshot::ConsolidatedSnapshot;
pub use uv_reading::UvReading;
