//! Plain-text rendering of reports and failures

use std::fmt::Write;

use application::AggregateFetchError;
use domain::report::SnapshotReport;
use domain::value_objects::LocationQuery;

/// Marker printed where a split series has no value
const ABSENT: &str = "·";

/// Render a full report for `query`
#[must_use]
pub fn render_report(query: &LocationQuery, report: &SnapshotReport) -> String {
    let mut out = String::new();
    let current = &report.current;
    let uv = &report.uv;
    let air = &report.air_quality;

    let _ = writeln!(out, "📍 {query}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} {:.1}°C ({}) - {}",
        current.glyph, current.temperature_celsius, current.band, current.description
    );
    let _ = writeln!(
        out,
        "   💧 Humidity: {:.0}%   💨 Wind: {:.1} m/s",
        current.humidity_percent, current.wind_speed_mps
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "☀️  UV index: {:.1} ({})", uv.value, uv.risk);
    let _ = writeln!(out, "   {}", uv.advice);
    let _ = writeln!(out, "   at {} on {}", uv.location, uv.observed_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out);
    let _ = writeln!(out, "🌫️  Air quality: AQI {} ({})", air.aqi, air.level);
    for component in &air.components {
        let _ = writeln!(out, "   {:<6} {:>9.2} μg/m³", component.label, component.concentration);
    }
    let _ = writeln!(out);
    out.push_str(&render_forecast(report));
    out
}

/// Render the forecast chart as a table with the split columns
#[must_use]
pub fn render_forecast(report: &SnapshotReport) -> String {
    let chart = &report.forecast;
    let mut out = String::new();

    let _ = writeln!(out, "📈 Forecast (split at {:.1}°C)", chart.cutoff);
    let _ = writeln!(
        out,
        "   {:<5}  {:>6}  {:>6}  {:>6}  {:>6}  {:>6}",
        "time", "temp", "min", "max", "below", "above"
    );

    let rows = chart
        .labels
        .iter()
        .zip(&chart.temperature)
        .zip(&chart.temperature_min)
        .zip(&chart.temperature_max)
        .zip(chart.split.below().iter().zip(chart.split.above()));

    for ((((label, temp), min), max), (below, above)) in rows {
        let _ = writeln!(
            out,
            "   {label:<5}  {temp:>6.1}  {min:>6.1}  {max:>6.1}  {:>6}  {:>6}",
            cell(*below),
            cell(*above)
        );
    }
    out
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| format!("{v:.1}"))
}

/// Render an aggregate failure, one line per failing source
#[must_use]
pub fn render_failure(query: &LocationQuery, error: &AggregateFetchError) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "❌ Could not fetch data for {query}: {} source(s) failed",
        error.failures().len()
    );
    for failure in error.failures() {
        let _ = writeln!(out, "   • {}: {}", failure.kind, failure.error);
    }
    out
}
