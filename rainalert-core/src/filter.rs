use crate::{
    error::WeatherError,
    model::{HourlySeries, MatchedRecord, Thresholds},
};

/// Selects every hour among the first `horizon` that is colder than
/// `temperature_max` and rainier than `precipitation_min`.
///
/// Output keeps the chronological order of the series.
pub fn filter(
    series: &HourlySeries,
    thresholds: &Thresholds,
    horizon: usize,
) -> Result<Vec<MatchedRecord>, WeatherError> {
    let matches: Vec<MatchedRecord> = series
        .records(horizon)?
        .filter(|record| thresholds.matches(record))
        .map(MatchedRecord::from)
        .collect();

    tracing::debug!(horizon, matched = matches.len(), "filtered hourly series");
    Ok(matches)
}
