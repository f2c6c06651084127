//! Human-readable rendering of matched hours.

use std::io::{self, Write};

use chrono::NaiveDateTime;

use crate::{
    classify::classify,
    model::{MatchedRecord, Units},
};

const WIRE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Writes one warning line per match, or a single notice when nothing matched.
pub fn write_report<W: Write>(
    out: &mut W,
    city: &str,
    units: &Units,
    matches: &[MatchedRecord],
) -> io::Result<()> {
    let city = title_case(city);

    if matches.is_empty() {
        return writeln!(out, "No data found for {city}");
    }

    let unit = units.temperature_unit();
    for item in matches {
        writeln!(
            out,
            "Warning: {city}, {} {} {} and rain {} {} expected on {}",
            classify(item.temperature, unit),
            item.temperature,
            units.temperature,
            item.precipitation,
            units.precipitation,
            display_time(&item.timestamp),
        )?;
    }

    Ok(())
}

/// Capitalizes every word; words are split on whitespace and hyphens.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for ch in s.trim().chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = ch.is_whitespace() || ch == '-';
    }

    out
}

fn display_time(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, WIRE_TIME_FORMAT)
        .map(|t| t.format(DISPLAY_TIME_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}
