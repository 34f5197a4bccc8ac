//! Human-friendly text rendering of a forecast payload.

use chrono::{NaiveDate, NaiveDateTime};
use forecast_core::ForecastPayload;

pub fn render_forecast(payload: &ForecastPayload) {
    let current = &payload.current;

    println!();
    println!(
        "Now: {:.1}°C, {} (updated {})",
        current.temp_c, current.condition.text, current.last_updated
    );
    println!("     {}", current.condition.icon_url());

    if let Some(today) = payload.days.first() {
        println!();
        println!("Today, hourly:");
        for hour in &today.hours {
            println!(
                "  {}  {:>6.1}°C  {}",
                hour_label(&hour.time),
                hour.temp_c,
                hour.condition.text
            );
        }
    }

    if !payload.days.is_empty() {
        println!();
        println!("Daily:");
        for day in &payload.days {
            println!(
                "  {}  {:>6.1}°C .. {:>6.1}°C  {}",
                day_label(&day.date),
                day.min_temp_c,
                day.max_temp_c,
                day.condition.text
            );
        }
    }
    println!();
}

/// `yyyy-MM-dd` -> e.g. `Mon 01 Jan`. Falls back to the raw string when
/// the server sends something unexpected.
fn day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a %d %b").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// `yyyy-MM-dd HH:mm` -> `HH:mm`, with the same fallback.
fn hour_label(time: &str) -> String {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|_| time.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_label_formats_iso_dates() {
        assert_eq!(day_label("2024-01-01"), "Mon 01 Jan");
    }

    #[test]
    fn day_label_falls_back_on_garbage() {
        assert_eq!(day_label("not-a-date"), "not-a-date");
    }

    #[test]
    fn hour_label_extracts_the_time() {
        assert_eq!(hour_label("2024-01-01 09:00"), "09:00");
        assert_eq!(hour_label("???"), "???");
    }
}
