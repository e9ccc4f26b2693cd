//! pt-BR date labels for content cards and comments.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Label shown when a timestamp cannot be parsed.
pub const DATE_UNAVAILABLE: &str = "Data indisponível";

const MONTHS: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

fn parse_timestamp(iso: &str) -> Option<DateTime<Utc>> {
    let iso = iso.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(iso) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(iso, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(iso, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn date_label(date: &DateTime<Utc>) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `"09 de fev. de 2026"`, in UTC.
pub fn format_date_short(iso: &str) -> String {
    parse_timestamp(iso)
        .map(|date| date_label(&date))
        .unwrap_or_else(|| DATE_UNAVAILABLE.to_string())
}

/// `"09 de fev. de 2026, 12:00"`, in UTC.
pub fn format_date_time(iso: &str) -> String {
    parse_timestamp(iso)
        .map(|date| {
            format!(
                "{}, {:02}:{:02}",
                date_label(&date),
                date.hour(),
                date.minute()
            )
        })
        .unwrap_or_else(|| DATE_UNAVAILABLE.to_string())
}
