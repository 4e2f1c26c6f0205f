// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Excel serial number plus number format for a `YYYY-MM-DD` date or a
/// `HH:MM[:SS]` time cell; `None` for anything else.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return excel_serial(d).map(|serial| ("dd/mm/yyyy", serial));
    }

    ["%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .map(|t| {
            let seconds = f64::from(t.num_seconds_from_midnight());
            ("hh:mm:ss", seconds / 86400.0)
        })
}

fn excel_serial(d: NaiveDate) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - epoch).num_days() as f64)
}
