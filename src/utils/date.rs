use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveTime};
use clap::ValueEnum;

const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Strict `YYYY-MM-DD`, the storage format.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// `YYYY-MM-DD`, `DD/MM/YYYY`, `YYYY/MM/DD` or `DD-MM-YYYY`.
pub fn parse_date_lenient(s: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s.trim(), fmt).ok())
}

pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date_lenient(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// `HH:MM:SS` or `HH:MM`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s.trim(), "%H:%M"))
        .ok()
}

pub fn require_time(s: &str) -> AppResult<NaiveTime> {
    parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

/// Report periods relative to today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Period {
    Daily,
    /// Monday to Sunday of the current week
    Weekly,
    Monthly,
}

impl Period {
    /// Inclusive `(start, end)` of the period containing `today`.
    pub fn bounds(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Daily => (today, today),
            Period::Weekly => {
                let start = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
                (start, start + Days::new(6))
            }
            Period::Monthly => {
                let start = today.with_day(1).unwrap_or(today);
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(today);
                (start, end)
            }
        }
    }
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((start, end))
}

/// Bounds of one range token: `YYYY`, `YYYY-MM` or a date.
fn token_bounds(tok: &str) -> Option<(NaiveDate, NaiveDate)> {
    let tok = tok.trim();
    match tok.len() {
        4 => {
            let y: i32 = tok.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let (y, m) = tok.split_once('-')?;
            month_bounds(y.parse().ok()?, m.parse().ok()?)
        }
        _ => parse_date_lenient(tok).map(|d| (d, d)),
    }
}

/// Parse `--range`.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any of the above as `start:end`
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let bad = || AppError::InvalidDate(format!("unsupported range: {r}"));

    let (start, end) = match r.split_once(':') {
        Some((a, b)) => (token_bounds(a).ok_or_else(bad)?.0, token_bounds(b).ok_or_else(bad)?.1),
        None => token_bounds(r).ok_or_else(bad)?,
    };

    if start > end {
        return Err(AppError::InvalidDate(format!(
            "range start {start} is after end {end}"
        )));
    }
    Ok((start, end))
}

pub fn week_number(d: NaiveDate) -> u32 {
    d.iso_week().week()
}

pub fn month_name(d: NaiveDate) -> &'static str {
    MONTHS_PT[d.month0() as usize]
}
