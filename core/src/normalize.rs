use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::error::{LogError, Result};

/// Datoformater i prioritert rekkefølge. Rekkefølgen betyr noe:
/// 12/11/25 skal tolkes som måned-først før dag-først-variantene prøves.
pub const DATE_FORMATS: [&str; 5] = [
    "%Y-%m-%d", // 2025-12-22
    "%m/%d/%Y", // 12/22/2025
    "%m/%d/%y", // 12/22/25
    "%d-%b-%y", // 15-Dec-25 (LoseIt)
    "%d-%b-%Y", // 15-Dec-2025
];

const ISO: &str = "%Y-%m-%d";

fn try_format(s: &str, fmt: &str) -> Option<NaiveDate> {
    let d = NaiveDate::parse_from_str(s, fmt).ok()?;
    // chrono godtar "25" for %Y (år 25). Krev firesifret år.
    if fmt.contains("%Y") && !(1000..=9999).contains(&d.year()) {
        return None;
    }
    Some(d)
}

fn parse_date_exact(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| try_format(s, fmt))
        .or_else(|| try_format(&s.replace('/', "-"), ISO))
}

/// Tolker en dato-celle. Feil betyr "hopp over raden", aldri avbrudd.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(LogError::UnparseableDate(raw.to_string()));
    }
    if let Some(d) = parse_date_exact(s) {
        return Ok(d);
    }

    // Tidsstempel ("2025-01-05 17:32:00", "2025-01-05T17:32"): prøv datodelen
    let heads = [
        s.split_whitespace().next(),
        s.split_once('T').map(|(head, _)| head),
    ];
    heads
        .into_iter()
        .flatten()
        .filter(|head| *head != s)
        .find_map(parse_date_exact)
        .ok_or_else(|| LogError::UnparseableDate(raw.to_string()))
}

/// Hvordan en strek ("-") i en celle skal forstås.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Tellekolonne (kcal spist/forbrent): strek = 0, ingen aktivitet.
    Count,
    /// Måling (vekt): strek = ikke målt.
    Measurement,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberCell {
    Value(f64),
    Empty,
    Invalid,
}

fn is_dash(s: &str) -> bool {
    matches!(s, "-" | "–" | "—")
}

fn clean_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ',' | '"' | '\u{a0}'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// "1,729" -> 1729, "" -> Empty, "-" -> 0 eller Empty avhengig av `kind`.
pub fn parse_number(raw: &str, kind: CellKind) -> NumberCell {
    let s = clean_number(raw);
    if s.is_empty() {
        return NumberCell::Empty;
    }
    if is_dash(&s) {
        return match kind {
            CellKind::Count => NumberCell::Value(0.0),
            CellKind::Measurement => NumberCell::Empty,
        };
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => NumberCell::Value(v),
        _ => NumberCell::Invalid,
    }
}

pub fn parse_optional(raw: &str, kind: CellKind) -> Option<f64> {
    match parse_number(raw, kind) {
        NumberCell::Value(v) => Some(v),
        NumberCell::Empty | NumberCell::Invalid => None,
    }
}

/// Heltallsceller i ukeseksporten ("1,729", "2,024\u{a0}", "-").
/// Tom eller strek blir 0; bare sifre og minus beholdes.
pub fn parse_int_like(raw: &str) -> i64 {
    let s = raw.trim();
    if s.is_empty() || is_dash(s) {
        return 0;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return 0;
    }
    cleaned.parse().unwrap_or_else(|_| {
        debug!("kunne ikke tolke heltall '{}', bruker 0", raw);
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_digit_year_formats_reject_two_digit_years() {
        let d = parse_date("12/22/25").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 12, 22).unwrap());
    }

    #[test]
    fn slash_fallback_and_timestamps() {
        let want = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(parse_date("2025/01/05").unwrap(), want);
        assert_eq!(parse_date("2025-01-05 17:32:00").unwrap(), want);
        assert_eq!(parse_date("2025-01-05T17:32").unwrap(), want);
    }

    #[test]
    fn int_like_keeps_digits_and_sign() {
        assert_eq!(parse_int_like("1,729"), 1729);
        assert_eq!(parse_int_like("2,024\u{a0}"), 2024);
        assert_eq!(parse_int_like("-312"), -312);
        assert_eq!(parse_int_like("–"), 0);
        assert_eq!(parse_int_like(""), 0);
    }
}
