// src/import_ml/parse.rs
//
// Parse-or-default helpers for the marketplace export. Bad values degrade to
// None / zero so that one malformed cell never aborts a whole batch.

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime};

/// Portuguese month names as they appear in the export, including the
/// unaccented spelling of março that some exports carry.
static MONTHS_PT: &[(&str, u32)] = &[
    ("janeiro", 1),
    ("fevereiro", 2),
    ("março", 3),
    ("marco", 3),
    ("abril", 4),
    ("maio", 5),
    ("junho", 6),
    ("julho", 7),
    ("agosto", 8),
    ("setembro", 9),
    ("outubro", 10),
    ("novembro", 11),
    ("dezembro", 12),
];

fn month_number(name: &str) -> Option<u32> {
    MONTHS_PT
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, number)| *number)
}

/// Parse the localized sale date, e.g. "05 qua março de 2024 14:30"
/// (day, weekday, month name, "de", year, HH:MM). Anything that does not
/// match yields None.
pub fn parse_sale_date(text: &str) -> Option<NaiveDateTime> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() < 6 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month = month_number(&parts[2].to_lowercase())?;
    let year: i32 = parts[4].parse().ok()?;
    let (hour, minute) = parts[5].split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.trim().to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Units sold: whole number, defaulting to 0 on missing/NaN/garbage.
pub fn cell_to_i64(cell: &Data) -> i64 {
    match cell {
        Data::Int(v) => *v,
        Data::Float(v) if v.is_finite() => *v as i64,
        Data::String(v) => v.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Monetary total: defaulting to 0.0 on missing/NaN/garbage.
pub fn cell_to_f64(cell: &Data) -> f64 {
    match cell {
        Data::Int(v) => *v as f64,
        Data::Float(v) if v.is_finite() => *v,
        Data::String(v) => v.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_accented_month() {
        let parsed = parse_sale_date("05 qua março de 2024 14:30").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn parses_unaccented_month() {
        let parsed = parse_sale_date("1 seg marco de 2023 09:05").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2023, 3, 1)
                .unwrap()
                .and_hms_opt(9, 5, 0)
                .unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_sale_date("not a date"), None);
        assert_eq!(parse_sale_date(""), None);
        assert_eq!(parse_sale_date("32 qua março de 2024 14:30"), None);
        assert_eq!(parse_sale_date("05 qua esmarch de 2024 14:30"), None);
        assert_eq!(parse_sale_date("05 qua março de 2024 25:30"), None);
    }

    #[test]
    fn unit_coercion_defaults_to_zero() {
        assert_eq!(cell_to_i64(&Data::Int(3)), 3);
        assert_eq!(cell_to_i64(&Data::Float(2.0)), 2);
        assert_eq!(cell_to_i64(&Data::Float(f64::NAN)), 0);
        assert_eq!(cell_to_i64(&Data::String("7".to_string())), 7);
        assert_eq!(cell_to_i64(&Data::String("abc".to_string())), 0);
        assert_eq!(cell_to_i64(&Data::Empty), 0);
    }

    #[test]
    fn money_coercion_defaults_to_zero() {
        assert_eq!(cell_to_f64(&Data::Float(45.5)), 45.5);
        assert_eq!(cell_to_f64(&Data::Int(45)), 45.0);
        assert_eq!(cell_to_f64(&Data::Float(f64::NAN)), 0.0);
        assert_eq!(cell_to_f64(&Data::String(" 12.5 ".to_string())), 12.5);
        assert_eq!(cell_to_f64(&Data::Empty), 0.0);
    }
}
