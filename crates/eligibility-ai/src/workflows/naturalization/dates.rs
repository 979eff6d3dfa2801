//! Date parsing for Brazilian case forms.
//!
//! Forms arrive with numeric dates in a handful of layouts and occasionally a
//! written-out date ("15 de março de 2010"). Parsing is lenient: intake keeps
//! the case and records a note when a field does not parse.

use chrono::{Datelike, NaiveDate};

const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%d/%m/%y"];

/// Parse a form date field, trying numeric layouts first and falling back to
/// the written Portuguese form.
pub fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            // chrono's %Y reads "10" as year 10; a two-digit year is OCR
            // shorthand and belongs to the %y layout further down the list.
            if date.year() >= 1000 || format.ends_with("%y") {
                return Some(date);
            }
        }
    }
    normalize_written_date(trimmed)
}

/// Handle "15 de março de 2010" and the unaccented "marco" variant OCR tends
/// to produce.
fn normalize_written_date(raw: &str) -> Option<NaiveDate> {
    let lowered = raw.to_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();
    match parts.as_slice() {
        [day, "de", month, "de", year] => {
            let day: u32 = day.parse().ok()?;
            let month = month_number(month)?;
            let year: i32 = year.parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        }
        _ => None,
    }
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "janeiro" => 1,
        "fevereiro" => 2,
        "março" | "marco" => 3,
        "abril" => 4,
        "maio" => 5,
        "junho" => 6,
        "julho" => 7,
        "agosto" => 8,
        "setembro" => 9,
        "outubro" => 10,
        "novembro" => 11,
        "dezembro" => 12,
        _ => return None,
    };
    Some(month)
}

/// Completed years between two dates, anniversary-adjusted. Negative when
/// `until` precedes `from`, which callers treat as an implausible-fact signal.
pub fn years_between(from: NaiveDate, until: NaiveDate) -> i32 {
    let mut years = until.year() - from.year();
    if (until.month(), until.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}
