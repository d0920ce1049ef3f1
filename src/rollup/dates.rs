use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Weekday names as the history page prints them, indexed Sunday = 0.
const WEEKDAY_NAMES: [(&str, &str); 7] = [
    ("domingo", "domingo"),
    ("lunes", "lunes"),
    ("martes", "martes"),
    ("miércoles", "miercoles"),
    ("jueves", "jueves"),
    ("viernes", "viernes"),
    ("sábado", "sabado"),
];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

fn weekday_index(label: &str) -> Option<u32> {
    WEEKDAY_NAMES
        .iter()
        .position(|(accented, plain)| label == *accented || label == *plain)
        .map(|idx| idx as u32)
}

fn month_number(token: &str) -> Option<u32> {
    let token = token.trim_end_matches('.');
    if token == "sept" || token == "setiembre" {
        return Some(9);
    }
    MONTH_NAMES
        .iter()
        .position(|name| *name == token)
        .or_else(|| MONTH_ABBREVIATIONS.iter().position(|abbr| *abbr == token))
        .map(|idx| idx as u32 + 1)
}

/// Monday opening the week that contains `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Sunday closing the week that contains `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize].0
}

pub fn month_abbreviation(date: NaiveDate) -> &'static str {
    MONTH_ABBREVIATIONS[date.month0() as usize]
}

fn resolve_absolute(label: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let tokens: Vec<&str> = label
        .split_whitespace()
        .filter(|token| *token != "de")
        .collect();
    let (day, month, year) = match tokens.as_slice() {
        [day, month] => (*day, *month, None),
        [day, month, year] => (*day, *month, Some(*year)),
        _ => return None,
    };

    let day = day.parse::<u32>().ok()?;
    let month = month_number(month)?;
    let year = match year {
        Some(raw) => raw.parse::<i32>().ok()?,
        None => reference.year(),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Resolve a Spanish history section label against `reference`. Weekday names
/// land inside the Monday-start week that contains `reference`.
pub fn resolve(label: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }

    if label == "hoy" {
        return Some(reference);
    }
    if label == "ayer" {
        return reference.pred_opt();
    }
    if let Some(sunday_based) = weekday_index(&label) {
        let offset_from_monday = (sunday_based + 6) % 7;
        return Some(week_start(reference) + Duration::days(i64::from(offset_from_monday)));
    }

    resolve_absolute(&label, reference)
}
