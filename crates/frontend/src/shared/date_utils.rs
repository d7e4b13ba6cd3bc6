/// Date helpers for list filters and display
use chrono::{Duration, NaiveDate};

/// Quick date filter for the order list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    /// The last seven days, counting back from today
    Week,
}

impl DateRange {
    /// `<select>` value
    pub fn code(&self) -> &'static str {
        match self {
            DateRange::All => "",
            DateRange::Today => "today",
            DateRange::Week => "week",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::All => "Όλες οι ημερομηνίες",
            DateRange::Today => "Σήμερα",
            DateRange::Week => "Αυτή την εβδομάδα",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "today" => DateRange::Today,
            "week" => DateRange::Week,
            _ => DateRange::All,
        }
    }

    pub fn all() -> [DateRange; 3] {
        [DateRange::All, DateRange::Today, DateRange::Week]
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateRange::All => true,
            DateRange::Today => date == today,
            DateRange::Week => date >= today - Duration::days(7),
        }
    }
}

/// Local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Format a date as DD/MM/YYYY
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format an ISO date-time string as DD/MM/YYYY HH:MM.
/// Unparseable input is returned unchanged.
pub fn format_datetime(datetime_str: &str) -> String {
    let trimmed = datetime_str.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, fmt) {
            return dt.format("%d/%m/%Y %H:%M").to_string();
        }
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(d) => format_date(d),
        Err(_) => datetime_str.to_string(),
    }
}
