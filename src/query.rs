use chrono::{Days, NaiveDate};

use crate::error::FlightError;

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
const QUERY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Placeholder the search endpoint expects in the `booking_token` slot.
/// Already percent-encoded; the query string is never re-encoded.
const BOOKING_TOKEN_PLACEHOLDER: &str = "hashed%20data";
const RESULT_OFFSET: u32 = 0;
const RESULT_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    Quality,
    Date,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Duration => "duration",
            Self::Quality => "quality",
            Self::Date => "date",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub stay_days: Option<u32>,
    pub sort: SortKey,
    pub ascending: bool,
}

pub fn parse_date(date: &str) -> Result<NaiveDate, FlightError> {
    NaiveDate::parse_from_str(date, INPUT_DATE_FORMAT)
        .map_err(|_| FlightError::MalformedDate(date.to_string()))
}

pub fn format_query_date(date: NaiveDate) -> String {
    date.format(QUERY_DATE_FORMAT).to_string()
}

/// The single formatting rule for the `asc` parameter.
pub fn format_ascending(ascending: bool) -> &'static str {
    if ascending {
        "1"
    } else {
        "0"
    }
}

fn validate_location(code: &str) -> Result<(), FlightError> {
    let valid = !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':'));
    if !valid {
        return Err(FlightError::InvalidLocation(code.to_string()));
    }
    Ok(())
}

fn join_base(base_url: &str) -> String {
    let mut base = base_url.to_string();
    if !(base.ends_with('?') || base.ends_with('&')) {
        base.push(if base.contains('?') { '&' } else { '?' });
    }
    base
}

impl TripRequest {
    pub fn validate(&self) -> Result<(), FlightError> {
        validate_location(&self.origin)?;
        validate_location(&self.destination)?;
        self.dates().map(|_| ())
    }

    /// Departure date and, for return trips, departure plus the stay length.
    pub fn dates(&self) -> Result<(NaiveDate, Option<NaiveDate>), FlightError> {
        let departure = parse_date(&self.departure)?;
        let ret = match self.stay_days {
            None => None,
            Some(days) => Some(
                departure
                    .checked_add_days(Days::new(u64::from(days)))
                    .ok_or_else(|| FlightError::MalformedDate(self.departure.clone()))?,
            ),
        };
        Ok((departure, ret))
    }

    pub fn to_query(&self, base_url: &str) -> Result<String, FlightError> {
        validate_location(&self.origin)?;
        validate_location(&self.destination)?;
        let (departure, ret) = self.dates()?;

        let mut query = join_base(base_url);
        query.push_str(&format!("flyFrom={}", self.origin));
        query.push_str(&format!("&to={}", self.destination));
        query.push_str(&format!("&dateFrom={}", format_query_date(departure)));
        if let Some(ret) = ret {
            query.push_str(&format!("&dateTo={}", format_query_date(ret)));
        }
        query.push_str(&format!(
            "&booking_token={BOOKING_TOKEN_PLACEHOLDER}&offset={RESULT_OFFSET}&limit={RESULT_LIMIT}&sort={}&asc={}",
            self.sort.as_str(),
            format_ascending(self.ascending),
        ));

        Ok(query)
    }
}
