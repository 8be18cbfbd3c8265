use flybook::error::FlightError;
use flybook::query::{format_ascending, parse_date, SortKey, TripRequest};

const BASE: &str = "https://api.skypicker.com/flights?";

fn make_trip() -> TripRequest {
    TripRequest {
        origin: "LHR".into(),
        destination: "JFK".into(),
        departure: "2024-06-01".into(),
        stay_days: None,
        sort: SortKey::Price,
        ascending: true,
    }
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn one_way_query_is_byte_exact() {
    let query = make_trip().to_query(BASE).unwrap();
    assert_eq!(
        query,
        "https://api.skypicker.com/flights?flyFrom=LHR&to=JFK&dateFrom=01/06/2024\
         &booking_token=hashed%20data&offset=0&limit=5&sort=price&asc=1"
    );
}

#[test]
fn return_trip_adds_date_to() {
    let mut trip = make_trip();
    trip.stay_days = Some(7);
    let query = trip.to_query(BASE).unwrap();
    assert_eq!(count(&query, "&dateFrom="), 1);
    assert_eq!(count(&query, "&dateTo="), 1);
    assert!(query.contains("dateFrom=01/06/2024"));
    assert!(query.contains("dateTo=08/06/2024"));
}

#[test]
fn date_to_follows_date_from() {
    let mut trip = make_trip();
    trip.stay_days = Some(3);
    let query = trip.to_query(BASE).unwrap();
    let from = query.find("&dateFrom=").unwrap();
    let to = query.find("&dateTo=").unwrap();
    let tail = query.find("&booking_token=").unwrap();
    assert!(from < to && to < tail);
}

#[test]
fn one_way_never_has_date_to() {
    let query = make_trip().to_query(BASE).unwrap();
    assert!(!query.contains("dateTo"));
}

#[test]
fn zero_day_stay_returns_same_day() {
    let mut trip = make_trip();
    trip.stay_days = Some(0);
    let query = trip.to_query(BASE).unwrap();
    assert!(query.contains("dateTo=01/06/2024"));
}

#[test]
fn stay_crosses_month_and_year() {
    let mut trip = make_trip();
    trip.departure = "2024-12-28".into();
    trip.stay_days = Some(5);
    let query = trip.to_query(BASE).unwrap();
    assert!(query.contains("dateFrom=28/12/2024"));
    assert!(query.contains("dateTo=02/01/2025"));
}

#[test]
fn stay_over_leap_day() {
    let mut trip = make_trip();
    trip.departure = "2028-02-27".into();
    trip.stay_days = Some(2);
    let query = trip.to_query(BASE).unwrap();
    assert!(query.contains("dateTo=29/02/2028"));
}

#[test]
fn ascending_maps_to_one() {
    let query = make_trip().to_query(BASE).unwrap();
    assert!(query.ends_with("&asc=1"));
    assert_eq!(format_ascending(true), "1");
}

#[test]
fn descending_maps_to_zero() {
    let mut trip = make_trip();
    trip.ascending = false;
    let query = trip.to_query(BASE).unwrap();
    assert!(query.ends_with("&asc=0"));
    assert_eq!(format_ascending(false), "0");
}

#[test]
fn sort_keys_in_tail() {
    for (key, text) in [
        (SortKey::Price, "sort=price"),
        (SortKey::Duration, "sort=duration"),
        (SortKey::Quality, "sort=quality"),
        (SortKey::Date, "sort=date"),
    ] {
        let mut trip = make_trip();
        trip.sort = key;
        let query = trip.to_query(BASE).unwrap();
        assert!(query.contains(&format!("&{text}&asc=")), "{query}");
    }
}

#[test]
fn placeholder_token_is_not_reencoded() {
    let query = make_trip().to_query(BASE).unwrap();
    assert!(query.contains("&booking_token=hashed%20data&offset=0&limit=5&"));
    assert!(!query.contains("%25"));
}

#[test]
fn base_without_question_mark_gets_one() {
    let query = make_trip().to_query("http://localhost:9000/flights").unwrap();
    assert!(query.starts_with("http://localhost:9000/flights?flyFrom=LHR&"));
}

#[test]
fn base_with_existing_params_gets_ampersand() {
    let query = make_trip()
        .to_query("http://localhost:9000/flights?partner=picky")
        .unwrap();
    assert!(query.starts_with("http://localhost:9000/flights?partner=picky&flyFrom=LHR&"));
}

#[test]
fn rejects_day_first_date() {
    let mut trip = make_trip();
    trip.departure = "01-06-2024".into();
    assert!(matches!(
        trip.to_query(BASE),
        Err(FlightError::MalformedDate(d)) if d == "01-06-2024"
    ));
}

#[test]
fn rejects_impossible_date() {
    let mut trip = make_trip();
    trip.departure = "2025-02-29".into();
    assert!(matches!(trip.validate(), Err(FlightError::MalformedDate(_))));
}

#[test]
fn rejects_trailing_garbage_in_date() {
    assert!(parse_date("2024-06-01T10:00").is_err());
    assert!(parse_date("").is_err());
}

#[test]
fn accepts_city_style_location() {
    let mut trip = make_trip();
    trip.origin = "city:LON".into();
    let query = trip.to_query(BASE).unwrap();
    assert!(query.contains("flyFrom=city:LON&to=JFK"));
}

#[test]
fn rejects_location_that_breaks_query() {
    for bad in ["", "LHR&to=XXX", "L H R", "JFK#", "a=b"] {
        let mut trip = make_trip();
        trip.destination = bad.into();
        assert!(
            matches!(trip.validate(), Err(FlightError::InvalidLocation(_))),
            "{bad:?} should be rejected"
        );
    }
}
