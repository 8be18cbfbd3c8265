pub mod booking;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod query;
pub mod search;
pub mod table;

use config::Config;
use error::FlightError;
use fetch::FetchOptions;
use model::{BookingConfirmation, SearchResult};
use query::TripRequest;

pub async fn search(
    trip: &TripRequest,
    config: &Config,
    options: &FetchOptions,
) -> Result<SearchResult, FlightError> {
    let query = trip.to_query(&config.search_url)?;
    search::fetch_search(&query, options).await
}

/// Searches, then books the first result with the configured passenger.
pub async fn book(
    trip: &TripRequest,
    config: &Config,
    options: &FetchOptions,
) -> Result<BookingConfirmation, FlightError> {
    let result = search(trip, config, options).await?;
    booking::submit_booking(
        &config.booking_url,
        &result.booking_token,
        &config.currency,
        &config.passenger,
        options,
    )
    .await
}
