use serde_json::Value;

use crate::error::{self, FlightError};
use crate::fetch::{self, FetchOptions};
use crate::model::{Itinerary, SearchResponse, SearchResult};

/// Extracts the booking token of the first ranked result from a search body.
pub fn parse_search_body(body: &str) -> Result<SearchResult, FlightError> {
    let response: SearchResponse = serde_json::from_str(body).map_err(error::from_json_error)?;

    if response.result_count <= 0 {
        return Err(FlightError::NoResults);
    }

    let first = response.data.first().ok_or_else(|| {
        FlightError::MalformedResponse(format!(
            "_results is {} but the data list is empty",
            response.result_count
        ))
    })?;
    let booking_token = first
        .get("booking_token")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            FlightError::MalformedResponse("first result has no booking_token".into())
        })?
        .to_string();

    Ok(SearchResult {
        booking_token,
        currency: response.currency,
        itineraries: response.data.into_iter().map(Itinerary::from_value).collect(),
    })
}

pub async fn fetch_search(
    query: &str,
    options: &FetchOptions,
) -> Result<SearchResult, FlightError> {
    tracing::debug!(%query, "searching flights");
    let body = fetch::get_text(query, options).await?;
    let result = parse_search_body(&body)?;
    tracing::info!(
        results = result.itineraries.len(),
        "search returned results, using the first"
    );
    Ok(result)
}
