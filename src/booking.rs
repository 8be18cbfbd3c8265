use crate::error::{self, FlightError};
use crate::fetch::{self, FetchOptions};
use crate::model::{BookingConfirmation, BookingRequest, BookingResponse, PassengerProfile};

pub fn booking_body(
    booking_token: &str,
    currency: &str,
    passenger: &PassengerProfile,
) -> Result<Vec<u8>, FlightError> {
    let request = BookingRequest {
        currency,
        booking_token,
        passengers: [passenger],
    };
    serde_json::to_vec(&request).map_err(|e| FlightError::Validation(e.to_string()))
}

pub fn parse_booking_body(body: &str) -> Result<BookingConfirmation, FlightError> {
    let response: BookingResponse = serde_json::from_str(body).map_err(error::from_json_error)?;
    let pnr = response
        .pnr
        .ok_or_else(|| FlightError::MalformedResponse("booking response has no pnr".into()))?;
    Ok(BookingConfirmation { pnr })
}

pub async fn submit_booking(
    booking_url: &str,
    booking_token: &str,
    currency: &str,
    passenger: &PassengerProfile,
    options: &FetchOptions,
) -> Result<BookingConfirmation, FlightError> {
    let body = booking_body(booking_token, currency, passenger)?;
    tracing::debug!(url = booking_url, currency, "submitting booking");
    let response = fetch::post_json(booking_url, body, options).await?;
    let confirmation = parse_booking_body(&response)?;
    tracing::info!(pnr = %confirmation.pnr, "booking confirmed");
    Ok(confirmation)
}
