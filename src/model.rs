use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassengerProfile {
    pub birthday: NaiveDate,
    #[serde(rename = "documentID", alias = "document_id")]
    pub document_id: String,
    pub email: String,
    #[serde(rename = "firstName", alias = "first_name")]
    pub first_name: String,
    #[serde(rename = "lastName", alias = "last_name")]
    pub last_name: String,
    pub title: String,
}

impl Default for PassengerProfile {
    fn default() -> Self {
        Self {
            birthday: NaiveDate::from_ymd_opt(1987, 12, 31).expect("valid date"),
            document_id: "dummyID321".to_string(),
            email: "dummy@email.com".to_string(),
            first_name: "Dummy".to_string(),
            last_name: "Don".to_string(),
            title: "Mr".to_string(),
        }
    }
}

// A field of the wrong type reads as absent instead of failing the whole body.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// One entry of the ranked list returned by the search endpoint. Only the
/// booking token of the first entry is load-bearing; every other field is
/// display-only and tolerates odd shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default, deserialize_with = "lenient")]
    pub booking_token: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<f64>,
    #[serde(rename = "flyFrom", default, deserialize_with = "lenient")]
    pub fly_from: Option<String>,
    #[serde(rename = "flyTo", default, deserialize_with = "lenient")]
    pub fly_to: Option<String>,
    #[serde(rename = "dTime", default, deserialize_with = "lenient")]
    pub departure_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub fly_duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub airlines: Vec<String>,
}

impl Itinerary {
    /// Entries that are not even objects become an empty row.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "_results", default)]
    pub result_count: i64,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub booking_token: String,
    pub currency: Option<String>,
    pub itineraries: Vec<Itinerary>,
}

#[derive(Debug, Serialize)]
pub struct BookingRequest<'a> {
    pub currency: &'a str,
    pub booking_token: &'a str,
    pub passengers: [&'a PassengerProfile; 1],
}

#[derive(Debug, Deserialize)]
pub struct BookingResponse {
    pub pnr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub pnr: String,
}
