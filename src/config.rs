use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::FlightError;
use crate::model::PassengerProfile;

pub const DEFAULT_SEARCH_URL: &str = "https://api.skypicker.com/flights?";
pub const DEFAULT_BOOKING_URL: &str = "http://37.139.6.125:8080/booking";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the search query is appended to.
    pub search_url: String,
    pub booking_url: String,
    /// ISO 4217 code sent with every booking.
    pub currency: String,
    pub timeout_secs: u64,
    pub proxy: Option<String>,
    pub passenger: PassengerProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            booking_url: DEFAULT_BOOKING_URL.to_string(),
            currency: "EUR".to_string(),
            timeout_secs: 30,
            proxy: None,
            passenger: PassengerProfile::default(),
        }
    }
}

impl Config {
    /// Reads a TOML file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, FlightError> {
        let text = fs::read_to_string(path)
            .map_err(|e| FlightError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_toml(&text).map_err(|e| match e {
            FlightError::Config(detail) => {
                FlightError::Config(format!("{}: {detail}", path.display()))
            }
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, FlightError> {
        let config: Config = toml::from_str(text).map_err(|e| FlightError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, FlightError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), FlightError> {
        if self.search_url.is_empty() {
            return Err(FlightError::Config("search_url must not be empty".into()));
        }
        if self.booking_url.is_empty() {
            return Err(FlightError::Config("booking_url must not be empty".into()));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(FlightError::Config(format!(
                "currency \"{}\" must be a 3-letter uppercase code (e.g. EUR)",
                self.currency
            )));
        }
        if self.timeout_secs == 0 {
            return Err(FlightError::Config("timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}
