use std::time::Duration;

use wreq::header::CONTENT_TYPE;
use wreq::{Client, Response, StatusCode};

use crate::config::Config;
use crate::error::{self, FlightError};

#[derive(Clone)]
pub struct FetchOptions {
    pub proxy: Option<String>,
    pub timeout: u64,
}

impl From<&Config> for FetchOptions {
    fn from(config: &Config) -> Self {
        Self {
            proxy: config.proxy.clone(),
            timeout: config.timeout_secs,
        }
    }
}

// A fresh client per request; connections are never reused across calls.
fn build_client(options: &FetchOptions) -> Result<Client, FlightError> {
    let mut builder = Client::builder().timeout(Duration::from_secs(options.timeout));

    if let Some(ref proxy) = options.proxy {
        let proxy =
            wreq::Proxy::all(proxy).map_err(|e| FlightError::ProxyError(e.to_string()))?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(error::from_http_error)
}

fn check_status(response: &Response) -> Result<(), FlightError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(());
    }
    tracing::warn!(status = status.as_u16(), "endpoint returned non-200 status");
    Err(FlightError::UnexpectedStatus {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
    })
}

/// GETs `url` verbatim and returns the body of a 200 response.
pub async fn get_text(url: &str, options: &FetchOptions) -> Result<String, FlightError> {
    let client = build_client(options)?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(error::from_http_error)?;

    check_status(&response)?;
    response.text().await.map_err(error::from_http_error)
}

/// POSTs `body` as JSON and returns the body of a 200 response.
pub async fn post_json(
    url: &str,
    body: Vec<u8>,
    options: &FetchOptions,
) -> Result<String, FlightError> {
    let client = build_client(options)?;
    let response = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .map_err(error::from_http_error)?;

    check_status(&response)?;
    response.text().await.map_err(error::from_http_error)
}
