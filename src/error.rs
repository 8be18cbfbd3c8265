use std::fmt;

#[derive(Debug)]
pub enum FlightError {
    MalformedDate(String),
    InvalidLocation(String),
    Validation(String),
    Config(String),
    Timeout,
    ConnectionFailed(String),
    DnsResolution(String),
    ProxyError(String),
    TlsError(String),
    UnexpectedStatus { status: u16, reason: String },
    MalformedResponse(String),
    NoResults,
}

impl fmt::Display for FlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDate(date) => write!(
                f,
                "invalid date \"{date}\" — must be a calendar date in YYYY-MM-DD format (e.g. 2026-03-01)"
            ),
            Self::InvalidLocation(code) => write!(
                f,
                "invalid location \"{code}\" — use an airport or city code (e.g. LHR, PRG, city:LON)"
            ),
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::Config(detail) => write!(f, "configuration error — {detail}"),
            Self::Timeout => write!(
                f,
                "request timed out — the flight API may be slow or unreachable. \
                 Try increasing --timeout or check your connection"
            ),
            Self::ConnectionFailed(detail) => write!(
                f,
                "connection failed — check your internet connection ({detail})"
            ),
            Self::DnsResolution(detail) => write!(
                f,
                "DNS resolution failed — check the endpoint URL and your connection ({detail})"
            ),
            Self::ProxyError(detail) => write!(
                f,
                "proxy error — check your --proxy URL is correct ({detail})"
            ),
            Self::TlsError(detail) => write!(f, "TLS/SSL error — secure connection failed ({detail})"),
            Self::UnexpectedStatus { status, reason } => {
                write!(f, "unexpected HTTP status {status}")?;
                if !reason.is_empty() {
                    write!(f, " ({reason})")?;
                }
                Ok(())
            }
            Self::MalformedResponse(detail) => write!(
                f,
                "malformed response from the flight API — {detail}"
            ),
            Self::NoResults => write!(f, "no results found for the specified parameters"),
        }
    }
}

impl std::error::Error for FlightError {}

pub fn from_http_error(err: wreq::Error) -> FlightError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();

    if err.is_timeout() {
        return FlightError::Timeout;
    }

    if err.is_connect() {
        if lower.contains("dns") || lower.contains("resolve") || lower.contains("getaddrinfo") {
            return FlightError::DnsResolution(msg);
        }
        return FlightError::ConnectionFailed(msg);
    }

    if lower.contains("proxy") || lower.contains("socks") {
        return FlightError::ProxyError(msg);
    }

    if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
        return FlightError::TlsError(msg);
    }

    FlightError::ConnectionFailed(msg)
}

pub fn from_json_error(err: serde_json::Error) -> FlightError {
    FlightError::MalformedResponse(err.to_string())
}
