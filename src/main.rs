use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use flybook::config::Config;
use flybook::error::FlightError;
use flybook::fetch::FetchOptions;
use flybook::model::{BookingConfirmation, Itinerary, SearchResult};
use flybook::query::{SortKey, TripRequest};
use flybook::table;

#[derive(Parser)]
#[command(
    name = "flybook",
    about = "Search Kiwi flights and book the best match from the terminal",
    version,
    group(ArgGroup::new("sort").args(["cheapest", "shortest", "best", "closest"])),
    group(ArgGroup::new("order").args(["expensive", "longest", "worst", "furthest"])),
    after_help = "\
Examples:
  One-way:      flybook --date 2026-04-01 --from LHR --to JFK
  Return:       flybook --date 2026-04-01 --from LHR --to JFK --return 7
  Fastest:      flybook --date 2026-04-01 --from PRG --to BCN --shortest
  Most pricey:  flybook --date 2026-04-01 --from PRG --to BCN --expensive
  Browse only:  flybook --date 2026-04-01 --from PRG --to BCN --list
  Custom setup: flybook --date 2026-04-01 --from PRG --to BCN --config flybook.toml"
)]
struct Cli {
    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        help = "Departure date",
        long_help = "Departure date in YYYY-MM-DD format."
    )]
    date: Option<String>,

    #[arg(
        long,
        value_name = "CODE",
        help = "Departure location code",
        long_help = "Departure location: airport or city code (e.g. LHR, PRG, city:LON)."
    )]
    from: Option<String>,

    #[arg(
        long,
        value_name = "CODE",
        help = "Arrival location code",
        long_help = "Arrival location: airport or city code (e.g. JFK, BCN, city:NYC)."
    )]
    to: Option<String>,

    #[arg(
        long = "return",
        value_name = "DAYS",
        conflicts_with = "one_way",
        help = "Return after DAYS nights (round-trip)"
    )]
    return_days: Option<u32>,

    #[arg(long, help = "One-way ticket (default)")]
    one_way: bool,

    #[arg(long, help = "Sort by price (default)")]
    cheapest: bool,

    #[arg(long, help = "Sort by flight duration")]
    shortest: bool,

    #[arg(long, help = "Sort by overall quality")]
    best: bool,

    #[arg(long, help = "Sort by departure date")]
    closest: bool,

    #[arg(long, help = "Descending order (most expensive first)")]
    expensive: bool,

    #[arg(long, help = "Descending order (longest first)")]
    longest: bool,

    #[arg(long, help = "Descending order (worst first)")]
    worst: bool,

    #[arg(long, help = "Descending order (latest first)")]
    furthest: bool,

    #[arg(
        long,
        value_name = "PATH",
        help = "TOML configuration file",
        long_help = "TOML file with search_url, booking_url, currency, timeout_secs, proxy \
            and a [passenger] table. Missing keys keep their defaults."
    )]
    config: Option<PathBuf>,

    #[arg(long, value_name = "URL", help = "Override the search endpoint")]
    search_url: Option<String>,

    #[arg(long, value_name = "URL", help = "Override the booking endpoint")]
    booking_url: Option<String>,

    #[arg(long, value_name = "SECS", help = "Request timeout [default: 30]")]
    timeout: Option<u64>,

    #[arg(long, value_name = "URL", help = "HTTP or SOCKS5 proxy")]
    proxy: Option<String>,

    #[arg(long, help = "Only search and list the ranked results, do not book")]
    list: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(short, long, help = "Log requests to stderr")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("flybook=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "flybook=warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn error_code(err: &FlightError) -> i32 {
    match err {
        FlightError::MalformedDate(_)
        | FlightError::InvalidLocation(_)
        | FlightError::Validation(_)
        | FlightError::Config(_) => 2,
        FlightError::Timeout
        | FlightError::ConnectionFailed(_)
        | FlightError::DnsResolution(_)
        | FlightError::TlsError(_)
        | FlightError::ProxyError(_) => 3,
        FlightError::NoResults => 4,
        FlightError::UnexpectedStatus { .. } => 5,
        FlightError::MalformedResponse(_) => 6,
    }
}

fn error_kind(err: &FlightError) -> &'static str {
    match err {
        FlightError::MalformedDate(_) => "malformed_date",
        FlightError::InvalidLocation(_) => "invalid_location",
        FlightError::Validation(_) => "validation_error",
        FlightError::Config(_) => "config_error",
        FlightError::Timeout => "timeout",
        FlightError::ConnectionFailed(_) => "connection_failed",
        FlightError::DnsResolution(_) => "dns_error",
        FlightError::TlsError(_) => "tls_error",
        FlightError::ProxyError(_) => "proxy_error",
        FlightError::NoResults => "no_results",
        FlightError::UnexpectedStatus { .. } => "unexpected_status",
        FlightError::MalformedResponse(_) => "malformed_response",
    }
}

fn die(err: &FlightError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": error_kind(err),
                "message": err.to_string(),
            }
        });
        println!("{json}");
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn sort_key(cli: &Cli) -> SortKey {
    if cli.shortest {
        SortKey::Duration
    } else if cli.best {
        SortKey::Quality
    } else if cli.closest {
        SortKey::Date
    } else {
        SortKey::Price
    }
}

fn ascending(cli: &Cli) -> bool {
    !(cli.expensive || cli.longest || cli.worst || cli.furthest)
}

fn build_trip(cli: &Cli) -> Result<TripRequest, FlightError> {
    let date = cli
        .date
        .as_ref()
        .ok_or_else(|| FlightError::Validation("--date is required".into()))?;
    let from = cli
        .from
        .as_ref()
        .ok_or_else(|| FlightError::Validation("--from is required".into()))?;
    let to = cli
        .to
        .as_ref()
        .ok_or_else(|| FlightError::Validation("--to is required".into()))?;

    Ok(TripRequest {
        origin: from.clone(),
        destination: to.clone(),
        departure: date.clone(),
        stay_days: if cli.one_way { None } else { cli.return_days },
        sort: sort_key(cli),
        ascending: ascending(cli),
    })
}

fn build_config(cli: &Cli) -> Result<Config, FlightError> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;

    if let Some(ref url) = cli.search_url {
        config.search_url = url.clone();
    }
    if let Some(ref url) = cli.booking_url {
        config.booking_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if cli.proxy.is_some() {
        config.proxy = cli.proxy.clone();
    }

    config.validate()?;
    Ok(config)
}

fn print_confirmation(confirmation: &BookingConfirmation, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::json!(confirmation));
    } else {
        println!("{}", confirmation.pnr);
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    booking_token: Option<&'a str>,
    currency: Option<&'a str>,
    itineraries: &'a [Itinerary],
}

// An empty search keeps the same keys, with nulls and an empty list.
fn print_search(result: Option<&SearchResult>, json_mode: bool) {
    if json_mode {
        let output = ListOutput {
            booking_token: result.map(|r| r.booking_token.as_str()),
            currency: result.and_then(|r| r.currency.as_deref()),
            itineraries: result.map(|r| r.itineraries.as_slice()).unwrap_or_default(),
        };
        println!("{}", serde_json::json!(output));
        return;
    }
    match result {
        Some(result) => println!("{}", table::render(result)),
        None => println!("No flights found."),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;

    let config = match build_config(&cli) {
        Ok(c) => c,
        Err(e) => die(&e, json_mode),
    };

    let trip = match build_trip(&cli) {
        Ok(t) => t,
        Err(e) => die(&e, json_mode),
    };

    if let Err(e) = trip.validate() {
        die(&e, json_mode);
    }

    let options = FetchOptions::from(&config);

    if cli.list {
        match flybook::search(&trip, &config, &options).await {
            Ok(result) => print_search(Some(&result), json_mode),
            Err(FlightError::NoResults) => print_search(None, json_mode),
            Err(e) => die(&e, json_mode),
        }
        return;
    }

    match flybook::book(&trip, &config, &options).await {
        Ok(confirmation) => print_confirmation(&confirmation, json_mode),
        Err(e) => die(&e, json_mode),
    }
}
