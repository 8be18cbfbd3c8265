use chrono::DateTime;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

use crate::model::{Itinerary, SearchResult};

pub fn format_price(price: Option<f64>, currency: &str) -> String {
    let p = match price {
        Some(p) => p.round() as i64,
        None => return "—".to_string(),
    };
    match currency {
        "USD" => format!("${p}"),
        "EUR" => format!("€{p}"),
        "GBP" => format!("£{p}"),
        "JPY" | "CNY" => format!("¥{p}"),
        _ => format!("{p} {currency}"),
    }
}

/// Formats a unix timestamp as UTC `YYYY-MM-DD HH:MM`.
pub fn format_departure(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(|t| DateTime::from_timestamp(t, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "—".to_string())
}

fn route(itinerary: &Itinerary) -> String {
    match (&itinerary.fly_from, &itinerary.fly_to) {
        (Some(from), Some(to)) => format!("{from} → {to}"),
        _ => "—".to_string(),
    }
}

pub fn render(result: &SearchResult) -> String {
    let currency = result.currency.as_deref().unwrap_or("EUR");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Route", "Depart (UTC)", "Duration", "Airlines", "Price"]);

    for (idx, itinerary) in result.itineraries.iter().enumerate() {
        let duration = itinerary
            .fly_duration
            .clone()
            .unwrap_or_else(|| "—".to_string());

        let airlines = if itinerary.airlines.is_empty() {
            "—".to_string()
        } else {
            itinerary.airlines.join(", ")
        };

        // Index 0 is the fare that would be booked.
        let rank = if idx == 0 {
            format!("{} *", idx + 1)
        } else {
            (idx + 1).to_string()
        };

        table.add_row(vec![
            rank,
            route(itinerary),
            format_departure(itinerary.departure_time),
            duration,
            airlines,
            format_price(itinerary.price, currency),
        ]);
    }

    table.to_string()
}
