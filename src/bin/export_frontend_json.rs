// One-shot data preparation: converts the cleaned base-price CSV into
// the JSON array the front-end consumes.

use price_monitor::utils::{parse_money, split_csv_line};
use serde::Serialize;
use std::fs;
use tracing::{error, info, warn};

#[derive(Debug, Serialize, PartialEq)]
struct FrontendPrice {
    product: String,
    price: f64,
    base_price: f64,
    change: f64,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input.csv> <output.json>", args[0]);
        std::process::exit(1);
    }
    let input = &args[1];
    let output = &args[2];

    let content = match fs::read_to_string(input) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to read {input}: {e}");
            std::process::exit(1);
        }
    };

    let prices = convert(&content);
    let json = match serde_json::to_string_pretty(&prices) {
        Ok(j) => j,
        Err(e) => {
            error!("Serialization error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = fs::write(output, json) {
        error!("Failed to write {output}: {e}");
        std::process::exit(1);
    }
    info!("Exported {} products to {output}", prices.len());
}

/// Builds one entry per parseable row. `change` is the percentage above
/// the historical low; a row without a low uses the price itself, so its
/// change is zero.
fn convert(content: &str) -> Vec<FrontendPrice> {
    let mut prices = Vec::new();

    for line in content.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        if fields.len() < 2 {
            warn!("Skipping short row: {line}");
            continue;
        }

        let Some(price) = parse_money(&fields[1]) else {
            warn!("Skipping {}: unparseable price {:?}", fields[0], fields[1]);
            continue;
        };
        let base_price = fields
            .get(2)
            .and_then(|f| parse_money(f))
            .unwrap_or(price);
        if base_price == 0.0 {
            warn!("Skipping {}: zero base price", fields[0]);
            continue;
        }

        let change = (price - base_price) / base_price * 100.0;
        prices.push(FrontendPrice {
            product: fields[0].clone(),
            price,
            base_price,
            change: (change * 100.0).round() / 100.0,
        });
    }
    prices
}
