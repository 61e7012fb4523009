// One-shot data preparation: synthesizes a week of daily prices per
// product from a cleaned base-price CSV. Independent of the monitoring
// workflow and its history file.

use chrono::{Duration, Utc};
use price_monitor::utils::{csv_field, parse_money, round_cents, split_csv_line};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use tracing::{error, info, warn};

const DEFAULT_DAYS: u32 = 7;
const DEFAULT_SEED: u64 = 42;
/// Fallback when a row carries no parseable base price.
const DEFAULT_BASE_PRICE: f64 = 500.0;

struct ProductRow {
    product: String,
    base_price: f64,
    historical_low: Option<f64>,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <input.csv> <output.csv> [days] [seed]",
            args[0]
        );
        std::process::exit(1);
    }
    let input = &args[1];
    let output = &args[2];
    let days: u32 = match args.get(3).map(|a| a.parse()) {
        None => DEFAULT_DAYS,
        Some(Ok(d)) => d,
        Some(Err(_)) => {
            error!("Invalid day count: {}", args[3]);
            std::process::exit(1);
        }
    };
    let seed: u64 = match args.get(4).map(|a| a.parse()) {
        None => DEFAULT_SEED,
        Some(Ok(s)) => s,
        Some(Err(_)) => {
            error!("Invalid seed: {}", args[4]);
            std::process::exit(1);
        }
    };

    let rows = match load_base_prices(input) {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to read {input}: {e}");
            std::process::exit(1);
        }
    };
    info!("Loaded base prices for {} products", rows.len());

    let csv = generate(&rows, days, seed);
    if let Err(e) = fs::write(output, csv) {
        error!("Failed to write {output}: {e}");
        std::process::exit(1);
    }
    info!("Wrote {days} days of prices for {} products to {output}", rows.len());
}

fn load_base_prices(path: &str) -> std::io::Result<Vec<ProductRow>> {
    let content = fs::read_to_string(path)?;
    let mut rows = Vec::new();

    for line in content.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        if fields.len() < 2 {
            warn!("Skipping short row: {line}");
            continue;
        }

        let base_price = parse_money(&fields[1]).unwrap_or_else(|| {
            warn!(
                "No parseable price for {}, using default {DEFAULT_BASE_PRICE}",
                fields[0]
            );
            DEFAULT_BASE_PRICE
        });
        rows.push(ProductRow {
            product: fields[0].clone(),
            base_price,
            historical_low: fields.get(2).and_then(|f| parse_money(f)),
        });
    }
    Ok(rows)
}

/// Walks each product's price forward one day at a time: daily change
/// uniform in [-2%, +3%], floored at 90% of the historical low when one
/// is known.
fn generate(rows: &[ProductRow], days: u32, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let today = Utc::now().date_naive();

    let mut out = String::from("date,product,price,base_price\n");
    for row in rows {
        let mut current = row.base_price;
        for day in 0..days {
            let date = today - Duration::days((days - 1 - day) as i64);
            let change: f64 = rng.random_range(-0.02..0.03);
            current *= 1.0 + change;
            if let Some(low) = row.historical_low {
                current = current.max(low * 0.9);
            }
            current = round_cents(current);

            out.push_str(&format!(
                "{},{},{:.2},{:.2}\n",
                date.format("%Y-%m-%d"),
                csv_field(&row.product),
                current,
                row.base_price
            ));
        }
    }
    out
}
