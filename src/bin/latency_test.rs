//! Latency harness for `PATCH /orders/{id}/status`.
//!
//! Repeatedly updates one order's status, cycling through a fixed status
//! list, and reports median/p95/p99 latency against the 400 ms median
//! target:
//!
//!   cargo run --bin latency_test -- --order-id <id> --runs 200 --concurrency 4

use std::time::{Duration, Instant};

use clap::Parser;
use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::json;

const MEDIAN_TARGET_MS: f64 = 400.0;

#[derive(Debug, Parser)]
#[command(about = "Latency test for PATCH /orders/{id}/status")]
struct Args {
    /// Base URL of the API
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Order id to update repeatedly
    #[arg(long)]
    order_id: String,

    /// Number of total requests
    #[arg(long, default_value_t = 100)]
    runs: usize,

    /// Concurrent workers
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Comma-separated statuses to cycle
    #[arg(long, default_value = "pendiente,en_proceso,enviado,entregado")]
    statuses: String,

    /// Extra header in Key:Value format. Can repeat.
    #[arg(long = "header")]
    headers: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut headers = HeaderMap::new();
    for h in &args.headers {
        if let Some((k, v)) = h.split_once(':') {
            headers.insert(k.trim().parse::<HeaderName>()?, v.trim().parse::<HeaderValue>()?);
        }
    }

    let statuses: Vec<String> = args
        .statuses
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if statuses.is_empty() {
        return Err("--statuses must name at least one status".into());
    }

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(5))
        .build()?;
    let url = format!("{}/orders/{}/status", args.base_url, args.order_id);

    let mut latencies: Vec<f64> = stream::iter(0..args.runs)
        .map(|i| {
            let client = client.clone();
            let url = url.clone();
            let estado = statuses[i % statuses.len()].clone();
            async move {
                let start = Instant::now();
                let res = client.patch(&url).json(&json!({ "estado": estado })).send().await;
                let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
                match res {
                    Ok(r) if !r.status().is_success() => {
                        eprintln!("HTTP {} for estado={}", r.status(), estado)
                    }
                    Err(e) => eprintln!("request failed: {}", e),
                    _ => {}
                }
                elapsed_ms
            }
        })
        .buffer_unordered(args.concurrency.max(1))
        .collect()
        .await;
    latencies.sort_by(|a, b| a.total_cmp(b));

    let median = percentile(&latencies, 50.0);
    let p95 = percentile(&latencies, 95.0);
    let p99 = percentile(&latencies, 99.0);

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "runs": args.runs,
            "concurrency": args.concurrency,
            "median_ms": round2(median),
            "p95_ms": round2(p95),
            "p99_ms": round2(p99),
            "meets_requirement_median_lt_400ms": median < MEDIAN_TARGET_MS,
        }))?
    );
    Ok(())
}

/// Linear-interpolation percentile over an already-sorted sample.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let k = (sorted.len() - 1) as f64 * (p / 100.0);
    let f = k.floor() as usize;
    let c = (f + 1).min(sorted.len() - 1);
    if f == c {
        return sorted[f];
    }
    sorted[f] * (c as f64 - k) + sorted[c] * (k - f as f64)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_of_empty_sample_is_zero() {
        assert_eq!(percentile(&[], 95.0), 0.0);
    }

    #[test]
    fn percentile_of_single_sample_is_that_sample() {
        assert_eq!(percentile(&[42.0], 50.0), 42.0);
        assert_eq!(percentile(&[42.0], 99.0), 42.0);
    }

    #[test]
    fn median_interpolates_between_middle_values() {
        assert_eq!(percentile(&[10.0, 20.0, 30.0, 40.0], 50.0), 25.0);
    }

    #[test]
    fn p100_is_the_maximum() {
        assert_eq!(percentile(&[1.0, 2.0, 3.0], 100.0), 3.0);
    }

    #[test]
    fn p95_over_uniform_sample() {
        let sample: Vec<f64> = (1..=100).map(f64::from).collect();
        let p95 = percentile(&sample, 95.0);
        assert!((p95 - 95.05).abs() < 1e-9);
    }
}
