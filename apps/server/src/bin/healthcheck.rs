//! Probes a running server and exits non-zero when it is not healthy.
//!
//! Intended for container health checks and deploy smoke tests.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let base_url =
        std::env::var("LB_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let client = reqwest::Client::new();

    for endpoint in [
        "healthz",
        "readyz",
        "accounts",
        "categories",
        "transactions",
        "budgets",
    ] {
        let url = format!("{}/api/v1/{}", base_url.trim_end_matches('/'), endpoint);
        match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                eprintln!("{} returned {}", url, response.status());
                return ExitCode::FAILURE;
            }
            Err(err) => {
                eprintln!("{} unreachable: {}", url, err);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
