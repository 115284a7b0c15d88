//! Simple CLI that reads HTML from stdin and prints the extracted article as JSON.
//!
//! Usage: `extract_stdin [SOURCE_URL] < page.html`
//!
//! Logging goes to stderr and is controlled through `RUST_LOG`
//! (e.g. `RUST_LOG=rs_gravity=debug`).

use std::io::{self, Read};

use rs_gravity::{extract_bytes, Configuration};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let url = std::env::args().nth(1);

    // Read raw bytes so the document's own charset declaration is honored
    let mut html = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut html) {
        eprintln!("Failed to read from stdin: {err}");
        std::process::exit(1);
    }

    let article = match extract_bytes(&html, url.as_deref(), &Configuration::default()) {
        Ok(article) => article,
        Err(err) => {
            eprintln!("Extraction failed: {err}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&article) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Failed to serialize article: {err}");
            std::process::exit(1);
        }
    }
}
