//! Estimates pi by throwing darts at a unit board.

use mcint::scenarios::pi;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = pi::DartboardConfig::default();
    info!(?config, "throwing darts");
    let board = pi::run(&config)?;
    info!(hits = board.hits, pi = board.pi(), "dartboard finished");
    println!("{}", serde_json::to_string_pretty(&board.series())?);
    Ok(())
}
