//! Simulates radioactive decay and prints it beside the closed-form curve.

use mcint::scenarios::decay;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = decay::DecayConfig::default();
    info!(?config, "simulating decay");
    let report = decay::run(&config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
