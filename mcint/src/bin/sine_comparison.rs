//! Compares rhombohedral and Monte Carlo integration of sin(x) over [0, pi].

use mcint::scenarios::sine;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = sine::SineComparisonConfig::default();
    info!(?config, "comparing integration methods");
    let comparison = sine::run(&config)?;
    println!("{}", serde_json::to_string_pretty(&comparison.series())?);
    Ok(())
}
