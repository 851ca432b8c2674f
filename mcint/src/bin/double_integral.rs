//! Estimates the double integral of sin(x) sin(y) over [0, pi]^2 against the step count.

use mcint::scenarios::double_integral;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = double_integral::DoubleIntegralConfig::default();
    info!(?config, "integrating sin(x) sin(y)");
    let result = double_integral::run(&config)?;
    println!("{}", serde_json::to_string_pretty(&result.series())?);
    Ok(())
}
