//! Estimates the volume of a half-sphere with protruding and non-protruding sampling.

use mcint::scenarios::half_sphere;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = half_sphere::HalfSphereConfig::default();
    info!(?config, "estimating half-sphere volume");
    let report = half_sphere::run(&config)?;
    println!(
        "Method 1 avg vol (protruding) - {}\nStandard deviation: {}\n",
        report.protruding.mean, report.protruding.std_dev
    );
    println!(
        "Method 2 avg vol (non-protruding) - {}\nStandard deviation: {}\n",
        report.non_protruding.mean, report.non_protruding.std_dev
    );
    println!("Calculated Volume - {}", report.analytic_volume);
    Ok(())
}
