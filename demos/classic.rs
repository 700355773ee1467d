// demos/classic.rs
// Run with:
//   RUST_LOG=limit_series=info cargo run --example classic --features "theory-classic"

use limit_series::theories::classic::{ClassicTheory, K, N};
use limit_series::theories::{SessionPolicy, Theory, run_session};
use limit_series::{BigNumber, Result, TheoryConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut theory = ClassicTheory::new(TheoryConfig::default())?;
    let goal = BigNumber::from_parts(1.0, 40);

    let report = run_session(&mut theory, SessionPolicy::default(), 200_000, |t| t.tau() >= goal);

    println!("== {} ==", theory.metadata().name);
    println!("ticks        -> {}", report.ticks);
    println!("levels       -> {}", report.levels_bought);
    println!("publications -> {}", report.publications);
    println!("tau          -> {}", report.tau);
    println!("n, k         -> {}, {}", theory.board().level(N), theory.board().level(K));
    println!("terms        -> {}", theory.series().terms_computed());
    println!("{}", theory.primary_equation());
    println!("{}", theory.secondary_equation());
    println!("{}", theory.tertiary_equation());
    Ok(())
}
