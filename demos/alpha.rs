// demos/alpha.rs
// Run with:
//   cargo run --example alpha --features "theory-alpha" -- [config.toml]
// A config file may set `debug_log`, `invalidation` ("base_only" | "exponents")
// and `root_transform` ("legacy" | "uniform").

use limit_series::systems::progress::Unlocked;
use limit_series::theories::alpha::{AlphaTheory, F, K, N};
use limit_series::theories::{SessionPolicy, Theory, run_session};
use limit_series::{BigNumber, Result, TheoryConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => TheoryConfig::load(path)?,
        None => TheoryConfig::default(),
    };
    let mut theory = AlphaTheory::new(config)?;
    let goal = BigNumber::from_parts(1.0, 100);

    let policy = SessionPolicy { dt: 1.0, ..SessionPolicy::default() };
    let report = run_session(&mut theory, policy, 500_000, |t| t.tau() >= goal);

    println!("== {} ==", theory.metadata().name);
    println!("ticks        -> {}", report.ticks);
    println!("levels       -> {}", report.levels_bought);
    println!("publications -> {}", report.publications);
    println!("tau          -> {}", report.tau);
    println!(
        "n, k, f_t    -> {}, {}, {}",
        theory.board().level(N),
        theory.board().level(K),
        theory.board().level(F)
    );
    println!("terms        -> {}", theory.series().terms_computed());
    println!("{}", theory.primary_equation());
    println!("{}", theory.secondary_equation());

    for entry in &report.unlocked {
        match *entry {
            Unlocked::Achievement(id) => {
                if let Some(a) = theory.board().achievements().find(|a| a.id == id) {
                    println!("achievement  -> {}", a.name);
                }
            }
            Unlocked::Chapter(id) => {
                if let Some(c) = theory.board().chapters().find(|c| c.id == id) {
                    println!("chapter      -> {}", c.title);
                }
            }
        }
    }
    Ok(())
}
