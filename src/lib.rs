/*!
`limit_series`: Exponential Limit Series theories for an idle-game host.

What it does
- Models the theories' production formula around an incremental
  summation cache: `S(n, k) = Σ_{j=1}^{n} (1 + k^kExp / j)^(j^jExp)` is kept
  across ticks and only extended or recomputed when upgrade levels require it.
- Declares each theory's upgrades, milestones, permanents, achievements and
  story chapters on a host-style [`systems::board::Board`].
- Exposes the host contract ([`theories::Theory`]): `tick`, lazily cached
  LaTeX equations, the publication multiplier and the graph value.

How to use (call surface only)
- Build a theory with its constructor (the host's `init`), e.g.
  `AlphaTheory::new(TheoryConfig::default())`.
- Call `tick(elapsed, multiplier)` once per frame.
- Buy through the theory (`buy`, `buy_milestone`, `publish`, ...) so that
  milestone events are dispatched.
- Or hand it to [`theories::run_session`] to let a simple player policy
  drive it.

What it does NOT do
- No rendering, persistence or UI; no general arbitrary-precision math.
*/

pub mod config;
pub mod error;
pub mod log;
pub mod mechanics;
pub mod numeric;
pub mod systems;
pub mod theories;

pub use config::TheoryConfig;
pub use error::{Result, TheoryError};
pub use numeric::BigNumber;
pub use systems::summation::{Invalidation, RootTransform, SeriesCache, SeriesExponents};

/// Deterministic host loop: `step(state)` once per tick until `done` holds
/// or `max_ticks` ticks have run. Returns the number of ticks executed.
pub fn run_ticks<S, Step, Done>(state: &mut S, mut step: Step, done: Done, max_ticks: usize) -> usize
where
    S: ?Sized,
    Step: FnMut(&mut S),
    Done: Fn(&S) -> bool,
{
    for t in 0..max_ticks {
        if done(state) {
            return t;
        }
        step(state);
    }
    max_ticks
}
