// tests/series.rs
use bevy_prng::WyRand;
use limit_series::systems::summation::{Refresh, full_sum};
use limit_series::{BigNumber, Invalidation, RootTransform, SeriesCache, SeriesExponents};
use rand_core::{RngCore, SeedableRng};
use rstest::rstest;

fn close(a: BigNumber, b: BigNumber) -> bool {
    if a.is_zero() || b.is_zero() {
        return a.is_zero() && b.is_zero();
    }
    (a.log10() - b.log10()).abs() < 1e-9
}

fn approx(a: BigNumber, b: f64) -> bool {
    close(a, BigNumber::from_f64(b))
}

fn exps(k_exp: f64, j_exp: f64, root_exp: f64) -> SeriesExponents {
    SeriesExponents { k_exp, j_exp, root_exp }
}

/* ──────────────────────────────────────────────────────────────────────────
1) The three refresh cases
────────────────────────────────────────────────────────────────────────── */

#[test]
fn extending_n_adds_only_the_new_term() {
    let mut cache = SeriesCache::default();
    let base = SeriesExponents::BASE;

    // Fresh cache, k grew from 0: full recompute of (1 + 2/1)^1.
    assert_eq!(cache.refresh(1, 2, base), Refresh::Full);
    assert!(approx(cache.partial_sum(), 3.0));

    // n grew: (1 + 2/2)^2 = 4 is appended.
    let out = cache.evaluate(2, 2, base);
    assert!(approx(cache.partial_sum(), 7.0));
    assert!(approx(out, 7f64.sqrt()));
    assert_eq!(cache.state().upper_bound, 2);
    assert_eq!(cache.state().base_parameter, 2);
    assert_eq!(cache.terms_computed(), 2);
}

#[test]
fn growing_k_recomputes_every_term() {
    let mut cache = SeriesCache::default();
    let base = SeriesExponents::BASE;
    cache.evaluate(1, 2, base);
    cache.evaluate(2, 2, base);

    // (1+3)^1 + (1+3/2)^2 = 4 + 6.25
    let out = cache.evaluate(2, 3, base);
    assert!(approx(cache.partial_sum(), 10.25));
    assert!(approx(out, 10.25f64.sqrt()));
    assert_eq!(cache.state().base_parameter, 3);
    assert_eq!(cache.terms_computed(), 4);
}

#[test]
fn full_recompute_wins_when_n_and_k_grow_together() {
    let mut cache = SeriesCache::default();
    let base = SeriesExponents::BASE;
    cache.refresh(3, 1, base);

    assert_eq!(cache.refresh(6, 2, base), Refresh::Full);
    assert_eq!(cache.state().upper_bound, 6);
    assert!(close(cache.partial_sum(), full_sum(6, 2, base)));
}

#[test]
fn unchanged_inputs_do_no_work() {
    let mut cache = SeriesCache::default();
    let base = SeriesExponents::BASE;
    let first = cache.evaluate(40, 5, base);
    let computed = cache.terms_computed();

    for _ in 0..10 {
        assert_eq!(cache.refresh(40, 5, base), Refresh::Cached);
    }
    let again = cache.evaluate(40, 5, base);

    assert_eq!(cache.terms_computed(), computed);
    assert!(close(first, again));
}

#[test]
fn shrinking_inputs_keep_the_cached_sum() {
    let mut cache = SeriesCache::default();
    let base = SeriesExponents::BASE;
    cache.refresh(10, 4, base);
    let sum = cache.partial_sum();

    assert_eq!(cache.refresh(5, 4, base), Refresh::Cached);
    assert_eq!(cache.refresh(10, 2, base), Refresh::Cached);
    assert_eq!(cache.partial_sum(), sum);
    assert_eq!(cache.state().upper_bound, 10);
}

#[test]
fn extend_reports_the_number_of_added_terms() {
    let mut cache = SeriesCache::default();
    let base = SeriesExponents::BASE;
    cache.refresh(4, 1, base);
    assert_eq!(cache.refresh(9, 1, base), Refresh::Extend { added: 5 });
}

/* ──────────────────────────────────────────────────────────────────────────
2) Edge values
────────────────────────────────────────────────────────────────────────── */

#[test]
fn empty_series_is_zero() {
    let mut cache = SeriesCache::default();
    assert!(cache.evaluate(0, 0, SeriesExponents::BASE).is_zero());
    assert!(cache.evaluate(0, 7, SeriesExponents::BASE).is_zero());
    assert_eq!(cache.terms_computed(), 0);
}

#[test]
fn zero_base_parameter_gives_one_per_term() {
    let mut cache = SeriesCache::default();
    // k = 0 never exceeds the initial base, so this is an extension.
    assert_eq!(cache.refresh(3, 0, SeriesExponents::BASE), Refresh::Extend { added: 3 });
    assert!(approx(cache.partial_sum(), 3.0));
}

#[test]
fn huge_terms_leave_the_f64_range() {
    let mut cache = SeriesCache::default();
    // (1 + 2000/2000)^2000 alone is 2^2000.
    cache.refresh(2000, 2000, SeriesExponents::BASE);
    let s = cache.partial_sum();
    assert!(s.exponent() > 308);
    assert!(s.log10().is_finite());
}

#[test]
fn reset_starts_from_the_empty_sum() {
    let mut cache = SeriesCache::default();
    let base = SeriesExponents::BASE;
    cache.evaluate(20, 6, base);
    cache.reset();

    assert_eq!(cache.state().upper_bound, 0);
    assert_eq!(cache.state().base_parameter, 0);
    assert!(cache.partial_sum().is_zero());

    // Smaller levels after a publication are summed from scratch.
    cache.refresh(2, 1, base);
    assert!(approx(cache.partial_sum(), 2.0 + 2.25));
}

/* ──────────────────────────────────────────────────────────────────────────
3) Exponent invalidation and the read transform
────────────────────────────────────────────────────────────────────────── */

#[test]
fn exponent_change_recomputes_under_exponent_invalidation() {
    let mut cache = SeriesCache::new(Invalidation::Exponents, RootTransform::Legacy);
    cache.refresh(5, 2, SeriesExponents::BASE);

    let raised = exps(1.5, 1.0, 2.0);
    assert_eq!(cache.refresh(5, 2, raised), Refresh::Full);
    assert!(close(cache.partial_sum(), full_sum(5, 2, raised)));
}

#[test]
fn exponent_change_is_ignored_under_base_only_invalidation() {
    let mut cache = SeriesCache::new(Invalidation::BaseOnly, RootTransform::Legacy);
    cache.refresh(5, 2, SeriesExponents::BASE);
    let before = cache.partial_sum();

    let raised = exps(1.5, 1.0, 2.0);
    assert_eq!(cache.refresh(5, 2, raised), Refresh::Cached);
    assert_eq!(cache.partial_sum(), before);

    // New terms use the new exponents, old ones keep theirs.
    cache.refresh(6, 2, raised);
    let mixed = full_sum(5, 2, SeriesExponents::BASE) + (full_sum(6, 2, raised) - full_sum(5, 2, raised));
    assert!(close(cache.partial_sum(), mixed));
}

#[test]
fn root_exponent_does_not_invalidate() {
    let mut cache = SeriesCache::new(Invalidation::Exponents, RootTransform::Uniform);
    cache.refresh(5, 2, SeriesExponents::BASE);
    assert_eq!(cache.refresh(5, 2, exps(1.0, 1.0, 1.8)), Refresh::Cached);
}

#[test]
fn legacy_transform_uses_the_root_only_after_a_full_recompute() {
    let root = exps(1.0, 1.0, 1.8);
    let mut cache = SeriesCache::new(Invalidation::Exponents, RootTransform::Legacy);

    let after_full = cache.evaluate(4, 3, root);
    let s = cache.partial_sum();
    assert!(close(after_full, s.pow(1.0 / 1.8)));

    let after_cached = cache.evaluate(4, 3, root);
    assert!(close(after_cached, s.sqrt()));

    let after_extend = cache.evaluate(5, 3, root);
    assert!(close(after_extend, cache.partial_sum().sqrt()));
}

#[test]
fn uniform_transform_uses_the_root_on_every_read() {
    let root = exps(1.0, 1.0, 1.8);
    let mut cache = SeriesCache::new(Invalidation::Exponents, RootTransform::Uniform);

    let after_full = cache.evaluate(4, 3, root);
    let after_cached = cache.evaluate(4, 3, root);
    assert!(close(after_full, after_cached));
    assert!(close(after_cached, cache.partial_sum().pow(1.0 / 1.8)));
}

#[rstest]
#[case(RootTransform::Legacy)]
#[case(RootTransform::Uniform)]
fn default_root_makes_both_transforms_agree(#[case] transform: RootTransform) {
    let mut cache = SeriesCache::new(Invalidation::Exponents, transform);
    let base = SeriesExponents::BASE;
    cache.evaluate(3, 2, base);
    let out = cache.evaluate(8, 2, base);
    assert!(close(out, full_sum(8, 2, base).sqrt()));
}

/* ──────────────────────────────────────────────────────────────────────────
4) Incremental == from scratch
────────────────────────────────────────────────────────────────────────── */

#[rstest]
#[case(1, 1)]
#[case(10, 1)]
#[case(25, 4)]
#[case(200, 9)]
fn single_shot_matches_full_sum(#[case] n: u64, #[case] k: u64) {
    let mut cache = SeriesCache::default();
    cache.refresh(n, k, SeriesExponents::BASE);
    assert!(close(cache.partial_sum(), full_sum(n, k, SeriesExponents::BASE)));
}

#[rstest]
#[case(1, Invalidation::Exponents)]
#[case(7, Invalidation::Exponents)]
#[case(42, Invalidation::BaseOnly)]
#[case(1337, Invalidation::BaseOnly)]
fn random_growth_matches_full_sum(#[case] seed: u64, #[case] invalidation: Invalidation) {
    let mut rng = WyRand::from_seed(seed.to_le_bytes());
    let mut cache = SeriesCache::new(invalidation, RootTransform::Uniform);
    // Exponents only move under the invalidation that tracks them.
    let choices = match invalidation {
        Invalidation::Exponents => [SeriesExponents::BASE, exps(1.05, 1.0, 1.9), exps(1.1, 1.02, 1.8)],
        Invalidation::BaseOnly => [SeriesExponents::BASE; 3],
    };

    let (mut n, mut k) = (0u64, 0u64);
    for step in 0..300 {
        match rng.next_u32() % 4 {
            0 => k += 1,
            1 | 2 => n += (rng.next_u32() % 5) as u64,
            _ => {}
        }
        if step % 97 == 96 {
            cache.reset();
            n /= 2;
            k /= 2;
        }
        let e = choices[(rng.next_u32() % 3) as usize];
        cache.refresh(n, k, e);
        assert!(
            close(cache.partial_sum(), full_sum(n, k, e)),
            "seed {seed} step {step}: n={n} k={k}"
        );
    }
}

#[test]
fn sum_is_monotone_in_growing_levels() {
    let mut rng = WyRand::from_seed(99u64.to_le_bytes());
    let mut cache = SeriesCache::default();
    let (mut n, mut k) = (1u64, 1u64);
    let mut last = cache.evaluate(n, k, SeriesExponents::BASE);

    for _ in 0..200 {
        if rng.next_u32() % 2 == 0 {
            n += 1;
        } else {
            k += 1;
        }
        cache.refresh(n, k, SeriesExponents::BASE);
        let now = cache.partial_sum();
        assert!(now >= last);
        last = now;
    }
}

#[test]
fn incremental_work_is_linear_in_total_growth() {
    let mut cache = SeriesCache::default();
    let k = 3;
    cache.refresh(1, k, SeriesExponents::BASE);
    for n in 2..=500 {
        // Many ticks per level, as the host would run them.
        for _ in 0..5 {
            cache.evaluate(n, k, SeriesExponents::BASE);
        }
    }
    assert_eq!(cache.terms_computed(), 500);
}
