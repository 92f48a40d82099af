use std::sync::Once;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let env = std::env::var("RUST_LOG").ok();
        let filter = match env {
            Some(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            None => EnvFilter::new("info"),
        };
        // Another harness may already have installed a global subscriber.
        let _ = fmt().with_env_filter(filter).with_target(false).try_init();
    });
}

/// Deterministic RNG for property-style tests. Set `COLSTORE_TEST_SEED` to
/// replay a failing run with a different seed.
pub fn seeded_rng(default_seed: u64) -> StdRng {
    let seed = std::env::var("COLSTORE_TEST_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default_seed);
    StdRng::seed_from_u64(seed)
}

/// `len` values where roughly `null_ratio` of them are `None`. Zero is drawn
/// with extra weight so the zero-sentinel path gets exercised.
pub fn random_nullable<T, F>(rng: &mut StdRng, len: usize, null_ratio: f64, mut draw: F) -> Vec<Option<T>>
where
    F: FnMut(&mut StdRng) -> T,
    T: Default,
{
    (0..len)
        .map(|_| {
            if rng.random_bool(null_ratio) {
                None
            } else if rng.random_bool(0.1) {
                Some(T::default())
            } else {
                Some(draw(rng))
            }
        })
        .collect()
}

#[cfg(feature = "auto-init")]
mod auto {
    // Use ctor to run at binary init time to avoid having to call init in every test.
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        let mut a = seeded_rng(7);
        let mut b = seeded_rng(7);
        let xs = random_nullable(&mut a, 64, 0.3, |r| r.random::<i32>());
        let ys = random_nullable(&mut b, 64, 0.3, |r| r.random::<i32>());
        assert_eq!(xs, ys);
        assert_eq!(xs.len(), 64);
    }
}
