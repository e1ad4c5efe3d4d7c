//! Substitutable uniform randomness.
//!
//! Both the planner and the session draw through [`RandomSource`], so a
//! seeded [`StdRng`] or a [`ScriptedRandom`] can be swapped in without
//! touching either.

use rand::Rng;
use rand::rngs::StdRng;

/// A uniform random generator.
pub trait RandomSource {
    /// A uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// A uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index on empty range");
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }

    /// A uniform offset in `[-range, range)`.
    fn next_offset(&mut self, range: f64) -> f64 {
        (self.next_unit() - 0.5) * range * 2.0
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }

    fn next_offset(&mut self, range: f64) -> f64 {
        (**self).next_offset(range)
    }
}

/// A replayable source that cycles through fixed values.
///
/// Unit samples cycle through `units` (0.5 when empty, which yields zero
/// jitter); indices cycle through `indices`, reduced modulo the requested
/// length (0 when empty).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    units: Vec<f64>,
    indices: Vec<usize>,
    unit_cursor: usize,
    index_cursor: usize,
}

impl ScriptedRandom {
    /// Always picks the first pool member and never jitters.
    pub fn first_index() -> Self {
        Self::default()
    }

    /// Cycle through the given unit samples. Values are clamped into `[0, 1)`.
    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units = units
            .into_iter()
            .map(|u| u.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        self
    }

    /// Cycle through the given pool indices.
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices = indices.into_iter().collect();
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.5;
        }
        let u = self.units[self.unit_cursor % self.units.len()];
        self.unit_cursor += 1;
        u
    }

    fn next_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let i = self.indices[self.index_cursor % self.indices.len()];
        self.index_cursor += 1;
        i % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn std_rng_index_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_index(len) < len);
            }
        }
    }

    #[test]
    fn std_rng_offset_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let o = rng.next_offset(2.0);
            assert!((-2.0..2.0).contains(&o));
        }
    }

    #[test]
    fn std_rng_is_deterministic() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(a.next_unit().to_bits(), b.next_unit().to_bits());
        }
    }

    #[test]
    fn every_index_is_reachable() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [0u32; 4];
        for _ in 0..4000 {
            seen[rng.next_index(4)] += 1;
        }
        assert!(seen.iter().all(|&n| n > 800), "skewed: {seen:?}");
    }

    #[test]
    fn scripted_defaults() {
        let mut r = ScriptedRandom::first_index();
        assert_eq!(r.next_index(5), 0);
        assert_eq!(r.next_unit(), 0.5);
        assert_eq!(r.next_offset(3.0), 0.0);
    }

    #[test]
    fn scripted_cycles() {
        let mut r = ScriptedRandom::default()
            .with_units([0.0, 0.75])
            .with_indices([1, 7]);
        assert_eq!(r.next_unit(), 0.0);
        assert_eq!(r.next_unit(), 0.75);
        assert_eq!(r.next_unit(), 0.0);
        assert_eq!(r.next_index(3), 1);
        assert_eq!(r.next_index(3), 1);
        assert_eq!(r.next_index(3), 1);
        assert_eq!(r.next_index(10), 7);
    }

    #[test]
    fn default_next_index_uses_units() {
        let mut r = ScriptedRandom::default().with_units([0.99]);
        // ScriptedRandom overrides next_index; exercise the provided method
        // through a thin wrapper.
        struct Units<'a>(&'a mut ScriptedRandom);
        impl RandomSource for Units<'_> {
            fn next_unit(&mut self) -> f64 {
                self.0.next_unit()
            }
        }
        assert_eq!(Units(&mut r).next_index(4), 3);
    }
}
