//! Reproducible random-number generation for Monte Carlo engines.
//!
//! The generator stack is deliberately self-contained: a PCG-family 32-bit
//! generator seeded from `(master_seed, stream_id)`, a Box–Muller transform
//! that caches its spare normal, and an antithetic wrapper that hands out
//! `(z, -z)` pairs. Monte Carlo results must be bit-for-bit reproducible for
//! a given seed, so the whole chain avoids platform-dependent sources.

/// PCG32 (XSH-RR 64/32) generator with an explicit stream selector.
///
/// Distinct `stream_id`s produce statistically independent sub-sequences for
/// the same master seed; the increment is forced odd as the PCG construction
/// requires.
#[derive(Debug, Clone)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    const MULTIPLIER: u64 = 6_364_136_223_846_793_005;

    pub fn new(seed: u64, stream_id: u64) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (stream_id << 1) | 1,
        };
        rng.next_u32();
        rng.state = rng.state.wrapping_add(seed);
        rng.next_u32();
        rng
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(self.inc);
        let xorshifted = (((oldstate >> 18) ^ oldstate) >> 27) as u32;
        let rot = (oldstate >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

/// Maps a raw 32-bit draw to the open interval (0, 1).
#[inline]
pub fn uniform01(rng: &mut Pcg32) -> f64 {
    const INV: f64 = 1.0 / (u32::MAX as f64 + 1.0);
    (f64::from(rng.next_u32()) + 0.5) * INV
}

/// Box–Muller transform producing standard normals two at a time.
///
/// The second normal of each pair is cached and returned by the next call, so
/// consecutive draws consume exactly one uniform pair per two normals.
#[derive(Debug, Clone, Default)]
pub struct NormalBoxMuller {
    spare: Option<f64>,
}

impl NormalBoxMuller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, rng: &mut Pcg32) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        let u1 = uniform01(rng);
        let u2 = uniform01(rng);

        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * u2;

        self.spare = Some(r * theta.sin());
        r * theta.cos()
    }
}

/// Gaussian source with optional antithetic pairing.
///
/// With antithetic sampling enabled, even-indexed calls draw a fresh normal
/// `z` and odd-indexed calls return `-z` without advancing the underlying
/// generator, so a caller that draws in pairs transparently receives
/// `(z, -z)`. The pairing counter belongs to the wrapper and can be reset
/// without disturbing the generator state.
#[derive(Debug, Clone, Default)]
pub struct AntitheticNormal {
    inner: NormalBoxMuller,
    antithetic: bool,
    call_count: u64,
    last: f64,
}

impl AntitheticNormal {
    pub fn new(antithetic: bool) -> Self {
        Self {
            inner: NormalBoxMuller::new(),
            antithetic,
            call_count: 0,
            last: 0.0,
        }
    }

    pub fn next(&mut self, rng: &mut Pcg32) -> f64 {
        if !self.antithetic {
            return self.inner.next(rng);
        }
        let z = if self.call_count & 1 == 0 {
            self.last = self.inner.next(rng);
            self.last
        } else {
            -self.last
        };
        self.call_count += 1;
        z
    }

    pub fn reset_pairing(&mut self) {
        self.call_count = 0;
    }
}

/// Hands out per-stream generators derived from one master seed.
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    master_seed: u64,
}

impl RngFactory {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn make(&self, stream_id: u64) -> Pcg32 {
        Pcg32::new(self.master_seed, stream_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg32_is_deterministic_per_seed_and_stream() {
        let mut a = Pcg32::new(42, 0);
        let mut b = Pcg32::new(42, 0);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }

        let mut c = Pcg32::new(42, 1);
        let first: Vec<u32> = (0..16).map(|_| Pcg32::new(42, 0).next_u32()).collect();
        let other: Vec<u32> = (0..16).map(|_| c.next_u32()).collect();
        assert_ne!(first, other, "streams 0 and 1 should diverge");
    }

    #[test]
    fn uniform01_stays_in_open_interval() {
        let mut rng = Pcg32::new(7, 0);
        for _ in 0..10_000 {
            let u = uniform01(&mut rng);
            assert!(u > 0.0 && u < 1.0);
        }
    }

    #[test]
    fn box_muller_draws_have_plausible_moments() {
        let mut rng = Pcg32::new(123, 0);
        let mut gauss = NormalBoxMuller::new();
        let n = 200_000;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for _ in 0..n {
            let z = gauss.next(&mut rng);
            sum += z;
            sum_sq += z * z;
        }
        let mean = sum / n as f64;
        let var = sum_sq / n as f64 - mean * mean;
        assert!(mean.abs() < 0.01, "mean too far from 0: {mean}");
        assert!((var - 1.0).abs() < 0.02, "variance too far from 1: {var}");
    }

    #[test]
    fn antithetic_pairs_negate_without_consuming_state() {
        let mut rng = Pcg32::new(9, 0);
        let mut gauss = AntitheticNormal::new(true);

        let z0 = gauss.next(&mut rng);
        let saved_state = rng.clone();
        let z1 = gauss.next(&mut rng);
        assert_eq!(z1, -z0);
        assert_eq!(rng.next_u32(), saved_state.clone().next_u32());
    }

    #[test]
    fn reset_pairing_restarts_even_phase() {
        let mut rng = Pcg32::new(9, 0);
        let mut gauss = AntitheticNormal::new(true);

        let _ = gauss.next(&mut rng);
        gauss.reset_pairing();
        let z = gauss.next(&mut rng);
        let z_neg = gauss.next(&mut rng);
        assert_eq!(z_neg, -z);
    }

    #[test]
    fn disabled_wrapper_forwards_plain_draws() {
        let mut rng_a = Pcg32::new(11, 0);
        let mut rng_b = Pcg32::new(11, 0);
        let mut wrapped = AntitheticNormal::new(false);
        let mut plain = NormalBoxMuller::new();
        for _ in 0..32 {
            assert_eq!(wrapped.next(&mut rng_a), plain.next(&mut rng_b));
        }
    }
}
