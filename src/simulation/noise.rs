//! Seeded random vectors
//!
//! Every generator takes an explicit seed so that test failures reproduce
//! exactly. Passing `None` draws a fresh seed from the OS.

use num_complex::Complex32;
use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::fixed_point::{Q16, Q32};

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Circular complex Gaussian noise with total power `power`
pub fn complex_noise(len: usize, power: f32, seed: Option<u64>) -> Vec<Complex32> {
    let mut rng = create_rng(seed);
    let std_dev = (power / 2.0).sqrt();
    (0..len)
        .map(|_| {
            let re: f32 = StandardNormal.sample(&mut rng);
            let im: f32 = StandardNormal.sample(&mut rng);
            Complex32::new(re * std_dev, im * std_dev)
        })
        .collect()
}

/// Uniform taps in `[-1, 1)`
pub fn random_taps(len: usize, seed: Option<u64>) -> Vec<f32> {
    let mut rng = create_rng(seed);
    (0..len).map(|_| rng.random::<f32>() * 2.0 - 1.0).collect()
}

/// Uniform `Q16` values over the full storage range
pub fn random_q16(len: usize, seed: Option<u64>) -> Vec<Q16> {
    let mut rng = create_rng(seed);
    (0..len).map(|_| Q16::from_bits(rng.random::<i16>())).collect()
}

/// Uniform `Q32` values over the full storage range
pub fn random_q32(len: usize, seed: Option<u64>) -> Vec<Q32> {
    let mut rng = create_rng(seed);
    (0..len).map(|_| Q32::from_bits(rng.random::<i32>())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::signal_power;

    #[test]
    fn test_seeded_reproducibility() {
        assert_eq!(random_taps(32, Some(7)), random_taps(32, Some(7)));
        assert_eq!(random_q16(32, Some(7)), random_q16(32, Some(7)));
        assert_eq!(random_q32(32, Some(7)), random_q32(32, Some(7)));
        assert_eq!(complex_noise(32, 1.0, Some(7)), complex_noise(32, 1.0, Some(7)));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(random_taps(32, Some(1)), random_taps(32, Some(2)));
    }

    #[test]
    fn test_taps_in_range() {
        let taps = random_taps(1000, Some(42));
        assert!(taps.iter().all(|&t| (-1.0..1.0).contains(&t)));
    }

    #[test]
    fn test_noise_power() {
        let noise = complex_noise(20000, 0.5, Some(42));
        let power = signal_power(&noise);
        assert!((power - 0.5).abs() < 0.05, "power {}", power);
    }
}
