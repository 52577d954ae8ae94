#![allow(dead_code)]

use num_complex::Complex32;
use polyfir::FirInterpolator;

pub fn zero() -> Complex32 {
    Complex32::new(0.0, 0.0)
}

/// Run `input` through `interp` one sample at a time
pub fn run_samples(interp: &mut FirInterpolator, input: &[Complex32]) -> Vec<Complex32> {
    let rate = interp.rate();
    let mut output = vec![zero(); input.len() * rate];
    for (&x, chunk) in input.iter().zip(output.chunks_exact_mut(rate)) {
        interp.execute(x, chunk);
    }
    output
}

pub fn max_abs_diff(a: &[Complex32], b: &[Complex32]) -> f32 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f32::max)
}
