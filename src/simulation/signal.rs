use std::f32::consts::PI;

use num_complex::Complex32;

/// Unit impulse followed by `len - 1` zeros
pub fn impulse(len: usize) -> Vec<Complex32> {
    let mut samples = vec![Complex32::new(0.0, 0.0); len];
    if let Some(first) = samples.first_mut() {
        *first = Complex32::new(1.0, 0.0);
    }
    samples
}

/// Complex exponential `amplitude * exp(j*2*pi*f*n + j*phase)`
///
/// `frequency` is normalized to the sample rate (cycles per sample).
pub fn complex_tone(len: usize, frequency: f32, amplitude: f32, phase: f32) -> Vec<Complex32> {
    (0..len)
        .map(|n| Complex32::from_polar(amplitude, 2.0 * PI * frequency * n as f32 + phase))
        .collect()
}

/// Mean squared magnitude
pub fn signal_power(signal: &[Complex32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|x| x.norm_sqr()).sum::<f32>() / signal.len() as f32
}
