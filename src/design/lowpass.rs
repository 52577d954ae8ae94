use crate::constants::MAX_TIMING_OFFSET;
use crate::design::window::{kaiser_beta_from_attenuation, kaiser_window, sinc};
use crate::error::{DspError, Result};

/// Kaiser-windowed sinc low-pass filter
///
/// `h[i] = sinc(2 fc t) * w(t)` with `t = i - (n-1)/2 + mu`.
///
/// # Arguments
/// * `num_taps` - Filter length
/// * `cutoff` - Normalized cutoff frequency in (0, 0.5]
/// * `attenuation_db` - Stopband attenuation in dB, sets the Kaiser shape
/// * `timing_offset` - Fractional sample delay in [-0.5, 0.5]
///
/// # Errors
/// Returns `DspError::Config` for any parameter outside the ranges above.
pub fn kaiser_lowpass(
    num_taps: usize,
    cutoff: f32,
    attenuation_db: f32,
    timing_offset: f32,
) -> Result<Vec<f32>> {
    if num_taps == 0 {
        return Err(DspError::Config(
            "filter length must be greater than zero".to_string(),
        ));
    }
    if !(cutoff > 0.0 && cutoff <= 0.5) {
        return Err(DspError::Config(format!(
            "cutoff frequency {} out of range (0, 0.5]",
            cutoff
        )));
    }
    if !(attenuation_db > 0.0) {
        return Err(DspError::Config(format!(
            "stopband attenuation must be positive, got {} dB",
            attenuation_db
        )));
    }
    if !(timing_offset.abs() <= MAX_TIMING_OFFSET) {
        return Err(DspError::Config(format!(
            "timing offset {} out of range [-0.5, 0.5]",
            timing_offset
        )));
    }

    let fc = cutoff as f64;
    let mu = timing_offset as f64;
    let beta = kaiser_beta_from_attenuation(attenuation_db as f64);
    let center = (num_taps - 1) as f64 / 2.0;

    Ok((0..num_taps)
        .map(|i| {
            let t = i as f64 - center + mu;
            (sinc(2.0 * fc * t) * kaiser_window(i, num_taps, beta, mu)) as f32
        })
        .collect())
}

/// Low-pass prototype for interpolation by `rate`
///
/// Produces `2 * rate * semi_length + 1` taps with cutoff `0.5 / rate`,
/// normalized so the taps sum to `rate` (unity passband gain after
/// zero-stuffing).
///
/// # Errors
/// Returns `DspError::Config` if `rate` or `semi_length` is zero or the
/// attenuation is not positive.
pub fn interp_lowpass(rate: usize, semi_length: usize, attenuation_db: f32) -> Result<Vec<f32>> {
    if rate == 0 {
        return Err(DspError::Config(
            "interpolation rate must be greater than zero".to_string(),
        ));
    }
    if semi_length == 0 {
        return Err(DspError::Config(
            "filter semi-length must be greater than zero".to_string(),
        ));
    }

    let num_taps = 2 * rate * semi_length + 1;
    let cutoff = 0.5 / rate as f32;
    let mut taps = kaiser_lowpass(num_taps, cutoff, attenuation_db, 0.0)?;

    let sum: f64 = taps.iter().map(|&h| h as f64).sum();
    let gain = rate as f64 / sum;
    for h in taps.iter_mut() {
        *h = (*h as f64 * gain) as f32;
    }

    log::debug!(
        "kaiser low-pass prototype: rate={}, m={}, As={} dB, {} taps",
        rate,
        semi_length,
        attenuation_db,
        num_taps
    );
    Ok(taps)
}
