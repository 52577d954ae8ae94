//! Nyquist and root-Nyquist pulse-shape prototypes
//!
//! Every design here produces `2 * k * m + 1` taps for `k` samples per
//! symbol and a span of `m` symbols on either side of the center tap.
//! Tap `i` sits at `t = i - k*m + mu` samples, i.e. `z = t / k` symbols.
//! Nyquist shapes vanish at every nonzero integer `z`.
//!
//! Parameters are assumed validated by
//! [`FilterPrototype::validate`](crate::design::FilterPrototype::validate).

use std::f64::consts::{FRAC_1_SQRT_2, LN_2, PI};

use pm_remez::{BandSetting, constant, pm_parameters, pm_remez};

use crate::constants::SINGULARITY_EPSILON;
use crate::design::lowpass::kaiser_lowpass;
use crate::design::window::{estimate_attenuation, sinc};
use crate::error::{DspError, Result};

fn symbol_times(k: usize, m: usize, mu: f32) -> impl Iterator<Item = f64> {
    let len = 2 * k * m + 1;
    let center = (k * m) as f64;
    (0..len).map(move |i| (i as f64 - center + mu as f64) / k as f64)
}

/// Nyquist Kaiser-windowed sinc with cutoff `0.5 / k`
///
/// The stopband attenuation is not a free parameter: it is estimated from
/// the transition band `beta / k` and the filter length.
pub fn kaiser_nyquist(k: usize, m: usize, beta: f32, mu: f32) -> Result<Vec<f32>> {
    let num_taps = 2 * k * m + 1;
    let transition_bw = beta as f64 / k as f64;
    let attenuation_db = estimate_attenuation(transition_bw, num_taps).max(1.0);
    kaiser_lowpass(num_taps, 0.5 / k as f32, attenuation_db as f32, mu)
}

/// Raised-cosine pulse
pub fn raised_cosine(k: usize, m: usize, beta: f32, mu: f32) -> Vec<f32> {
    let beta = beta as f64;
    symbol_times(k, m, mu)
        .map(|z| {
            let denom = 1.0 - (2.0 * beta * z).powi(2);
            let h = if denom.abs() < SINGULARITY_EPSILON {
                // cos(pi beta z) / (1 - 4 beta^2 z^2) -> pi/4 at z = 1/(2 beta)
                PI / 4.0 * sinc(z)
            } else {
                (PI * beta * z).cos() * sinc(z) / denom
            };
            h as f32
        })
        .collect()
}

/// Square-root raised-cosine pulse
pub fn root_raised_cosine(k: usize, m: usize, beta: f32, mu: f32) -> Vec<f32> {
    let beta = beta as f64;
    symbol_times(k, m, mu)
        .map(|z| {
            let h = if z.abs() < SINGULARITY_EPSILON {
                1.0 - beta + 4.0 * beta / PI
            } else {
                let denom = 1.0 - (4.0 * beta * z).powi(2);
                if denom.abs() < SINGULARITY_EPSILON {
                    let arg = PI / (4.0 * beta);
                    beta * FRAC_1_SQRT_2
                        * ((1.0 + 2.0 / PI) * arg.sin() + (1.0 - 2.0 / PI) * arg.cos())
                } else {
                    let num = (PI * z * (1.0 - beta)).sin()
                        + 4.0 * beta * z * (PI * z * (1.0 + beta)).cos();
                    num / (PI * z * denom)
                }
            };
            h as f32
        })
        .collect()
}

/// Flipped-exponential Nyquist pulse
///
/// `h(z) = sinc(z) (4 g pi z sin(pi b z) + 2 g^2 cos(pi b z) - g^2) / ((2 pi z)^2 + g^2)`
/// with `g = 2 ln 2 / b`.
pub fn flipped_exponential(k: usize, m: usize, beta: f32, mu: f32) -> Vec<f32> {
    let beta = beta as f64;
    let gamma = 2.0 * LN_2 / beta;
    symbol_times(k, m, mu)
        .map(|z| {
            let arg = PI * beta * z;
            let num = 4.0 * gamma * PI * z * arg.sin() + 2.0 * gamma * gamma * arg.cos()
                - gamma * gamma;
            let den = (2.0 * PI * z).powi(2) + gamma * gamma;
            (sinc(z) * num / den) as f32
        })
        .collect()
}

/// Equiripple (Parks-McClellan) low-pass with band edges `(1 -/+ beta) / 2k`
///
/// Only approximately Nyquist. Scaled to a unit center tap.
///
/// # Errors
/// Returns `DspError::FilterDesign` if the stopband edge reaches Nyquist or
/// the Remez exchange fails, and `DspError::Config` for a nonzero timing
/// offset, which a symmetric equiripple design cannot realize.
pub fn parks_mcclellan(k: usize, m: usize, beta: f32, mu: f32) -> Result<Vec<f32>> {
    if mu != 0.0 {
        return Err(DspError::Config(
            "pm prototype does not support a timing offset".to_string(),
        ));
    }

    let num_taps = 2 * k * m + 1;
    let pass_end = (1.0 - beta as f64) * 0.5 / k as f64;
    let stop_start = (1.0 + beta as f64) * 0.5 / k as f64;
    if stop_start >= 0.5 {
        return Err(DspError::FilterDesign(format!(
            "stopband edge {:.3} at or beyond Nyquist for k={}, beta={}",
            stop_start, k, beta
        )));
    }

    let bands = [
        BandSetting::new(0.0, pass_end, constant(1.0))
            .map_err(|e| DspError::FilterDesign(format!("Passband: {:?}", e)))?,
        BandSetting::new(stop_start, 0.5, constant(0.0))
            .map_err(|e| DspError::FilterDesign(format!("Stopband: {:?}", e)))?,
    ];

    let params = pm_parameters(num_taps, &bands)
        .map_err(|e| DspError::FilterDesign(format!("PM parameters: {:?}", e)))?;

    let design =
        pm_remez(&params).map_err(|e| DspError::FilterDesign(format!("PM Remez: {:?}", e)))?;

    let center = design.impulse_response[k * m];
    if center.abs() < SINGULARITY_EPSILON {
        return Err(DspError::FilterDesign(
            "PM Remez: degenerate center tap".to_string(),
        ));
    }

    Ok(design
        .impulse_response
        .iter()
        .map(|&h| (h / center) as f32)
        .collect())
}
