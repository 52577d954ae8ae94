//! Kaiser window and the helpers shared by the windowed-sinc designs

use std::f64::consts::PI;

use crate::constants::SINC_EPSILON;

/// Normalized sinc, `sin(pi x) / (pi x)`
pub fn sinc(x: f64) -> f64 {
    if x.abs() < SINC_EPSILON {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Modified Bessel function of the first kind, order 0
///
/// Power series `sum ((x/2)^k / k!)^2`, summed until terms stop
/// contributing at double precision.
pub fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..64 {
        let ratio = half / k as f64;
        term *= ratio * ratio;
        sum += term;
        if term < sum * 1e-16 {
            break;
        }
    }
    sum
}

/// Kaiser shape parameter for a desired stopband attenuation in dB
pub fn kaiser_beta_from_attenuation(attenuation_db: f64) -> f64 {
    if attenuation_db > 50.0 {
        0.1102 * (attenuation_db - 8.7)
    } else if attenuation_db > 21.0 {
        0.5842 * (attenuation_db - 21.0).powf(0.4) + 0.07886 * (attenuation_db - 21.0)
    } else {
        0.0
    }
}

/// Stopband attenuation a Kaiser design of `num_taps` taps reaches across a
/// normalized transition band `transition_bw`
///
/// Inverse of Kaiser's length estimate `n = (As - 7.95) / (14.26 df)`.
pub fn estimate_attenuation(transition_bw: f64, num_taps: usize) -> f64 {
    14.26 * transition_bw * num_taps as f64 + 7.95
}

/// Sample `n` of a length-`len` Kaiser window, shifted by `mu` samples
///
/// The window is normalized over `len` (not `len - 1`) so that any offset
/// with `|mu| <= 0.5` keeps the Bessel argument real.
pub fn kaiser_window(n: usize, len: usize, beta: f64, mu: f64) -> f64 {
    if len <= 1 {
        return 1.0;
    }
    let t = n as f64 - (len - 1) as f64 / 2.0 + mu;
    let r = 2.0 * t / len as f64;
    let arg = (1.0 - r * r).max(0.0).sqrt();
    bessel_i0(beta * arg) / bessel_i0(beta)
}
