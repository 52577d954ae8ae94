use std::fmt;
use std::fmt::Write as _;

use num_complex::Complex32;

use crate::design::{FilterPrototype, interp_lowpass};
use crate::dotprod::DotProduct;
use crate::error::{DspError, Result};
use crate::interp::DelayLine;

/// Polyphase FIR interpolator
///
/// Splits a prototype filter of `rate * L` taps into `rate` sub-filters of
/// `L` taps each; phase `p` takes taps `p, p + rate, p + 2*rate, ...`. Every
/// input sample is pushed into a single shared history and each sub-filter
/// produces one output sample from that same history, so one input yields
/// `rate` outputs in phase order.
///
/// Real coefficients, complex samples.
///
/// # Example
/// ```
/// use num_complex::Complex32;
/// use polyfir::interp::FirInterpolator;
///
/// let mut interp = FirInterpolator::kaiser(4, 12, 60.0).unwrap();
/// let mut output = [Complex32::new(0.0, 0.0); 4];
/// interp.execute(Complex32::new(1.0, 0.0), &mut output);
/// assert_eq!(interp.sub_filter_length(), 24);
/// ```
#[derive(Debug, Clone)]
pub struct FirInterpolator {
    rate: usize,
    coefficients: Vec<f32>,
    sub_filters: Vec<DotProduct<f32>>,
    history: DelayLine<Complex32>,
    scale: f32,
}

impl FirInterpolator {
    /// Create an interpolator from externally designed taps
    ///
    /// # Arguments
    /// * `rate` - Interpolation factor M (outputs per input)
    /// * `taps` - Prototype filter; length must be a nonzero multiple of `rate`
    ///
    /// # Errors
    /// Returns `DspError::Config` if `rate` is zero, `taps` is empty or its
    /// length is not divisible by `rate`.
    pub fn new(rate: usize, taps: &[f32]) -> Result<Self> {
        if rate == 0 {
            return Err(DspError::Config(
                "interpolation rate must be greater than zero".to_string(),
            ));
        }
        if taps.is_empty() {
            return Err(DspError::Config(
                "filter length must be greater than zero".to_string(),
            ));
        }
        if !taps.len().is_multiple_of(rate) {
            return Err(DspError::Config(format!(
                "filter length {} is not a multiple of interpolation rate {}",
                taps.len(),
                rate
            )));
        }

        let sub_filters = (0..rate)
            .map(|phase| {
                let phase_taps: Vec<f32> = taps.iter().skip(phase).step_by(rate).copied().collect();
                DotProduct::new(&phase_taps)
            })
            .collect::<Result<Vec<_>>>()?;

        let sub_len = taps.len() / rate;
        log::debug!(
            "created firinterp: rate={}, taps={}, sub-len={}",
            rate,
            taps.len(),
            sub_len
        );

        Ok(Self {
            rate,
            coefficients: taps.to_vec(),
            sub_filters,
            history: DelayLine::new(sub_len),
            scale: 1.0,
        })
    }

    /// Create an interpolator with a Kaiser-windowed low-pass prototype
    ///
    /// The prototype has `2 * rate * semi_length + 1` taps; the final tap is
    /// dropped so each sub-filter holds `2 * semi_length` taps.
    ///
    /// # Arguments
    /// * `rate` - Interpolation factor M
    /// * `semi_length` - Filter delay in input samples (m)
    /// * `attenuation_db` - Stopband attenuation in dB
    pub fn kaiser(rate: usize, semi_length: usize, attenuation_db: f32) -> Result<Self> {
        let taps = interp_lowpass(rate, semi_length, attenuation_db)?;
        Self::new(rate, &taps[..2 * rate * semi_length])
    }

    /// Create an interpolator from a prototype descriptor
    ///
    /// Low-pass prototypes behave as [`kaiser`](Self::kaiser). Nyquist
    /// prototypes are zero-padded from `2*M*m + 1` to `M * (2m + 1)` taps.
    pub fn from_prototype(prototype: &FilterPrototype) -> Result<Self> {
        match *prototype {
            FilterPrototype::Lowpass {
                rate,
                semi_length,
                attenuation_db,
            } => Self::kaiser(rate, semi_length, attenuation_db),
            FilterPrototype::Nyquist {
                rate, semi_length, ..
            } => {
                let mut taps = prototype.design()?;
                taps.resize(rate * (2 * semi_length + 1), 0.0);
                Self::new(rate, &taps)
            }
        }
    }

    /// Clear the input history; coefficients and scale are kept
    pub fn reset(&mut self) {
        self.history.reset();
    }

    /// Push one input sample and write `rate` output samples
    ///
    /// # Panics
    /// Panics if `output.len() != rate`.
    pub fn execute(&mut self, sample: Complex32, output: &mut [Complex32]) {
        assert_eq!(
            output.len(),
            self.rate,
            "output buffer must hold one sample per phase"
        );

        self.history.push(sample);
        let window = self.history.window();
        for (y, sub_filter) in output.iter_mut().zip(&self.sub_filters) {
            *y = sub_filter.execute(window) * self.scale;
        }
    }

    /// Run [`execute`](Self::execute) over a block of input samples
    ///
    /// # Panics
    /// Panics if `output.len() != input.len() * rate`, before any state changes.
    pub fn execute_block(&mut self, input: &[Complex32], output: &mut [Complex32]) {
        assert_eq!(
            output.len(),
            input.len() * self.rate,
            "output buffer must hold rate samples per input"
        );

        for (&sample, chunk) in input.iter().zip(output.chunks_exact_mut(self.rate)) {
            self.execute(sample, chunk);
        }
    }

    /// Set the output gain applied to every sample
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Interpolation factor M
    pub fn rate(&self) -> usize {
        self.rate
    }

    /// Number of taps in each polyphase sub-filter
    pub fn sub_filter_length(&self) -> usize {
        self.history.len()
    }

    /// Full prototype coefficient vector
    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    /// Sub-filter for output phase `phase`
    pub fn sub_filter(&self, phase: usize) -> Option<&DotProduct<f32>> {
        self.sub_filters.get(phase)
    }

    pub fn sub_filters(&self) -> &[DotProduct<f32>] {
        &self.sub_filters
    }

    /// Multi-line dump of the filter metadata and per-phase taps
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "firinterp:");
        let _ = writeln!(out, "  rate          : {}", self.rate);
        let _ = writeln!(out, "  sub-length    : {}", self.sub_filter_length());
        let _ = writeln!(out, "  scale         : {}", self.scale);
        for (phase, sub_filter) in self.sub_filters.iter().enumerate() {
            let _ = write!(out, "  phase {:3}: {}", phase, sub_filter);
        }
        out
    }
}

impl fmt::Display for FirInterpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<polyfir.interp, M={}, sub-len={}>",
            self.rate,
            self.sub_filter_length()
        )
    }
}
