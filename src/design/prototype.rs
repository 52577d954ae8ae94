use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_TIMING_OFFSET;
use crate::design::{lowpass, nyquist};
use crate::error::{DspError, Result};

/// Nyquist / root-Nyquist pulse-shape family
///
/// # Parsing
/// `kaiser`, `pm`, `rcos`, `fexp`, `rrcos`
///
/// ```
/// use polyfir::design::NyquistFamily;
///
/// let family: NyquistFamily = "rrcos".parse().unwrap();
/// assert!(family.is_root_nyquist());
/// assert!("gaussian".parse::<NyquistFamily>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum NyquistFamily {
    /// Nyquist Kaiser-windowed sinc
    #[serde(rename = "kaiser")]
    #[value(name = "kaiser")]
    Kaiser,
    /// Parks-McClellan equiripple low-pass (approximately Nyquist)
    #[serde(rename = "pm")]
    #[value(name = "pm")]
    ParksMcClellan,
    /// Raised cosine
    #[serde(rename = "rcos")]
    #[value(name = "rcos")]
    RaisedCosine,
    /// Flipped exponential
    #[serde(rename = "fexp")]
    #[value(name = "fexp")]
    FlippedExponential,
    /// Square-root raised cosine
    #[serde(rename = "rrcos")]
    #[value(name = "rrcos")]
    RootRaisedCosine,
}

impl NyquistFamily {
    pub const ALL: [NyquistFamily; 5] = [
        NyquistFamily::Kaiser,
        NyquistFamily::ParksMcClellan,
        NyquistFamily::RaisedCosine,
        NyquistFamily::FlippedExponential,
        NyquistFamily::RootRaisedCosine,
    ];

    /// Short name used in configuration files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            NyquistFamily::Kaiser => "kaiser",
            NyquistFamily::ParksMcClellan => "pm",
            NyquistFamily::RaisedCosine => "rcos",
            NyquistFamily::FlippedExponential => "fexp",
            NyquistFamily::RootRaisedCosine => "rrcos",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            NyquistFamily::Kaiser => "Nyquist Kaiser filter",
            NyquistFamily::ParksMcClellan => "Parks-McClellan filter",
            NyquistFamily::RaisedCosine => "raised-cosine filter",
            NyquistFamily::FlippedExponential => "flipped exponential",
            NyquistFamily::RootRaisedCosine => "square-root raised-cosine filter",
        }
    }

    /// True for shapes whose own impulse response has zeros at every
    /// nonzero symbol time
    pub fn is_nyquist(&self) -> bool {
        matches!(
            self,
            NyquistFamily::Kaiser | NyquistFamily::RaisedCosine | NyquistFamily::FlippedExponential
        )
    }

    /// True for shapes that are Nyquist only after matched filtering
    pub fn is_root_nyquist(&self) -> bool {
        matches!(self, NyquistFamily::RootRaisedCosine)
    }
}

impl fmt::Display for NyquistFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NyquistFamily {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        NyquistFamily::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DspError::Config(format!("unknown filter type: {}", s)))
    }
}

/// Parameters that fully determine a prototype coefficient vector
///
/// Both variants produce `2 * rate * semi_length + 1` taps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterPrototype {
    /// Kaiser-windowed sinc low-pass with cutoff `0.5 / rate`
    Lowpass {
        rate: usize,
        semi_length: usize,
        attenuation_db: f32,
    },
    /// Nyquist or root-Nyquist pulse shape with `rate` samples per symbol
    Nyquist {
        family: NyquistFamily,
        rate: usize,
        semi_length: usize,
        excess_bandwidth: f32,
        timing_offset: f32,
    },
}

impl FilterPrototype {
    pub fn lowpass(rate: usize, semi_length: usize, attenuation_db: f32) -> Self {
        FilterPrototype::Lowpass {
            rate,
            semi_length,
            attenuation_db,
        }
    }

    pub fn nyquist(
        family: NyquistFamily,
        rate: usize,
        semi_length: usize,
        excess_bandwidth: f32,
        timing_offset: f32,
    ) -> Self {
        FilterPrototype::Nyquist {
            family,
            rate,
            semi_length,
            excess_bandwidth,
            timing_offset,
        }
    }

    pub fn rate(&self) -> usize {
        match *self {
            FilterPrototype::Lowpass { rate, .. } | FilterPrototype::Nyquist { rate, .. } => rate,
        }
    }

    pub fn semi_length(&self) -> usize {
        match *self {
            FilterPrototype::Lowpass { semi_length, .. }
            | FilterPrototype::Nyquist { semi_length, .. } => semi_length,
        }
    }

    /// Length of the designed coefficient vector
    pub fn num_taps(&self) -> usize {
        2 * self.rate() * self.semi_length() + 1
    }

    /// Check every parameter range without designing anything
    pub fn validate(&self) -> Result<()> {
        if self.rate() == 0 {
            return Err(DspError::Config(
                "interpolation rate must be greater than zero".to_string(),
            ));
        }
        if self.semi_length() == 0 {
            return Err(DspError::Config(
                "filter semi-length must be greater than zero".to_string(),
            ));
        }

        match *self {
            FilterPrototype::Lowpass { attenuation_db, .. } => {
                if !(attenuation_db > 0.0) {
                    return Err(DspError::Config(format!(
                        "stopband attenuation must be positive, got {} dB",
                        attenuation_db
                    )));
                }
            }
            FilterPrototype::Nyquist {
                excess_bandwidth,
                timing_offset,
                ..
            } => {
                if !(excess_bandwidth > 0.0 && excess_bandwidth <= 1.0) {
                    return Err(DspError::Config(format!(
                        "excess bandwidth factor {} out of range (0, 1]",
                        excess_bandwidth
                    )));
                }
                if !(timing_offset.abs() <= MAX_TIMING_OFFSET) {
                    return Err(DspError::Config(format!(
                        "timing offset {} out of range [-0.5, 0.5]",
                        timing_offset
                    )));
                }
            }
        }
        Ok(())
    }

    /// Design the coefficient vector
    ///
    /// # Errors
    /// Returns `DspError::Config` for out-of-range parameters and
    /// `DspError::FilterDesign` if the underlying design routine fails.
    pub fn design(&self) -> Result<Vec<f32>> {
        self.validate()?;

        match *self {
            FilterPrototype::Lowpass {
                rate,
                semi_length,
                attenuation_db,
            } => lowpass::interp_lowpass(rate, semi_length, attenuation_db),
            FilterPrototype::Nyquist {
                family,
                rate,
                semi_length,
                excess_bandwidth,
                timing_offset,
            } => {
                log::debug!(
                    "{} prototype: k={}, m={}, beta={}, mu={}",
                    family.name(),
                    rate,
                    semi_length,
                    excess_bandwidth,
                    timing_offset
                );
                let (k, m, beta, mu) = (rate, semi_length, excess_bandwidth, timing_offset);
                match family {
                    NyquistFamily::Kaiser => nyquist::kaiser_nyquist(k, m, beta, mu),
                    NyquistFamily::ParksMcClellan => nyquist::parks_mcclellan(k, m, beta, mu),
                    NyquistFamily::RaisedCosine => Ok(nyquist::raised_cosine(k, m, beta, mu)),
                    NyquistFamily::FlippedExponential => {
                        Ok(nyquist::flipped_exponential(k, m, beta, mu))
                    }
                    NyquistFamily::RootRaisedCosine => {
                        Ok(nyquist::root_raised_cosine(k, m, beta, mu))
                    }
                }
            }
        }
    }
}
