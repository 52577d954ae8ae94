//! Interpolator configuration.
//!
//! An [`InterpolatorConfig`] describes everything needed to build a
//! [`FirInterpolator`]: the interpolation rate, the output gain and where the
//! coefficients come from. It is usually read from a TOML file:
//!
//! ```toml
//! rate = 4
//! scale = 0.5
//!
//! [filter]
//! type = "prototype"
//! family = "rrcos"
//! semi_length = 5
//! excess_bandwidth = 0.3
//! ```
//!
//! Omitted fields take the defaults documented on each variant of
//! [`FilterConfig`].

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::design::{FilterPrototype, NyquistFamily};
use crate::error::{DspError, Result};
use crate::interp::FirInterpolator;

const DEFAULT_RATE: usize = 2;
const DEFAULT_SCALE: f32 = 1.0;
const DEFAULT_LOWPASS_SEMI_LENGTH: usize = 12;
const DEFAULT_ATTENUATION_DB: f32 = 60.0;
const DEFAULT_PROTOTYPE_SEMI_LENGTH: usize = 7;
const DEFAULT_EXCESS_BANDWIDTH: f32 = 0.25;

fn default_lowpass_semi_length() -> usize {
    DEFAULT_LOWPASS_SEMI_LENGTH
}

fn default_attenuation_db() -> f32 {
    DEFAULT_ATTENUATION_DB
}

fn default_prototype_semi_length() -> usize {
    DEFAULT_PROTOTYPE_SEMI_LENGTH
}

fn default_excess_bandwidth() -> f32 {
    DEFAULT_EXCESS_BANDWIDTH
}

/// Source of the interpolator's master coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterConfig {
    /// Kaiser-windowed sinc low-pass (defaults: `semi_length = 12`,
    /// `attenuation_db = 60`)
    Lowpass {
        #[serde(default = "default_lowpass_semi_length")]
        semi_length: usize,
        #[serde(default = "default_attenuation_db")]
        attenuation_db: f32,
    },
    /// Nyquist or root-Nyquist pulse shape (defaults: `semi_length = 7`,
    /// `excess_bandwidth = 0.25`, `timing_offset = 0`)
    Prototype {
        family: NyquistFamily,
        #[serde(default = "default_prototype_semi_length")]
        semi_length: usize,
        #[serde(default = "default_excess_bandwidth")]
        excess_bandwidth: f32,
        #[serde(default)]
        timing_offset: f32,
    },
    /// Caller-supplied taps; the count must be a multiple of the rate
    External { taps: Vec<f32> },
}

impl FilterConfig {
    /// Prototype descriptor for designed filters, `None` for external taps
    pub fn prototype(&self, rate: usize) -> Option<FilterPrototype> {
        match *self {
            FilterConfig::Lowpass {
                semi_length,
                attenuation_db,
            } => Some(FilterPrototype::lowpass(rate, semi_length, attenuation_db)),
            FilterConfig::Prototype {
                family,
                semi_length,
                excess_bandwidth,
                timing_offset,
            } => Some(FilterPrototype::nyquist(
                family,
                rate,
                semi_length,
                excess_bandwidth,
                timing_offset,
            )),
            FilterConfig::External { .. } => None,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig::Lowpass {
            semi_length: DEFAULT_LOWPASS_SEMI_LENGTH,
            attenuation_db: DEFAULT_ATTENUATION_DB,
        }
    }
}

impl fmt::Display for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterConfig::Lowpass {
                semi_length,
                attenuation_db,
            } => write!(f, "lowpass(m={}, As={} dB)", semi_length, attenuation_db),
            FilterConfig::Prototype {
                family,
                semi_length,
                excess_bandwidth,
                timing_offset,
            } => write!(
                f,
                "{}(m={}, beta={}, mu={})",
                family, semi_length, excess_bandwidth, timing_offset
            ),
            FilterConfig::External { taps } => write!(f, "external({} taps)", taps.len()),
        }
    }
}

/// Complete interpolator configuration
///
/// # Example
/// ```
/// use polyfir::config::InterpolatorConfig;
///
/// let config = InterpolatorConfig::from_toml_str("rate = 3").unwrap();
/// let interp = config.build().unwrap();
/// assert_eq!(interp.rate(), 3);
/// assert_eq!(interp.sub_filter_length(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpolatorConfig {
    /// Interpolation factor M (outputs per input sample)
    pub rate: usize,
    /// Gain applied to every output sample
    pub scale: f32,
    /// Coefficient source
    pub filter: FilterConfig,
}

impl Default for InterpolatorConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            scale: DEFAULT_SCALE,
            filter: FilterConfig::default(),
        }
    }
}

impl InterpolatorConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DspError::Config(format!("invalid config: {}", e)))
    }

    /// Read and parse a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DspError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| DspError::Config(format!("cannot encode config: {}", e)))
    }

    /// Construct the interpolator described by this configuration
    pub fn build(&self) -> Result<FirInterpolator> {
        let mut interp = match &self.filter {
            FilterConfig::External { taps } => FirInterpolator::new(self.rate, taps)?,
            FilterConfig::Lowpass {
                semi_length,
                attenuation_db,
            } => FirInterpolator::kaiser(self.rate, *semi_length, *attenuation_db)?,
            FilterConfig::Prototype {
                family,
                semi_length,
                excess_bandwidth,
                timing_offset,
            } => FirInterpolator::from_prototype(&FilterPrototype::nyquist(
                *family,
                self.rate,
                *semi_length,
                *excess_bandwidth,
                *timing_offset,
            ))?,
        };
        interp.set_scale(self.scale);
        log::debug!(
            "built interpolator M={} from {} (scale {})",
            self.rate,
            self.filter,
            self.scale
        );
        Ok(interp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InterpolatorConfig::default();
        assert_eq!(config.rate, 2);
        assert_eq!(config.scale, 1.0);
        assert_eq!(
            config.filter,
            FilterConfig::Lowpass {
                semi_length: 12,
                attenuation_db: 60.0
            }
        );
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = InterpolatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, InterpolatorConfig::default());
    }

    #[test]
    fn test_prototype_defaults() {
        let config = InterpolatorConfig::from_toml_str(
            r#"
            rate = 4

            [filter]
            type = "prototype"
            family = "rcos"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.filter,
            FilterConfig::Prototype {
                family: NyquistFamily::RaisedCosine,
                semi_length: 7,
                excess_bandwidth: 0.25,
                timing_offset: 0.0,
            }
        );
        let interp = config.build().unwrap();
        assert_eq!(interp.rate(), 4);
        assert_eq!(interp.sub_filter_length(), 15);
    }

    #[test]
    fn test_integer_scale_accepted() {
        let config = InterpolatorConfig::from_toml_str("scale = 2").unwrap();
        assert_eq!(config.scale, 2.0);
        assert_eq!(config.build().unwrap().scale(), 2.0);
    }

    #[test]
    fn test_external_taps() {
        let config = InterpolatorConfig::from_toml_str(
            r#"
            rate = 2
            [filter]
            type = "external"
            taps = [0.5, 1.0, 0.5, 0.0]
            "#,
        )
        .unwrap();
        assert!(config.filter.prototype(config.rate).is_none());
        let interp = config.build().unwrap();
        assert_eq!(interp.coefficients(), &[0.5, 1.0, 0.5, 0.0]);
        assert_eq!(interp.sub_filter_length(), 2);
    }

    #[test]
    fn test_external_taps_not_multiple_of_rate() {
        let config = InterpolatorConfig {
            rate: 3,
            filter: FilterConfig::External {
                taps: vec![1.0; 4],
            },
            ..Default::default()
        };
        assert!(matches!(config.build(), Err(DspError::Config(_))));
    }

    #[test]
    fn test_unknown_family_rejected() {
        let result = InterpolatorConfig::from_toml_str(
            r#"
            [filter]
            type = "prototype"
            family = "gaussian"
            "#,
        );
        assert!(matches!(result, Err(DspError::Config(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(InterpolatorConfig::from_toml_str("ratio = 2").is_err());
    }

    #[test]
    fn test_zero_rate_fails_to_build() {
        let config = InterpolatorConfig {
            rate: 0,
            ..Default::default()
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = InterpolatorConfig {
            rate: 5,
            scale: 0.25,
            filter: FilterConfig::Prototype {
                family: NyquistFamily::FlippedExponential,
                semi_length: 3,
                excess_bandwidth: 0.5,
                timing_offset: -0.25,
            },
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(InterpolatorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = InterpolatorConfig::load("/nonexistent/polyfir.toml").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(FilterConfig::default().to_string(), "lowpass(m=12, As=60 dB)");
        let external = FilterConfig::External {
            taps: vec![0.0; 6],
        };
        assert_eq!(external.to_string(), "external(6 taps)");
    }
}
