//! Numeric constants shared by the design routines and kernels
//!
//! These thresholds guard the closed-form pulse expressions against the
//! removable singularities they contain.

/// Below this magnitude an argument to `sinc` is treated as zero.
pub const SINC_EPSILON: f64 = 1e-6;

/// Below this magnitude a pulse-shape denominator is treated as singular and
/// the analytic limit is used instead.
pub const SINGULARITY_EPSILON: f64 = 1e-6;

/// Largest magnitude accepted for a fractional timing offset, in samples.
pub const MAX_TIMING_OFFSET: f32 = 0.5;

/// Maximum number of sinks a single logger accepts.
pub const MAX_LOG_SINKS: usize = 32;

/// Default strftime format for log timestamps.
pub const DEFAULT_LOG_TIME_FORMAT: &str = "%F-%T";
