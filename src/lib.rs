pub mod config;
pub mod constants;
pub mod design;
pub mod dotprod;
pub mod error;
pub mod fixed_point;
pub mod interp;
pub mod logging;
pub mod output;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{FilterConfig, InterpolatorConfig};
pub use design::{FilterPrototype, NyquistFamily};
pub use dotprod::DotProduct;
pub use error::{DspError, Result};
pub use fixed_point::{Q16, Q32};
pub use interp::FirInterpolator;
pub use logging::{Logger, Severity};
