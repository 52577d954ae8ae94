pub mod delay_line;
pub mod firinterp;

pub use delay_line::DelayLine;
pub use firinterp::FirInterpolator;
