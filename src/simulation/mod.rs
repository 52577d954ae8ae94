mod noise;
mod signal;

pub use noise::{complex_noise, random_q16, random_q32, random_taps};
pub use signal::{complex_tone, impulse, signal_power};
