pub mod lowpass;
pub mod nyquist;
pub mod prototype;
pub mod window;

pub use lowpass::{interp_lowpass, kaiser_lowpass};
pub use prototype::{FilterPrototype, NyquistFamily};
pub use window::{kaiser_beta_from_attenuation, kaiser_window};
