pub mod kernel;
pub mod structured;

pub use kernel::{MulAcc, run, run4};
pub use structured::DotProduct;
