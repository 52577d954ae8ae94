use thiserror::Error;

#[derive(Error, Debug)]
pub enum DspError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filter design failed: {0}")]
    FilterDesign(String),

    #[error("Allocation failed: could not reserve {requested} elements")]
    Allocation { requested: usize },

    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, DspError>;
