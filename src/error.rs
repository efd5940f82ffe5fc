use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Failure classes raised by constructors and pure helpers.
///
/// Component entry points never propagate these to the host: they log the
/// failure and fall back to a neutral visual instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },
}
