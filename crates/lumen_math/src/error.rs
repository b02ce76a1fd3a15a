use thiserror::Error;

/// Errors raised by the math primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("axis index {0} is out of range (expected 0, 1 or 2)")]
    InvalidAxis(usize),
}
