//! Errors raised by the grid rescaler

use thiserror::Error;

/// Validation failures. All of them are raised before any grid data is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RescaleError {
    #[error("Scale must be an integer, got '{value}'")]
    InvalidScaleType { value: String },

    #[error("Scale magnitude must be at least 1, got ({y}, {x})")]
    ZeroScale { y: usize, x: usize },

    #[error("Dimensions must be scaled in the same direction, got ({y}, {x})")]
    IncompatibleScaleDirection { y: i32, x: i32 },

    #[error("A {rows}x{cols} grid can only be scaled down by a factor of its dimensions, got ({y}, {x})")]
    NonDivisibleDimension { rows: usize, cols: usize, y: usize, x: usize },

    #[error("Scaling a {rows}x{cols} grid by ({y}, {x}) overflows the addressable size")]
    ShapeOverflow { rows: usize, cols: usize, y: usize, x: usize },
}

pub type Result<T> = std::result::Result<T, RescaleError>;
