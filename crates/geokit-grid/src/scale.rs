//! Scale factors and the modes derived from them

use crate::error::{RescaleError, Result};
use std::fmt;
use std::str::FromStr;

/// Per-axis integer scale factor.
///
/// Positive components scale up, negative components scale down and `(0, 0)`
/// leaves the grid untouched. Both components must point the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScaleFactor {
    pub y: i32,
    pub x: i32,
}

impl ScaleFactor {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    /// Same factor on both axes
    pub const fn uniform(scale: i32) -> Self {
        Self { y: scale, x: scale }
    }

    /// Build a factor from floating point components, which must hold whole numbers
    pub fn from_f64(y: f64, x: f64) -> Result<Self> {
        Ok(Self { y: integral(y)?, x: integral(x)? })
    }

    /// Resolve the direction and magnitudes of this factor
    pub fn mode(&self) -> Result<RescaleMode> {
        let (y, x) = (self.y, self.x);
        if y == 0 && x == 0 {
            Ok(RescaleMode::NoOp)
        } else if y > 0 && x > 0 {
            Ok(RescaleMode::Upscale { y: y.unsigned_abs() as usize, x: x.unsigned_abs() as usize })
        } else if y < 0 && x < 0 {
            Ok(RescaleMode::Downscale {
                y: y.unsigned_abs() as usize,
                x: x.unsigned_abs() as usize,
            })
        } else {
            Err(RescaleError::IncompatibleScaleDirection { y, x })
        }
    }
}

fn integral(value: f64) -> Result<i32> {
    let in_range = value >= i32::MIN as f64 && value <= i32::MAX as f64;
    if !value.is_finite() || value.fract() != 0.0 || !in_range {
        return Err(RescaleError::InvalidScaleType { value: value.to_string() });
    }
    Ok(value as i32)
}

fn parse_component(text: &str) -> Result<i32> {
    let text = text.trim();
    text.parse::<i32>()
        .map_err(|_| RescaleError::InvalidScaleType { value: text.to_string() })
}

impl From<i32> for ScaleFactor {
    fn from(scale: i32) -> Self {
        Self::uniform(scale)
    }
}

impl From<(i32, i32)> for ScaleFactor {
    fn from((y, x): (i32, i32)) -> Self {
        Self::new(y, x)
    }
}

impl FromStr for ScaleFactor {
    type Err = RescaleError;

    /// Parse `2`, `-3`, `-2,-3` or `2x3` (y first)
    fn from_str(s: &str) -> Result<Self> {
        let separator = if s.contains(',') { ',' } else { 'x' };
        match s.split_once(separator) {
            Some((y, x)) => Ok(Self::new(parse_component(y)?, parse_component(x)?)),
            None => parse_component(s).map(Self::uniform),
        }
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

/// What a [`ScaleFactor`] asks for, with magnitudes resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescaleMode {
    NoOp,
    Upscale { y: usize, x: usize },
    Downscale { y: usize, x: usize },
}

/// How downscaling treats grids whose shape is not a multiple of the factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Reject non-divisible shapes
    #[default]
    Strict,
    /// Zero-pad on the bottom/right, then correct the edge cells
    Padded,
}

impl Strictness {
    pub fn is_strict(&self) -> bool {
        matches!(self, Strictness::Strict)
    }
}

impl From<bool> for Strictness {
    fn from(strict: bool) -> Self {
        if strict {
            Strictness::Strict
        } else {
            Strictness::Padded
        }
    }
}
