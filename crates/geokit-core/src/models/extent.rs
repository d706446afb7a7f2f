//! Axis-aligned extents

use crate::error::{GeokitError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Axis-aligned bounds in SRS units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Create validated bounds
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        let bounds = Self { x_min, y_min, x_max, y_max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Check that the bounds are finite and non-degenerate
    pub fn validate(&self) -> Result<()> {
        let values = [self.x_min, self.y_min, self.x_max, self.y_max];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(GeokitError::extent("Bounds must be finite"));
        }
        if self.x_min >= self.x_max {
            return Err(GeokitError::extent(format!(
                "x_min ({}) must be less than x_max ({})",
                self.x_min, self.x_max
            )));
        }
        if self.y_min >= self.y_max {
            return Err(GeokitError::extent(format!(
                "y_min ({}) must be less than y_max ({})",
                self.y_min, self.y_max
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl FromStr for Bounds {
    type Err = GeokitError;

    /// Parse `xmin,ymin,xmax,ymax`
    fn from_str(s: &str) -> Result<Self> {
        let values: Vec<f64> = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| GeokitError::extent(format!("Invalid bounds '{}': {}", s, e)))?;

        match values.as_slice() {
            [x_min, y_min, x_max, y_max] => Self::new(*x_min, *y_min, *x_max, *y_max),
            _ => Err(GeokitError::extent(format!(
                "Bounds need 4 values (xmin,ymin,xmax,ymax), found {}",
                values.len()
            ))),
        }
    }
}
