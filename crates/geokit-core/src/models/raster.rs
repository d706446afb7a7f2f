//! Raster value types: pixel data types and geotransforms

use crate::error::{GeokitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pixel data type of a raster band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DataType {
    #[default]
    Byte,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
}

impl DataType {
    /// GDAL-style name, e.g. `GDT_Byte`
    pub fn gdal_name(&self) -> &'static str {
        match self {
            DataType::Byte => "GDT_Byte",
            DataType::UInt16 => "GDT_UInt16",
            DataType::Int16 => "GDT_Int16",
            DataType::UInt32 => "GDT_UInt32",
            DataType::Int32 => "GDT_Int32",
            DataType::Float32 => "GDT_Float32",
            DataType::Float64 => "GDT_Float64",
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, DataType::Float32 | DataType::Float64)
    }

    /// Inclusive range of representable values
    pub fn range(&self) -> (f64, f64) {
        match self {
            DataType::Byte => (u8::MIN as f64, u8::MAX as f64),
            DataType::UInt16 => (u16::MIN as f64, u16::MAX as f64),
            DataType::Int16 => (i16::MIN as f64, i16::MAX as f64),
            DataType::UInt32 => (u32::MIN as f64, u32::MAX as f64),
            DataType::Int32 => (i32::MIN as f64, i32::MAX as f64),
            DataType::Float32 => (f32::MIN as f64, f32::MAX as f64),
            DataType::Float64 => (f64::MIN, f64::MAX),
        }
    }

    /// Whether `value` can be stored in a band of this type without loss
    pub fn accepts(&self, value: f64) -> bool {
        if value.is_nan() {
            return !self.is_integer();
        }
        let (min, max) = self.range();
        if value < min || value > max {
            return false;
        }
        !self.is_integer() || value.fract() == 0.0
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gdal_name())
    }
}

impl FromStr for DataType {
    type Err = GeokitError;

    /// Accepts `GDT_Byte`, `byte`, `float32`, ...
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let name = lower.strip_prefix("gdt_").unwrap_or(&lower);
        match name {
            "byte" | "u8" => Ok(DataType::Byte),
            "uint16" | "u16" => Ok(DataType::UInt16),
            "int16" | "i16" => Ok(DataType::Int16),
            "uint32" | "u32" => Ok(DataType::UInt32),
            "int32" | "i32" => Ok(DataType::Int32),
            "float32" | "f32" => Ok(DataType::Float32),
            "float64" | "f64" => Ok(DataType::Float64),
            _ => Err(GeokitError::raster(format!("Unknown data type: {}", s))),
        }
    }
}

/// Six-coefficient affine transform in "Y-at-top" orientation.
///
/// The origin is the top-left corner; rows advance southward, so
/// `pixel_height` is stored negative just like GDAL does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub origin_y: f64,
    pub column_rotation: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    /// North-up transform from a top-left origin and absolute pixel sizes
    pub fn north_up(origin_x: f64, origin_y: f64, dx: f64, dy: f64) -> Self {
        Self {
            origin_x,
            pixel_width: dx.abs(),
            row_rotation: 0.0,
            origin_y,
            column_rotation: 0.0,
            pixel_height: -dy.abs(),
        }
    }

    /// Coefficients in GDAL order
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.column_rotation,
            self.pixel_height,
        ]
    }

    /// World coordinate of the top-left corner of pixel `(row, col)`
    pub fn pixel_to_world(&self, row: f64, col: f64) -> (f64, f64) {
        let x = self.origin_x + col * self.pixel_width + row * self.row_rotation;
        let y = self.origin_y + col * self.column_rotation + row * self.pixel_height;
        (x, y)
    }
}
