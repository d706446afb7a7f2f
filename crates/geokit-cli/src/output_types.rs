use geokit_core::models::{Bounds, Srs};
use serde::Serialize;

/// Output for rescale command
#[derive(Debug, Serialize)]
pub struct RescaleOutput {
    pub scale: [i32; 2],
    pub mode: String,
    pub strict: bool,
    pub input_shape: [usize; 2],
    pub output_shape: [usize; 2],
    pub grid: Vec<Vec<f64>>,
    pub written_to: Option<String>,
}

/// Output for srs command
#[derive(Debug, Serialize)]
pub struct SrsOutput {
    pub epsg: u32,
    pub name: String,
    pub authority: String,
}

impl From<&Srs> for SrsOutput {
    fn from(srs: &Srs) -> Self {
        Self { epsg: srs.epsg, name: srs.name.clone(), authority: srs.authority() }
    }
}

/// Output for raster command
#[derive(Debug, Serialize)]
pub struct RasterOutput {
    pub rows: usize,
    pub cols: usize,
    pub data_type: String,
    pub geotransform: [f64; 6],
    pub bounds: Bounds,
    pub srs: Option<SrsOutput>,
    pub no_data: Option<f64>,
    pub mean: Option<f64>,
}

/// Output for vector command
#[derive(Debug, Serialize)]
pub struct VectorOutput {
    pub geometry_type: String,
    pub srs: SrsOutput,
    pub persisted_to: Option<String>,
    pub recorded_srs: Option<String>,
    pub geojson: Option<serde_json::Value>,
}

/// One line of the doctor report
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Output for doctor command
#[derive(Debug, Serialize)]
pub struct DoctorOutput {
    pub checks: Vec<CheckResult>,
    pub passed: usize,
    pub total: usize,
}
