use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GeoKit - Geospatial grid and dataset helpers
#[derive(Parser, Debug)]
#[command(name = "geokit")]
#[command(about = "Geospatial grid and dataset helpers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./geokit.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the PROJ database
    #[arg(long, global = true, value_name = "DIR")]
    pub proj_data: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rescale a 2-D grid by an integer factor
    Rescale(RescaleArgs),

    /// Validate a spatial reference system
    Srs(SrsArgs),

    /// Create an in-memory raster and describe it
    Raster(RasterArgs),

    /// Create a single-feature vector dataset from WKT
    Vector(VectorArgs),

    /// Run health checks and diagnostics
    Doctor(DoctorArgs),
}

impl Commands {
    /// Commands that cannot run without a working PROJ installation
    pub fn requires_srs(&self) -> bool {
        matches!(self, Commands::Srs(_) | Commands::Raster(_) | Commands::Vector(_))
    }
}

#[derive(Parser, Debug)]
pub struct RescaleArgs {
    /// Grid file: JSON array of rows, or one row per line (comma or whitespace separated)
    pub input: PathBuf,

    /// Scale factor: "2", "-3", "-2,-3" or "2x3" (y first). Negative scales down
    #[arg(long, short, allow_hyphen_values = true)]
    pub scale: String,

    /// Zero-pad grids that are not divisible by the scale factor when scaling down
    #[arg(long, conflicts_with = "strict")]
    pub padded: bool,

    /// Reject grids that are not divisible by the scale factor when scaling down
    #[arg(long)]
    pub strict: bool,

    /// Write the rescaled grid as JSON to this path
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SrsArgs {
    /// SRS identifier (e.g., 4326, EPSG:3857)
    pub identifier: String,
}

#[derive(Parser, Debug)]
pub struct RasterArgs {
    /// Extent as xmin,ymin,xmax,ymax
    #[arg(long, allow_hyphen_values = true)]
    pub bounds: String,

    /// Pixel width
    #[arg(long)]
    pub dx: f64,

    /// Pixel height
    #[arg(long, allow_hyphen_values = true)]
    pub dy: f64,

    /// SRS identifier (defaults to the configured SRS)
    #[arg(long)]
    pub srs: Option<String>,

    /// Pixel data type (e.g., GDT_Byte, float32)
    #[arg(long, default_value = "GDT_Byte")]
    pub dtype: String,

    /// No-data value
    #[arg(long, allow_hyphen_values = true)]
    pub no_data: Option<f64>,

    /// Initial value of every pixel
    #[arg(long, allow_hyphen_values = true)]
    pub fill: Option<f64>,

    /// Change the resolution after creation (same syntax as `rescale --scale`)
    #[arg(long, allow_hyphen_values = true)]
    pub scale: Option<String>,
}

#[derive(Parser, Debug)]
pub struct VectorArgs {
    /// Geometry as WKT, e.g. "POINT (6.5 50.2)"
    #[arg(long)]
    pub wkt: String,

    /// SRS identifier (defaults to the configured SRS)
    #[arg(long)]
    pub srs: Option<String>,

    /// Write the dataset as GeoJSON to this path instead of keeping it in memory
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct DoctorArgs {
    /// Show detailed diagnostic information
    #[arg(long)]
    pub verbose: bool,
}
