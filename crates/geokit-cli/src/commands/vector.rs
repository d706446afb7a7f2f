use crate::cli::VectorArgs;
use crate::output::OutputWriter;
use crate::output_types::{SrsOutput, VectorOutput};
use anyhow::{anyhow, Result};
use geo::Geometry;
use geokit_core::config::LayeredConfig;
use geokit_geo::vector::collection_srs;
use geokit_geo::{load_epsg, load_srs, quick_vector, VectorSource};
use wkt::TryFromWkt;

pub fn execute(args: VectorArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let geometry = Geometry::<f64>::try_from_wkt_str(&args.wkt)
        .map_err(|e| anyhow!("Invalid WKT '{}': {}", args.wkt, e))?;
    let srs = match &args.srs {
        Some(spec) => load_srs(spec)?,
        None => load_epsg(config.srs.value)?,
    };

    let source = quick_vector(&geometry, &srs, args.output.as_deref())?;
    let geometry_type = geometry_type(&geometry);

    if output.is_json() {
        let (persisted_to, recorded_srs, geojson) = match &source {
            VectorSource::Persisted(path) => (Some(path.display().to_string()), None, None),
            VectorSource::InMemory(collection) => (
                None,
                collection_srs(collection).map(|s| s.authority()),
                Some(serde_json::to_value(collection)?),
            ),
        };
        output.result(VectorOutput {
            geometry_type: geometry_type.to_string(),
            srs: SrsOutput::from(&srs),
            persisted_to,
            recorded_srs,
            geojson,
        })?;
    } else {
        match &source {
            VectorSource::Persisted(path) => {
                output.success(format!("Wrote {} to {}", geometry_type, path.display()));
            }
            VectorSource::InMemory(collection) => {
                output.success(format!("Created in-memory {} dataset", geometry_type));
                if let Some(recorded) = collection_srs(collection) {
                    output.kv("Recorded SRS", recorded.authority());
                }
                println!("{}", serde_json::to_string_pretty(collection)?);
            }
        }
        output.kv("SRS", &srs);
    }

    Ok(())
}

fn geometry_type(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
