//! Quick single-feature vector datasets

use geo::{Coord, Geometry, LineString, Polygon};
use geojson::{Feature, FeatureCollection, JsonObject};
use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::PolygonRing;
use geokit_core::error::{GeokitError, Result};
use geokit_core::models::Srs;
use std::fs;
use std::path::{Path, PathBuf};

/// Attribute column written to Shapefile outputs
const ID_FIELD: &str = "id";

/// A quick vector dataset, either written to disk or kept in memory
#[derive(Debug, Clone)]
pub enum VectorSource {
    /// The dataset was written to this path
    Persisted(PathBuf),
    /// The dataset only lives in memory
    InMemory(FeatureCollection),
}

impl VectorSource {
    pub fn is_persisted(&self) -> bool {
        matches!(self, VectorSource::Persisted(_))
    }
}

/// Wrap a single geometry in a vector dataset.
///
/// The geometry is validated first. The SRS is recorded as a GeoJSON `crs`
/// member. With `output`, the dataset is written to that path, which must not
/// exist yet: `.geojson`/`.json` paths get GeoJSON, `.shp` paths an ESRI
/// Shapefile with one `id` attribute. Shapefiles carry no `.prj`.
pub fn quick_vector(geometry: &Geometry, srs: &Srs, output: Option<&Path>) -> Result<VectorSource> {
    validate_geometry(geometry)?;

    let feature = Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(geometry))),
        id: None,
        properties: None,
        foreign_members: None,
    };

    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        "crs".to_string(),
        serde_json::json!({
            "type": "name",
            "properties": { "name": srs.authority() }
        }),
    );

    let collection = FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: Some(foreign_members),
    };

    let Some(path) = output else {
        return Ok(VectorSource::InMemory(collection));
    };

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "geojson" | "json" => write_geojson(&collection, path)?,
        "shp" => write_shapefile(geometry, path)?,
        _ => {
            return Err(GeokitError::vector(format!(
                "Unsupported output format for {}: use a .shp, .geojson or .json path",
                path.display()
            )))
        }
    }

    tracing::info!("Wrote quick vector to {}", path.display());
    Ok(VectorSource::Persisted(path.to_path_buf()))
}

fn write_geojson(collection: &FeatureCollection, path: &Path) -> Result<()> {
    if path.exists() {
        return Err(GeokitError::vector(format!("{} already exists", path.display())));
    }

    let content = serde_json::to_string_pretty(collection)
        .map_err(|e| GeokitError::Serialization(format!("Failed to serialize vector: {}", e)))?;
    fs::write(path, content)?;
    Ok(())
}

/// Single shape in the form the shapefile writer takes
enum EsriGeometry {
    Point(shapefile::Point),
    Multipoint(shapefile::Multipoint),
    Polyline(shapefile::Polyline),
    Polygon(shapefile::Polygon),
}

fn esri_point(coord: Coord) -> shapefile::Point {
    shapefile::Point::new(coord.x, coord.y)
}

fn esri_points(ls: &LineString) -> Vec<shapefile::Point> {
    ls.0.iter().map(|c| esri_point(*c)).collect()
}

fn esri_rings(poly: &Polygon) -> Vec<PolygonRing<shapefile::Point>> {
    std::iter::once(PolygonRing::Outer(esri_points(poly.exterior())))
        .chain(poly.interiors().iter().map(|ring| PolygonRing::Inner(esri_points(ring))))
        .collect()
}

impl EsriGeometry {
    fn from_geometry(geometry: &Geometry) -> Result<Self> {
        let shape = match geometry {
            Geometry::Point(p) => EsriGeometry::Point(esri_point(p.0)),
            Geometry::MultiPoint(mp) => EsriGeometry::Multipoint(shapefile::Multipoint::new(
                mp.0.iter().map(|p| esri_point(p.0)).collect(),
            )),
            Geometry::Line(line) => EsriGeometry::Polyline(shapefile::Polyline::new(vec![
                esri_point(line.start),
                esri_point(line.end),
            ])),
            Geometry::LineString(ls) => {
                EsriGeometry::Polyline(shapefile::Polyline::new(esri_points(ls)))
            }
            Geometry::MultiLineString(mls) => EsriGeometry::Polyline(
                shapefile::Polyline::with_parts(mls.0.iter().map(esri_points).collect()),
            ),
            Geometry::Polygon(poly) => {
                EsriGeometry::Polygon(shapefile::Polygon::with_rings(esri_rings(poly)))
            }
            Geometry::MultiPolygon(mp) => EsriGeometry::Polygon(shapefile::Polygon::with_rings(
                mp.0.iter().flat_map(esri_rings).collect(),
            )),
            Geometry::Rect(rect) => {
                EsriGeometry::Polygon(shapefile::Polygon::with_rings(esri_rings(&rect.to_polygon())))
            }
            Geometry::Triangle(tri) => {
                EsriGeometry::Polygon(shapefile::Polygon::with_rings(esri_rings(&tri.to_polygon())))
            }
            Geometry::GeometryCollection(_) => {
                return Err(GeokitError::vector(
                    "A Shapefile holds a single geometry type; GeometryCollection cannot be written",
                ))
            }
        };
        Ok(shape)
    }
}

/// Write a one-record Shapefile (`.shp`, `.shx` and `.dbf` next to each other)
fn write_shapefile(geometry: &Geometry, path: &Path) -> Result<()> {
    let shape = EsriGeometry::from_geometry(geometry)?;

    for ext in ["shp", "shx", "dbf"] {
        let component = path.with_extension(ext);
        if component.exists() {
            return Err(GeokitError::vector(format!("{} already exists", component.display())));
        }
    }

    let id_field = FieldName::try_from(ID_FIELD)
        .map_err(|e| GeokitError::vector(format!("Invalid field name '{}': {:?}", ID_FIELD, e)))?;
    let table = TableWriterBuilder::new().add_numeric_field(id_field, 10, 0);

    let mut record = Record::default();
    record.insert(ID_FIELD.to_string(), FieldValue::Numeric(Some(1.0)));

    let shapefile_error =
        |e: shapefile::Error| GeokitError::vector(format!("Failed to write Shapefile: {}", e));
    let mut writer = shapefile::Writer::from_path(path, table).map_err(shapefile_error)?;
    let written = match &shape {
        EsriGeometry::Point(s) => writer.write_shape_and_record(s, &record),
        EsriGeometry::Multipoint(s) => writer.write_shape_and_record(s, &record),
        EsriGeometry::Polyline(s) => writer.write_shape_and_record(s, &record),
        EsriGeometry::Polygon(s) => writer.write_shape_and_record(s, &record),
    };
    written.map_err(shapefile_error)?;

    Ok(())
}

/// SRS recorded in a collection's `crs` member, if any
pub fn collection_srs(collection: &FeatureCollection) -> Option<Srs> {
    let name = collection
        .foreign_members
        .as_ref()?
        .get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()?;
    name.parse().ok()
}

/// Reject geometries a dataset cannot hold: non-finite coordinates,
/// lines with fewer than 2 points, and rings that are open or shorter than 4 points.
pub fn validate_geometry(geometry: &Geometry) -> Result<()> {
    match geometry {
        Geometry::Point(p) => check_coord(p.0, "Point"),
        Geometry::Line(line) => {
            check_coord(line.start, "Line start")?;
            check_coord(line.end, "Line end")
        }
        Geometry::LineString(ls) => check_linestring(ls, "LineString"),
        Geometry::Polygon(poly) => check_polygon(poly, "Polygon"),
        Geometry::MultiPoint(mp) => {
            for (i, p) in mp.0.iter().enumerate() {
                check_coord(p.0, &format!("MultiPoint[{}]", i))?;
            }
            Ok(())
        }
        Geometry::MultiLineString(mls) => {
            for (i, ls) in mls.0.iter().enumerate() {
                check_linestring(ls, &format!("MultiLineString[{}]", i))?;
            }
            Ok(())
        }
        Geometry::MultiPolygon(mp) => {
            for (i, poly) in mp.0.iter().enumerate() {
                check_polygon(poly, &format!("MultiPolygon[{}]", i))?;
            }
            Ok(())
        }
        Geometry::GeometryCollection(gc) => {
            if gc.0.is_empty() {
                return Err(GeokitError::geometry("GeometryCollection is empty"));
            }
            gc.0.iter().try_for_each(validate_geometry)
        }
        Geometry::Rect(rect) => {
            check_coord(rect.min(), "Rect min")?;
            check_coord(rect.max(), "Rect max")
        }
        Geometry::Triangle(tri) => {
            check_coord(tri.0, "Triangle")?;
            check_coord(tri.1, "Triangle")?;
            check_coord(tri.2, "Triangle")
        }
    }
}

fn check_coord(coord: Coord, location: &str) -> Result<()> {
    if !coord.x.is_finite() || !coord.y.is_finite() {
        return Err(GeokitError::geometry(format!(
            "{}: coordinates must be finite, found ({}, {})",
            location, coord.x, coord.y
        )));
    }
    Ok(())
}

fn check_linestring(ls: &LineString, location: &str) -> Result<()> {
    if ls.0.len() < 2 {
        return Err(GeokitError::geometry(format!(
            "{}: must have at least 2 points, found {}",
            location,
            ls.0.len()
        )));
    }
    for (i, coord) in ls.0.iter().enumerate() {
        check_coord(*coord, &format!("{}[{}]", location, i))?;
    }
    Ok(())
}

fn check_ring(ring: &LineString, location: &str) -> Result<()> {
    if ring.0.len() < 4 {
        return Err(GeokitError::geometry(format!(
            "{}: ring must have at least 4 points, found {}",
            location,
            ring.0.len()
        )));
    }
    if ring.0.first() != ring.0.last() {
        return Err(GeokitError::geometry(format!(
            "{}: ring must be closed (first point == last point)",
            location
        )));
    }
    check_linestring(ring, location)
}

fn check_polygon(poly: &Polygon, location: &str) -> Result<()> {
    check_ring(poly.exterior(), &format!("{} exterior", location))?;
    for (i, interior) in poly.interiors().iter().enumerate() {
        check_ring(interior, &format!("{} interior[{}]", location, i))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point, polygon};

    #[test]
    fn test_in_memory_point() {
        let geom = Geometry::Point(point!(x: 6.5, y: 50.2));
        let source = quick_vector(&geom, &Srs::wgs84(), None).unwrap();

        match source {
            VectorSource::InMemory(fc) => {
                assert_eq!(fc.features.len(), 1);
                assert!(fc.features[0].geometry.is_some());
                assert_eq!(collection_srs(&fc), Some(Srs::wgs84()));
            }
            VectorSource::Persisted(_) => panic!("expected an in-memory dataset"),
        }
    }

    #[test]
    fn test_invalid_geometries_rejected() {
        let short = Geometry::LineString(line_string![(x: 0.0, y: 0.0)]);
        assert!(matches!(validate_geometry(&short), Err(GeokitError::Geometry { .. })));

        let nan = Geometry::Point(point!(x: f64::NAN, y: 1.0));
        assert!(validate_geometry(&nan).is_err());

        let empty = Geometry::GeometryCollection(geo::GeometryCollection(vec![]));
        assert!(validate_geometry(&empty).is_err());
    }

    #[test]
    fn test_polygon_is_closed_by_geo() {
        // geo closes polygon rings on construction
        let poly = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ]);
        assert!(validate_geometry(&poly).is_ok());
    }

    #[test]
    fn test_invalid_geometry_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.geojson");
        let geom = Geometry::Point(point!(x: f64::INFINITY, y: 0.0));

        assert!(quick_vector(&geom, &Srs::wgs84(), Some(&path)).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gpkg");
        let geom = Geometry::Point(point!(x: 0.0, y: 0.0));

        let err = quick_vector(&geom, &Srs::wgs84(), Some(&path)).unwrap_err();
        assert!(matches!(err, GeokitError::Vector { .. }));
    }

    #[test]
    fn test_shapefile_point_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("point.shp");
        let geom = Geometry::Point(point!(x: 6.5, y: 50.2));

        let source = quick_vector(&geom, &Srs::wgs84(), Some(&path)).unwrap();
        assert!(source.is_persisted());
        assert!(path.with_extension("shx").exists());
        assert!(path.with_extension("dbf").exists());

        let mut reader = shapefile::Reader::from_path(&path).unwrap();
        let shapes = reader.read().unwrap();
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            (shapefile::Shape::Point(p), record) => {
                assert_eq!((p.x, p.y), (6.5, 50.2));
                assert_eq!(record.get(ID_FIELD), Some(&FieldValue::Numeric(Some(1.0))));
            }
            (other, _) => panic!("expected a point, got {:?}", other.shapetype()),
        }

        // Never overwrite
        assert!(quick_vector(&geom, &Srs::wgs84(), Some(&path)).is_err());
    }

    #[test]
    fn test_shapefile_polygon_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.shp");
        let geom = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ]);

        quick_vector(&geom, &Srs::wgs84(), Some(&path)).unwrap();

        let mut reader = shapefile::Reader::from_path(&path).unwrap();
        let shapes = reader.read().unwrap();
        match &shapes[0].0 {
            shapefile::Shape::Polygon(poly) => {
                assert_eq!(poly.rings().len(), 1);
                assert_eq!(poly.rings()[0].points().len(), 5);
            }
            other => panic!("expected a polygon, got {:?}", other.shapetype()),
        }
    }

    #[test]
    fn test_shapefile_rejects_collections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.shp");
        let geom = Geometry::GeometryCollection(geo::GeometryCollection(vec![Geometry::Point(
            point!(x: 0.0, y: 0.0),
        )]));

        assert!(quick_vector(&geom, &Srs::wgs84(), Some(&path)).is_err());
        assert!(!path.exists());
    }
}
