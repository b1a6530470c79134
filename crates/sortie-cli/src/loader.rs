//! Mission and restricted-zone loading from GeoJSON files.
//!
//! Every mission file can hold several features; features sharing a
//! mission name dissolve into a single flight footprint. Missions come
//! back sorted by name, so the 1-based position in the result is the
//! flight id and stays stable across runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use sortie_core::models::{Footprint, LatLon};

/// A loaded mission: its dissolve name and buffered footprint.
#[derive(Debug, Clone)]
pub struct Mission {
    pub name: String,
    pub footprint: Footprint,
}

/// Load every GeoJSON file in a folder and dissolve features by
/// mission name.
///
/// The dissolve key is the `mission_field` feature property; features
/// without it fall back to the file stem. Features with null or missing
/// geometry are skipped with a warning, and missions left without any
/// usable geometry are dropped before ids are assigned. An empty folder
/// yields an empty mission list.
pub fn load_missions(dir: &Path, mission_field: &str, buffer_m: f64) -> Result<Vec<Mission>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read mission folder {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_geojson(path))
        .collect();
    paths.sort();

    let mut groups: BTreeMap<String, Footprint> = BTreeMap::new();

    for path in &paths {
        let root = read_geojson(path)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mission")
            .to_string();

        for feature in raw_features(&root) {
            let Some(geometry) = feature.geometry else {
                tracing::warn!("Skipping feature without geometry in {}", path.display());
                continue;
            };
            let name = feature
                .properties
                .and_then(|props| props.get(mission_field))
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| stem.clone());

            let footprint = groups
                .entry(name)
                .or_insert_with(|| Footprint::new(buffer_m));
            push_geometry(footprint, geometry);
        }
    }

    // BTreeMap iteration gives the name-sorted order the ids rely on
    let mut missions = Vec::new();
    for (name, footprint) in groups {
        if footprint.is_empty() {
            tracing::warn!("Mission {} has no usable geometry, dropping it", name);
            continue;
        }
        missions.push(Mission { name, footprint });
    }
    Ok(missions)
}

/// Load the restricted zone: every usable feature in the file merges
/// into one buffered footprint.
pub fn load_zone(path: &Path, buffer_m: f64) -> Result<Footprint> {
    let root = read_geojson(path)?;
    let mut zone = Footprint::new(buffer_m);

    for feature in raw_features(&root) {
        let Some(geometry) = feature.geometry else {
            tracing::warn!("Skipping feature without geometry in {}", path.display());
            continue;
        };
        push_geometry(&mut zone, geometry);
    }

    if zone.is_empty() {
        anyhow::bail!("No usable zone geometry in {}", path.display());
    }
    Ok(zone)
}

fn is_geojson(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("geojson" | "json")
    )
}

fn read_geojson(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

struct RawFeature<'a> {
    geometry: Option<&'a Value>,
    properties: Option<&'a Value>,
}

/// Flatten a GeoJSON document into its features. Accepts a
/// FeatureCollection, a single Feature, or a bare geometry.
fn raw_features(root: &Value) -> Vec<RawFeature<'_>> {
    match root.get("type").and_then(|v| v.as_str()) {
        Some("FeatureCollection") => root
            .get("features")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().map(raw_feature).collect())
            .unwrap_or_default(),
        Some("Feature") => vec![raw_feature(root)],
        Some(_) => vec![RawFeature {
            geometry: Some(root),
            properties: None,
        }],
        None => Vec::new(),
    }
}

fn raw_feature(feature: &Value) -> RawFeature<'_> {
    RawFeature {
        geometry: feature.get("geometry").filter(|g| !g.is_null()),
        properties: feature.get("properties"),
    }
}

/// Append a GeoJSON geometry to the footprint as parts.
///
/// Polygons contribute their exterior ring only; unknown geometry
/// types are ignored.
fn push_geometry(footprint: &mut Footprint, geometry: &Value) {
    let geom_type = geometry.get("type").and_then(|v| v.as_str()).unwrap_or("");
    let coords = geometry.get("coordinates");

    match geom_type {
        "Point" => {
            if let Some((lon, lat)) = coords.and_then(parse_coord_pair) {
                footprint.push_point(LatLon::new(lat, lon));
            }
        }
        "MultiPoint" => {
            for point in parse_points(coords) {
                footprint.push_point(point);
            }
        }
        "LineString" => footprint.push_path(parse_points(coords)),
        "MultiLineString" => {
            if let Some(lines) = coords.and_then(|v| v.as_array()) {
                for line in lines {
                    footprint.push_path(parse_points(Some(line)));
                }
            }
        }
        "Polygon" => {
            let ring = coords.and_then(|v| v.as_array()).and_then(|arr| arr.first());
            footprint.push_ring(parse_points(ring));
        }
        "MultiPolygon" => {
            if let Some(polygons) = coords.and_then(|v| v.as_array()) {
                for polygon in polygons {
                    let ring = polygon.as_array().and_then(|arr| arr.first());
                    footprint.push_ring(parse_points(ring));
                }
            }
        }
        _ => {}
    }
}

fn parse_points(value: Option<&Value>) -> Vec<LatLon> {
    value
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(parse_coord_pair)
                .map(|(lon, lat)| LatLon::new(lat, lon))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_coord_pair(value: &Value) -> Option<(f64, f64)> {
    let arr = value.as_array()?;
    if arr.len() < 2 {
        return None;
    }
    let lon = arr[0].as_f64()?;
    let lat = arr[1].as_f64()?;
    if !lon.is_finite() || !lat.is_finite() {
        return None;
    }
    Some((lon, lat))
}
