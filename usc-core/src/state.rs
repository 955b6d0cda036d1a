use crate::error::{ClimateError, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// States that are never drawn, whatever the configuration says.
pub const ALWAYS_EXCLUDED: [&str; 1] = ["DC"];

/// A (longitude, latitude) pair.
pub type LonLat = (f64, f64);

/// Reference data for one state: its code, display name and outline.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    /// Two-letter postal abbreviation (e.g. "CA")
    pub abbreviation: String,
    pub name: String,
    /// Outline rings; islands and exclaves are separate rings
    pub polygon: Vec<Vec<LonLat>>,
}

/// Shape entry as shipped in the geometry asset. Rings are separated by `null`.
#[derive(Debug, Deserialize)]
struct GeometryEntry {
    name: String,
    lons: Vec<Option<f64>>,
    lats: Vec<Option<f64>>,
}

impl StateRecord {
    /// Longitudes, one vector per ring.
    pub fn lons(&self) -> Vec<Vec<f64>> {
        self.polygon
            .iter()
            .map(|ring| ring.iter().map(|(lon, _)| *lon).collect())
            .collect()
    }

    /// Latitudes, one vector per ring.
    pub fn lats(&self) -> Vec<Vec<f64>> {
        self.polygon
            .iter()
            .map(|ring| ring.iter().map(|(_, lat)| *lat).collect())
            .collect()
    }

    /// Parse the state geometry asset into records ordered by abbreviation.
    ///
    /// Expected JSON shape:
    /// ```text
    /// {"AL": {"name": "Alabama", "lons": [-88.1, -88.0, null, ...], "lats": [30.2, 30.3, null, ...]}}
    /// ```
    /// States listed in `excluded` (case-insensitive) and the District of
    /// Columbia are dropped.
    pub fn parse_geometry_json(json: &str, excluded: &[String]) -> Result<Vec<StateRecord>> {
        let entries: BTreeMap<String, GeometryEntry> = serde_json::from_str(json)?;
        let excluded: BTreeSet<String> = excluded
            .iter()
            .map(|s| s.trim().to_uppercase())
            .chain(ALWAYS_EXCLUDED.iter().map(|s| s.to_string()))
            .collect();

        let mut records = Vec::with_capacity(entries.len());
        for (abbreviation, entry) in entries {
            let abbreviation = abbreviation.trim().to_uppercase();
            if excluded.contains(&abbreviation) {
                continue;
            }
            if entry.lons.len() != entry.lats.len() {
                return Err(ClimateError::InvalidFormat(format!(
                    "geometry for {} has {} longitudes but {} latitudes",
                    abbreviation,
                    entry.lons.len(),
                    entry.lats.len()
                )));
            }
            let polygon = split_rings(&entry.lons, &entry.lats);
            records.push(StateRecord {
                abbreviation,
                name: entry.name,
                polygon,
            });
        }
        // Keys were upper-cased after the map sorted them.
        records.sort_by(|a, b| a.abbreviation.cmp(&b.abbreviation));
        log::info!("geometry: Loaded {} state outlines", records.len());
        Ok(records)
    }
}

fn split_rings(lons: &[Option<f64>], lats: &[Option<f64>]) -> Vec<Vec<LonLat>> {
    let mut rings = Vec::new();
    let mut current = Vec::new();
    for (lon, lat) in lons.iter().zip(lats) {
        match (lon, lat) {
            (Some(lon), Some(lat)) => current.push((*lon, *lat)),
            _ => {
                if !current.is_empty() {
                    rings.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        rings.push(current);
    }
    rings
}

/// Lookup from full state name to two-letter abbreviation (`states.csv`).
#[derive(Debug, Clone, Default)]
pub struct StateNames {
    by_name: HashMap<String, String>,
    abbreviations: BTreeSet<String>,
}

impl StateNames {
    /// Parse `states.csv`: one `Full Name,AB` pair per line, no header.
    ///
    /// Lines that do not have exactly two fields are skipped.
    pub fn parse_states_csv(csv_object: &str) -> Result<StateNames> {
        let mut names = StateNames::default();
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        let mut skipped = 0u32;
        for row in rdr.records() {
            let record = row?;
            if record.len() != 2 {
                skipped += 1;
                continue;
            }
            let name = record.get(0).unwrap_or("").trim();
            let abbreviation = record.get(1).unwrap_or("").trim();
            if name.is_empty() || abbreviation.is_empty() {
                skipped += 1;
                continue;
            }
            names.insert(name, abbreviation);
        }
        log::info!(
            "states: Loaded {} state names, skipped {} malformed lines",
            names.len(),
            skipped
        );
        Ok(names)
    }

    pub fn insert(&mut self, name: &str, abbreviation: &str) {
        self.by_name
            .insert(name.to_string(), abbreviation.to_string());
        self.abbreviations.insert(abbreviation.to_string());
    }

    /// Abbreviation for an exact full state name.
    pub fn abbreviation_for(&self, name: &str) -> Option<&str> {
        self.by_name.get(name.trim()).map(String::as_str)
    }

    pub fn is_known_abbreviation(&self, abbreviation: &str) -> bool {
        self.abbreviations.contains(abbreviation)
    }

    /// Iterate `(name, abbreviation)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_name
            .iter()
            .map(|(name, abbreviation)| (name.as_str(), abbreviation.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOMETRY: &str = r#"{
        "CA": {"name": "California", "lons": [-124.0, -120.0, -114.0], "lats": [42.0, 39.0, 32.5]},
        "AK": {"name": "Alaska", "lons": [-150.0, -140.0, -145.0], "lats": [60.0, 61.0, 70.0]},
        "DC": {"name": "District of Columbia", "lons": [-77.1, -77.0, -76.9], "lats": [38.8, 38.9, 38.8]},
        "AL": {"name": "Alabama", "lons": [-88.0, -85.0, -86.0, null, -88.2, -88.1, -88.3], "lats": [35.0, 35.0, 30.0, null, 30.2, 30.3, 30.1]}
    }"#;

    #[test]
    fn geometry_is_sorted_and_excludes_dc() {
        let states = StateRecord::parse_geometry_json(GEOMETRY, &[]).unwrap();
        let codes: Vec<&str> = states.iter().map(|s| s.abbreviation.as_str()).collect();
        assert_eq!(codes, vec!["AK", "AL", "CA"]);
    }

    #[test]
    fn geometry_honours_configured_exclusions() {
        let states =
            StateRecord::parse_geometry_json(GEOMETRY, &["ak".to_string(), "HI".to_string()]).unwrap();
        let codes: Vec<&str> = states.iter().map(|s| s.abbreviation.as_str()).collect();
        assert_eq!(codes, vec!["AL", "CA"]);
    }

    #[test]
    fn null_separates_rings() {
        let states = StateRecord::parse_geometry_json(GEOMETRY, &[]).unwrap();
        let alabama = states.iter().find(|s| s.abbreviation == "AL").unwrap();
        assert_eq!(alabama.polygon.len(), 2);
        assert_eq!(alabama.lons()[1], vec![-88.2, -88.1, -88.3]);
        assert_eq!(alabama.lats()[0], vec![35.0, 35.0, 30.0]);
    }

    #[test]
    fn mismatched_coordinates_are_rejected() {
        let json = r#"{"CA": {"name": "California", "lons": [-124.0, -120.0], "lats": [42.0]}}"#;
        assert!(matches!(
            StateRecord::parse_geometry_json(json, &[]),
            Err(ClimateError::InvalidFormat(_))
        ));
    }

    #[test]
    fn state_names_skip_malformed_lines() {
        let csv = "\
Alabama,AL
California,CA
Broken line
Too,Many,Fields
";
        let names = StateNames::parse_states_csv(csv).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names.abbreviation_for("California"), Some("CA"));
        assert_eq!(names.abbreviation_for("Country Of Mexico"), None);
        assert!(names.is_known_abbreviation("AL"));
        assert!(!names.is_known_abbreviation("ZZ"));
    }
}
