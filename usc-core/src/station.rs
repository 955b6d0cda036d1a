use crate::state::StateNames;
use std::collections::HashMap;

/// Maps GHCN station identifiers to the state they report from.
///
/// Built from `ghcnd-stations.txt`. Only stations located in a known state
/// are kept; everything else (foreign stations, territories, stations with a
/// blank state column) is dropped while parsing.
#[derive(Debug, Clone, Default)]
pub struct StationTable {
    stations: HashMap<String, String>,
}

impl StationTable {
    /// Parse the GHCN station inventory.
    ///
    /// Each line is whitespace separated: `ID LATITUDE LONGITUDE ELEVATION STATE NAME...`.
    /// The state is the first token after the elevation. Lines whose state
    /// token is not exactly two characters, or not one of `states`'
    /// abbreviations, are skipped.
    pub fn parse_station_inventory(text: &str, states: &StateNames) -> StationTable {
        let mut table = StationTable::default();
        let mut skipped = 0u32;
        for line in text.lines() {
            let mut tokens = line.split_whitespace();
            let station = tokens.next();
            // latitude, longitude, elevation
            let coordinates = tokens.by_ref().take(3).count();
            let state = tokens.next();
            let (Some(station), Some(state)) = (station, state) else {
                skipped += 1;
                continue;
            };
            if coordinates != 3 || state.chars().count() != 2 {
                skipped += 1;
                continue;
            }
            let state = state.to_uppercase();
            if !states.is_known_abbreviation(&state) {
                skipped += 1;
                continue;
            }
            table.insert(station, &state);
        }
        log::info!(
            "stations: Loaded {} stations, skipped {} outside known states",
            table.stations.len(),
            skipped
        );
        table
    }

    pub fn insert(&mut self, station_id: &str, state: &str) {
        self.stations
            .insert(station_id.to_string(), state.to_string());
    }

    pub fn state_of(&self, station_id: &str) -> Option<&str> {
        self.stations.get(station_id).map(String::as_str)
    }

    /// Iterate `(station_id, state)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stations
            .iter()
            .map(|(station, state)| (station.as_str(), state.as_str()))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> StateNames {
        StateNames::parse_states_csv("Alabama,AL\nCalifornia,CA\n").unwrap()
    }

    #[test]
    fn keeps_only_stations_in_known_states() {
        let inventory = "\
US1ALAT0001  32.4900  -86.4500   52.4 AL PRATTVILLE 1.6 NW
USC00040693  37.8744 -122.2606   94.5 CA BERKELEY                           HCN 04521
ACW00011604  17.1167  -61.7833   10.1    ST JOHNS COOLIDGE FLD
CA001011500  48.9333 -123.7500   75.0 BC CHEMAINUS
AQC00914000 -14.3167 -170.7667  408.4 AS AASUFOU
";
        let table = StationTable::parse_station_inventory(inventory, &states());
        assert_eq!(table.len(), 2);
        assert_eq!(table.state_of("US1ALAT0001"), Some("AL"));
        assert_eq!(table.state_of("USC00040693"), Some("CA"));
        assert_eq!(table.state_of("CA001011500"), None);
        assert_eq!(table.state_of("ACW00011604"), None);
    }

    #[test]
    fn short_lines_are_skipped() {
        let inventory = "USC00040693  37.8744\n\n";
        let table = StationTable::parse_station_inventory(inventory, &states());
        assert!(table.is_empty());
    }

    #[test]
    fn state_token_must_be_two_characters() {
        let inventory = "USC00099999  37.0 -120.0 10.0 CAL SOMEWHERE\n";
        let table = StationTable::parse_station_inventory(inventory, &states());
        assert!(table.is_empty());
    }
}
