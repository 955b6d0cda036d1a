//! Small combined table and state outlines shared by the unit tests.

use crate::display::StateShapes;
use crate::Database;
use std::rc::Rc;
use usc_core::StateRecord;

pub const GEOMETRY: &str = r#"{
    "AL": {"name": "Alabama", "lons": [-88.0, -85.0, -86.0], "lats": [35.0, 35.0, 30.0]},
    "CA": {"name": "California", "lons": [-124.0, -120.0, -114.0], "lats": [42.0, 39.0, 32.5]},
    "NV": {"name": "Nevada", "lons": [-120.0, -114.0, -114.5], "lats": [42.0, 42.0, 35.0]},
    "WY": {"name": "Wyoming", "lons": [-111.0, -104.0, -104.0], "lats": [45.0, 45.0, 41.0]}
}"#;

/// AL, CA, NV and WY outlines; WY never has data.
pub fn shapes() -> Rc<StateShapes> {
    let records = StateRecord::parse_geometry_json(GEOMETRY, &[]).unwrap();
    Rc::new(StateShapes::from_records(&records))
}

/// 2013-2017 observed rows plus an extrapolated 2018.
///
/// NV has a zero 2013 precipitation, no 2014 tmax and no 2015 row.
pub fn table() -> Database {
    let db = Database::new().unwrap();
    let years = [
        (2013, "AL,38.0,4.5,250.0\nCA,48.0,2.0,230.0\nNV,40.0,0.0,210.0\n"),
        (2014, "AL,36.0,5.0,255.0\nCA,50.5,1.5,240.0\nNV,42.0,0.5,\n"),
        (2015, "AL,35.0,4.0,245.0\nCA,52.0,1.0,235.0\n"),
        (2016, "AL,37.0,4.8,252.0\nCA,49.0,2.2,238.0\nNV,41.0,0.4,205.0\n"),
        (2017, "AL,34.0,4.6,249.0\nCA,47.0,2.6,242.0\nNV,43.0,0.2,207.0\n"),
    ];
    for (year, rows) in years {
        let csv = format!("State,Median AQI,prcp,tmax\n{}", rows);
        db.load_processed_year(year, &csv).unwrap();
    }
    db.append_synthetic_year(2018).unwrap();
    db
}
