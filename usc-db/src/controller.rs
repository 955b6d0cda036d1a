//! Year and mode selection for the dashboard.
//!
//! [`SelectionController`] is the only writer of the current
//! [`DisplayBuffer`]. Every accepted change recomputes the comparison and
//! swaps in a fresh `Rc`, so anything still holding the previous buffer keeps
//! a complete, consistent snapshot.

use crate::config::DashboardConfig;
use crate::display::{DisplayBuffer, StateShapes};
use crate::Database;
use std::rc::Rc;
use usc_core::{Metric, YearRange};
use usc_data::comparison::ComparisonMode;

#[derive(Clone)]
pub struct SelectionController {
    db: Database,
    shapes: Rc<StateShapes>,
    metrics: Vec<Metric>,
    range: YearRange,
    left_year: i32,
    right_year: i32,
    mode: ComparisonMode,
    buffer: Rc<DisplayBuffer>,
}

impl SelectionController {
    /// Build the controller and its first buffer from the configured
    /// initial years and mode.
    pub fn new(
        db: Database,
        shapes: Rc<StateShapes>,
        config: &DashboardConfig,
    ) -> anyhow::Result<Self> {
        let range = config.year_range();
        let left_year = range.check(config.initial_left)?;
        let right_year = range.check(config.initial_right)?;
        let buffer = db.compare(&shapes, &config.metrics, left_year, right_year, config.mode)?;
        log::info!(
            "controller: {} states, {} metrics, years {}-{}",
            shapes.len(),
            config.metrics.len(),
            range.first,
            range.last
        );
        Ok(Self {
            db,
            shapes,
            metrics: config.metrics.clone(),
            range,
            left_year,
            right_year,
            mode: config.mode,
            buffer: Rc::new(buffer),
        })
    }

    /// The current display buffer.
    pub fn buffer(&self) -> Rc<DisplayBuffer> {
        Rc::clone(&self.buffer)
    }

    pub fn left_year(&self) -> i32 {
        self.left_year
    }

    pub fn right_year(&self) -> i32 {
        self.right_year
    }

    pub fn mode(&self) -> ComparisonMode {
        self.mode
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    pub fn select_left(&mut self, year: i32) -> anyhow::Result<Rc<DisplayBuffer>> {
        self.select(year, self.right_year)
    }

    pub fn select_right(&mut self, year: i32) -> anyhow::Result<Rc<DisplayBuffer>> {
        self.select(self.left_year, year)
    }

    /// Select both years at once. On error nothing changes.
    pub fn select(&mut self, left_year: i32, right_year: i32) -> anyhow::Result<Rc<DisplayBuffer>> {
        self.range.check(left_year)?;
        self.range.check(right_year)?;
        self.recompute(left_year, right_year, self.mode)
    }

    pub fn set_mode(&mut self, mode: ComparisonMode) -> anyhow::Result<Rc<DisplayBuffer>> {
        self.recompute(self.left_year, self.right_year, mode)
    }

    fn recompute(
        &mut self,
        left_year: i32,
        right_year: i32,
        mode: ComparisonMode,
    ) -> anyhow::Result<Rc<DisplayBuffer>> {
        let buffer = self
            .db
            .compare(&self.shapes, &self.metrics, left_year, right_year, mode)?;
        log::debug!(
            "controller: recomputed {} vs {} ({})",
            left_year,
            right_year,
            mode
        );
        self.left_year = left_year;
        self.right_year = right_year;
        self.mode = mode;
        self.buffer = Rc::new(buffer);
        Ok(self.buffer())
    }
}

impl Database {
    /// Load every year's processed summary into the combined table, then
    /// append the synthetic year if one is given.
    ///
    /// Empty sources (an embedded placeholder for a year that was never
    /// preprocessed) are skipped with a warning. Returns the total number of
    /// rows in the table.
    pub fn load_combined_table<'a, I>(
        &self,
        sources: I,
        synthetic_year: Option<i32>,
    ) -> anyhow::Result<usize>
    where
        I: IntoIterator<Item = (i32, &'a str)>,
    {
        let mut total = 0usize;
        for (year, csv_data) in sources {
            if csv_data.trim().is_empty() {
                log::warn!("combined table: no data for {}", year);
                continue;
            }
            total += self.load_processed_year(year, csv_data)?;
        }
        if let Some(year) = synthetic_year {
            total += self.append_synthetic_year(year)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{shapes, table};
    use usc_core::ClimateError;

    fn controller() -> SelectionController {
        SelectionController::new(table(), shapes(), &DashboardConfig::default()).unwrap()
    }

    fn assert_out_of_range(err: anyhow::Error, expected: i32) {
        match err.downcast_ref::<ClimateError>() {
            Some(ClimateError::YearOutOfRange { year, min, max }) => {
                assert_eq!(*year, expected);
                assert_eq!((*min, *max), (2013, 2018));
            }
            other => panic!("expected YearOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn starts_with_configured_years() {
        let controller = controller();
        assert_eq!(controller.left_year(), 2013);
        assert_eq!(controller.right_year(), 2014);
        assert_eq!(controller.mode(), ComparisonMode::Percent);
        let buffer = controller.buffer();
        assert_eq!((buffer.left_year, buffer.right_year), (2013, 2014));
        assert!(buffer.is_aligned());
    }

    #[test]
    fn selection_replaces_the_buffer() {
        let mut controller = controller();
        let before = controller.buffer();
        let after = controller.select_right(2017).unwrap();
        assert!(!Rc::ptr_eq(&before, &after));
        assert_eq!(before.right_year, 2014, "old snapshot is untouched");
        assert_eq!(after.right_year, 2017);
        assert!(Rc::ptr_eq(&after, &controller.buffer()));
        assert!(Rc::ptr_eq(&before.shapes, &after.shapes));
    }

    #[test]
    fn out_of_range_year_is_rejected() {
        let mut controller = controller();
        let before = controller.buffer();

        assert_out_of_range(controller.select_left(2012).unwrap_err(), 2012);
        assert_out_of_range(controller.select_right(2019).unwrap_err(), 2019);
        assert_out_of_range(controller.select(2015, 2030).unwrap_err(), 2030);

        assert_eq!(controller.left_year(), 2013);
        assert_eq!(controller.right_year(), 2014);
        assert!(Rc::ptr_eq(&before, &controller.buffer()));
    }

    #[test]
    fn range_follows_the_configured_synthetic_year() {
        assert_eq!(controller().range(), YearRange::new(2013, 2018));
        let original =
            SelectionController::new(table(), shapes(), &DashboardConfig::original()).unwrap();
        assert_eq!(original.range(), YearRange::new(2013, 2017));
    }

    #[test]
    fn synthetic_year_needs_to_be_enabled() {
        let config = DashboardConfig::original();
        let mut controller = SelectionController::new(table(), shapes(), &config).unwrap();
        let err = controller.select_right(2018).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClimateError>(),
            Some(ClimateError::YearOutOfRange { max: 2017, .. })
        ));
    }

    #[test]
    fn invalid_initial_year_fails_construction() {
        let config = DashboardConfig {
            initial_left: 2000,
            ..DashboardConfig::default()
        };
        assert!(SelectionController::new(table(), shapes(), &config).is_err());
    }

    #[test]
    fn same_year_selection_is_allowed() {
        let mut controller = controller();
        let buffer = controller.select(2016, 2016).unwrap();
        let aqi = buffer.columns(Metric::MedianAqi).unwrap();
        assert_eq!(aqi.comparison[..3], [Some(0.0), Some(0.0), Some(0.0)]);
        assert_eq!(aqi.comparison[3], None);
    }

    #[test]
    fn mode_change_recomputes_comparison() {
        let mut controller = controller();
        let percent = controller.buffer();
        let absolute = controller.set_mode(ComparisonMode::Absolute).unwrap();
        assert_eq!(absolute.mode, ComparisonMode::Absolute);
        let cmp = absolute.columns(Metric::MedianAqi).unwrap();
        assert_eq!(cmp.comparison[0], Some(-2.0));
        assert_ne!(
            percent.columns(Metric::MedianAqi).unwrap().comparison[0],
            cmp.comparison[0]
        );
        assert_eq!(controller.left_year(), 2013);
    }

    #[test]
    fn combined_table_skips_empty_sources() {
        let db = Database::new().unwrap();
        let header = "State,Median AQI,prcp,tmax\n";
        let y2013 = format!("{}AL,38.0,4.0,250.0\n", header);
        let y2014 = format!("{}AL,40.0,5.0,252.0\n", header);
        let sources = vec![(2013, y2013.as_str()), (2014, y2014.as_str()), (2015, "")];
        let total = db.load_combined_table(sources, Some(2018)).unwrap();
        assert_eq!(total, 3);
        assert_eq!(db.query_years().unwrap(), vec![2013, 2014, 2018]);
    }
}
