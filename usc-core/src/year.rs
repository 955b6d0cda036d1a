use crate::error::{ClimateError, Result};
use serde::{Deserialize, Serialize};

/// First year with observed raw data.
pub const FIRST_OBSERVED_YEAR: i32 = 2013;

/// Last year with observed raw data.
pub const LAST_OBSERVED_YEAR: i32 = 2017;

/// Year extrapolated from the observed trend in the complete dashboard.
pub const SYNTHETIC_YEAR: i32 = 2018;

/// An inclusive range of selectable years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl YearRange {
    pub const fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    /// Years with raw observations (2013-2017).
    pub const fn observed() -> Self {
        Self::new(FIRST_OBSERVED_YEAR, LAST_OBSERVED_YEAR)
    }

    /// Observed years extended to cover an optional synthetic year.
    pub fn with_synthetic(synthetic_year: Option<i32>) -> Self {
        let observed = Self::observed();
        match synthetic_year {
            Some(year) => Self::new(observed.first.min(year), observed.last.max(year)),
            None => observed,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }

    /// Returns the year unchanged if it is in range.
    pub fn check(&self, year: i32) -> Result<i32> {
        if self.contains(year) {
            Ok(year)
        } else {
            Err(ClimateError::YearOutOfRange {
                year,
                min: self.first,
                max: self.last,
            })
        }
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.first..=self.last
    }

    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::observed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_range_covers_five_years() {
        let range = YearRange::observed();
        assert_eq!(range.len(), 5);
        assert_eq!(range.years().collect::<Vec<_>>(), vec![2013, 2014, 2015, 2016, 2017]);
    }

    #[test]
    fn synthetic_year_extends_range() {
        let range = YearRange::with_synthetic(Some(SYNTHETIC_YEAR));
        assert_eq!(range, YearRange::new(2013, 2018));
        assert_eq!(YearRange::with_synthetic(None), YearRange::observed());
    }

    #[test]
    fn check_rejects_out_of_range() {
        let range = YearRange::with_synthetic(Some(SYNTHETIC_YEAR));
        assert_eq!(range.check(2018).unwrap(), 2018);
        match range.check(2019) {
            Err(ClimateError::YearOutOfRange { year, min, max }) => {
                assert_eq!((year, min, max), (2019, 2013, 2018));
            }
            other => panic!("expected YearOutOfRange, got {:?}", other),
        }
        assert!(range.check(2012).is_err());
    }
}
