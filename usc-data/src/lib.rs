//! Numeric processing for state climate metrics.
//!
//! This crate holds the arithmetic behind the dashboard: fitting a trend line
//! to extrapolate a year, comparing two years, and sizing color scales.
//! Missing values are `None` throughout and never become zero.

/// Ordinary least-squares line fitting for trend extrapolation.
pub mod regression {
    /// A fitted line `y = slope * x + intercept`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct LinearFit {
        pub slope: f64,
        pub intercept: f64,
    }

    impl LinearFit {
        pub fn predict(&self, x: f64) -> f64 {
            self.slope * x + self.intercept
        }
    }

    /// Fit a first-degree polynomial to `(x, y)` points by least squares.
    ///
    /// Returns `None` with fewer than two points or when every point shares
    /// the same x. The sums are taken around the means, which keeps the fit
    /// exact for year-sized x values.
    pub fn least_squares(points: &[(f64, f64)]) -> Option<LinearFit> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, y) in points {
            let dx = x - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        Some(LinearFit {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    /// Fit the known `(year, value)` pairs and evaluate the line at `target_year`.
    ///
    /// Missing and non-finite values are left out of the fit.
    pub fn extrapolate(series: &[(i32, Option<f64>)], target_year: i32) -> Option<f64> {
        let points: Vec<(f64, f64)> = series
            .iter()
            .filter_map(|(year, value)| match value {
                Some(v) if v.is_finite() => Some((*year as f64, *v)),
                _ => None,
            })
            .collect();
        least_squares(&points).map(|fit| fit.predict(target_year as f64))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn series(values: &[f64]) -> Vec<(i32, Option<f64>)> {
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (2013 + i as i32, Some(*v)))
                .collect()
        }

        #[test]
        fn test_linear_series_over_years() {
            let points: Vec<(f64, f64)> = [10.0, 12.0, 14.0, 16.0, 18.0]
                .iter()
                .enumerate()
                .map(|(i, v)| ((2013 + i) as f64, *v))
                .collect();
            let fit = least_squares(&points).unwrap();
            assert_eq!(fit.slope, 2.0);
            assert_eq!(fit.intercept, -4016.0);
            assert_eq!(fit.predict(2018.0), 20.0);
        }

        #[test]
        fn test_linear_series_over_indices() {
            let points: Vec<(f64, f64)> = [10.0, 12.0, 14.0, 16.0, 18.0]
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect();
            let fit = least_squares(&points).unwrap();
            assert!((fit.slope - 2.0).abs() < 1e-12);
            assert!((fit.intercept - 10.0).abs() < 1e-12);
        }

        #[test]
        fn test_noisy_series_matches_closed_form() {
            // x = 0..4, y = [1, 3, 2, 5, 4]: slope 0.8, intercept 1.4
            let points = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0), (3.0, 5.0), (4.0, 4.0)];
            let fit = least_squares(&points).unwrap();
            assert!((fit.slope - 0.8).abs() < 1e-12);
            assert!((fit.intercept - 1.4).abs() < 1e-12);
        }

        #[test]
        fn test_extrapolate_to_2018() {
            let value = extrapolate(&series(&[10.0, 12.0, 14.0, 16.0, 18.0]), 2018).unwrap();
            assert_eq!(value, 20.0);
        }

        #[test]
        fn test_extrapolate_skips_missing_years() {
            let mut data = series(&[10.0, 12.0, 14.0, 16.0, 18.0]);
            data[2].1 = None;
            data[4].1 = Some(f64::NAN);
            let value = extrapolate(&data, 2018).unwrap();
            assert!((value - 20.0).abs() < 1e-9);
        }

        #[test]
        fn test_too_few_points() {
            assert!(extrapolate(&[(2013, Some(4.0))], 2018).is_none());
            assert!(extrapolate(&[(2013, None), (2014, None)], 2018).is_none());
            assert!(least_squares(&[(2013.0, 1.0), (2013.0, 2.0)]).is_none());
        }
    }
}

/// Year-over-year comparison of metric values.
pub mod comparison {
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;

    /// How the right-year value is compared against the left-year value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ComparisonMode {
        /// `right - left`
        Absolute,
        /// `(right - left) / left * 100`
        #[default]
        Percent,
    }

    impl ComparisonMode {
        /// Compare one pair of values.
        ///
        /// Returns `None` when either side is missing, when the left value is
        /// zero in percent mode, or when the result is not finite.
        pub fn apply(&self, left: Option<f64>, right: Option<f64>) -> Option<f64> {
            let (left, right) = (left?, right?);
            let value = match self {
                ComparisonMode::Absolute => right - left,
                ComparisonMode::Percent => {
                    if left.abs() < f64::EPSILON {
                        return None;
                    }
                    (right - left) / left * 100.0
                }
            };
            value.is_finite().then_some(value)
        }

        /// Compare two index-aligned columns element by element.
        pub fn compare_columns(&self, left: &[Option<f64>], right: &[Option<f64>]) -> Vec<Option<f64>> {
            debug_assert_eq!(left.len(), right.len());
            left.iter()
                .zip(right)
                .map(|(l, r)| self.apply(*l, *r))
                .collect()
        }

        pub fn label(&self) -> &'static str {
            match self {
                ComparisonMode::Absolute => "Difference",
                ComparisonMode::Percent => "% Change",
            }
        }

        /// Units shown for a comparison column of a metric measured in `metric_units`.
        pub fn units<'a>(&self, metric_units: &'a str) -> &'a str {
            match self {
                ComparisonMode::Absolute => metric_units,
                ComparisonMode::Percent => "%",
            }
        }
    }

    impl fmt::Display for ComparisonMode {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                ComparisonMode::Absolute => f.write_str("absolute"),
                ComparisonMode::Percent => f.write_str("percent"),
            }
        }
    }

    impl FromStr for ComparisonMode {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_lowercase().as_str() {
                "absolute" | "abs" | "difference" => Ok(ComparisonMode::Absolute),
                "percent" | "pct" | "%" => Ok(ComparisonMode::Percent),
                other => Err(format!("unknown comparison mode: {}", other)),
            }
        }
    }

}

/// Color scale domains for choropleth panels.
pub mod scale {
    /// Minimum and maximum of the present values.
    pub fn extent(values: &[Option<f64>]) -> Option<(f64, f64)> {
        values
            .iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// A domain centred on zero that covers every present value.
    ///
    /// Diverging palettes need zero in the middle so that "no change" always
    /// gets the neutral color. An all-zero column maps to `(-1, 1)`.
    pub fn symmetric_extent(values: &[Option<f64>]) -> Option<(f64, f64)> {
        let (lo, hi) = extent(values)?;
        let bound = lo.abs().max(hi.abs());
        if bound == 0.0 {
            Some((-1.0, 1.0))
        } else {
            Some((-bound, bound))
        }
    }

}
