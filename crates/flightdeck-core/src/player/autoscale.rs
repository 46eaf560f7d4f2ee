//! Per-axis autoscaling

use serde::{Deserialize, Serialize};

/// Autoscaling only applies when the window holds more samples than this
pub const MIN_WINDOW_SAMPLES: usize = 5;

/// Visible range of one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn len(&self) -> f64 {
        self.max - self.min
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Fit an axis to the observed `[min, max]`.
///
/// A span narrower than `min_range` is widened to exactly `min_range` around
/// its midpoint; anything wider is padded by `pad_fraction` of the span on
/// both ends.
pub fn fit_range(min: f64, max: f64, min_range: f64, pad_fraction: f64) -> AxisRange {
    let span = max - min;
    if span < min_range {
        let mid = (min + max) / 2.0;
        AxisRange::new(mid - min_range / 2.0, mid + min_range / 2.0)
    } else {
        let pad = pad_fraction * span;
        AxisRange::new(min - pad, max + pad)
    }
}

/// Min and max over the finite values of several series
pub fn window_extent<'a, I>(series: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut extent: Option<(f64, f64)> = None;

    for values in series {
        for &v in values.iter().filter(|v| v.is_finite()) {
            extent = Some(match extent {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
    }

    extent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_span_forced_to_min_range() {
        let range = fit_range(100.0, 104.0, 50.0, 0.2);
        assert_eq!(range.len(), 50.0);
        assert_eq!(range.center(), 102.0);
    }

    #[test]
    fn test_wide_span_padded() {
        let range = fit_range(0.0, 100.0, 50.0, 0.2);
        assert_eq!(range, AxisRange::new(-20.0, 120.0));
        assert!((range.len() - (100.0 + 2.0 * 0.2 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_span_equal_to_min_range_is_padded() {
        let range = fit_range(0.0, 10.0, 10.0, 0.15);
        assert!((range.len() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_series_gets_min_range() {
        let range = fit_range(7.0, 7.0, 10.0, 0.15);
        assert_eq!(range, AxisRange::new(2.0, 12.0));
    }

    #[test]
    fn test_extent_skips_non_finite() {
        let a = [1.0, f64::NAN, 5.0];
        let b = [-2.0, f64::INFINITY];
        assert_eq!(window_extent([&a[..], &b[..]]), Some((-2.0, 5.0)));
    }

    #[test]
    fn test_extent_of_nothing() {
        let empty: [&[f64]; 0] = [];
        assert!(window_extent(empty).is_none());
        assert!(window_extent([&[f64::NAN][..]]).is_none());
    }
}
