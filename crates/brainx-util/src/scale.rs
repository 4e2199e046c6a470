//! # Rescaling and Normalization
//!
//! Elementwise linear maps over arrays of any dimension.
//!
//! [`NormalizeMode`] is a closed set. Mode names coming from configuration
//! or user input go through [`NormalizeMode::from_str`], which fails on
//! anything it does not recognise.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array, ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};

use brainx_core::{BrainxError, Result};

// ---------------------------------------------------------------------------
// rescale
// ---------------------------------------------------------------------------

/// Linearly map `arr` so that its minimum becomes `new_min` and its
/// maximum becomes `new_max`.
///
/// # Errors
///
/// [`BrainxError::PreconditionViolation`] when `arr` is empty, contains
/// NaN, or is constant (its range is zero and the map is undefined).
pub fn rescale<S, D>(arr: &ArrayBase<S, D>, new_min: f64, new_max: f64) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (lo, hi) = value_range(arr)?;
    let span = hi - lo;
    if span == 0.0 {
        return Err(BrainxError::PreconditionViolation(format!(
            "cannot rescale a constant array (all values are {lo})"
        )));
    }

    let slope = (new_max - new_min) / span;
    Ok(arr.mapv(|v| {
        // Pin the extremes so they land exactly on the requested bounds.
        if v == lo {
            new_min
        } else if v == hi {
            new_max
        } else {
            new_min + (v - lo) * slope
        }
    }))
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

/// How [`normalize`] maps values into `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizeMode {
    /// Rescale the array's own range onto `[0, 1]`.
    #[default]
    Direct,
    /// Fold a caller-given `(low, high)` range about its centre: the centre
    /// maps to 1, both edges (and anything beyond) to 0.
    Folding,
}

impl NormalizeMode {
    /// The lowercase name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Folding => "folding",
        }
    }
}

impl fmt::Display for NormalizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizeMode {
    type Err = BrainxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "direct" => Ok(Self::Direct),
            "folding" => Ok(Self::Folding),
            other => Err(BrainxError::InvalidRangeArgument(format!(
                "unknown normalize mode {other:?}; valid options are \"direct\" and \"folding\""
            ))),
        }
    }
}

/// Normalize `arr` into `[0, 1]` according to `mode`.
///
/// `range` is the folding range and is required for
/// [`NormalizeMode::Folding`]; [`NormalizeMode::Direct`] ignores it.
///
/// # Errors
///
/// - [`BrainxError::InvalidRangeArgument`] when folding without a range or
///   with `low >= high`.
/// - Any error of [`rescale`] in direct mode.
pub fn normalize<S, D>(
    arr: &ArrayBase<S, D>,
    mode: NormalizeMode,
    range: Option<(f64, f64)>,
) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    match mode {
        NormalizeMode::Direct => rescale(arr, 0.0, 1.0),
        NormalizeMode::Folding => {
            let (low, high) = range.ok_or_else(|| {
                BrainxError::InvalidRangeArgument(
                    "folding mode requires a (low, high) range".into(),
                )
            })?;
            if low.is_nan() || high.is_nan() || low >= high {
                return Err(BrainxError::InvalidRangeArgument(format!(
                    "folding range must satisfy low < high, got ({low}, {high})"
                )));
            }
            let centre = 0.5 * (low + high);
            let half_width = 0.5 * (high - low);
            Ok(arr.mapv(|v| (1.0 - (v - centre).abs() / half_width).clamp(0.0, 1.0)))
        }
    }
}

fn value_range<S, D>(arr: &ArrayBase<S, D>) -> Result<(f64, f64)>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if arr.iter().any(|v| v.is_nan()) {
        return Err(BrainxError::PreconditionViolation(
            "cannot rescale an array containing NaN".into(),
        ));
    }
    arr.iter()
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
        .ok_or_else(|| BrainxError::PreconditionViolation("cannot rescale an empty array".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    fn arange(n: usize) -> Array1<f64> {
        Array1::from_iter((0..n).map(|v| v as f64))
    }

    #[test]
    fn rescale_hits_requested_bounds() {
        let scaled = rescale(&arange(5), 3.0, 6.0).unwrap();
        assert_eq!(scaled.fold(f64::INFINITY, |a, &b| a.min(b)), 3.0);
        assert_eq!(scaled.fold(f64::NEG_INFINITY, |a, &b| a.max(b)), 6.0);

        let scaled = rescale(&arange(5), -10.0, 10.0).unwrap();
        assert_eq!(scaled, array![-10.0, -5.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn rescale_keeps_dimension() {
        let m = array![[1.0, 2.0], [3.0, 5.0]];
        let scaled = rescale(&m, 0.0, 4.0).unwrap();
        assert_eq!(scaled, array![[0.0, 1.0], [2.0, 4.0]]);
    }

    #[test]
    fn rescale_rejects_degenerate_input() {
        let constant = Array1::from_elem(4, 2.0);
        assert!(matches!(
            rescale(&constant, 0.0, 1.0),
            Err(BrainxError::PreconditionViolation(_))
        ));
        let empty = Array1::<f64>::zeros(0);
        assert!(rescale(&empty, 0.0, 1.0).is_err());
        assert!(rescale(&array![f64::NAN, 1.0, 2.0], 0.0, 1.0).is_err());
        assert!(rescale(&array![1.0, f64::NAN], 0.0, 1.0).is_err());
    }

    #[test]
    fn direct_normalize_spans_unit_interval() {
        let result = normalize(&arange(5), NormalizeMode::default(), None).unwrap();
        assert_eq!(result, array![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn folding_peaks_at_centre() {
        let result = normalize(&arange(5), NormalizeMode::Folding, Some((0.0, 4.0))).unwrap();
        assert_eq!(result, array![0.0, 0.5, 1.0, 0.5, 0.0]);
        let outside =
            normalize(&array![-3.0, 9.0], NormalizeMode::Folding, Some((0.0, 4.0))).unwrap();
        assert_eq!(outside, array![0.0, 0.0]);
    }

    #[test]
    fn folding_requires_a_valid_range() {
        for range in [None, Some((2.0, 2.0)), Some((3.0, 1.0))] {
            assert!(matches!(
                normalize(&arange(5), NormalizeMode::Folding, range),
                Err(BrainxError::InvalidRangeArgument(_))
            ));
        }
    }

    #[test]
    fn unknown_mode_name_is_rejected() {
        let err = "blueberry".parse::<NormalizeMode>().unwrap_err();
        assert!(matches!(
            err,
            BrainxError::InvalidRangeArgument(ref msg) if msg.contains("blueberry")
        ));
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in [NormalizeMode::Direct, NormalizeMode::Folding] {
            assert_eq!(mode.to_string().parse::<NormalizeMode>().unwrap(), mode);
        }
        let parsed: NormalizeMode = serde_yaml::from_str("folding").unwrap();
        assert_eq!(parsed, NormalizeMode::Folding);
    }
}
