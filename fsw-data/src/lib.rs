//! Signal derivation for monitored series observations.
//!
//! This crate turns raw observation frames into the standardized
//! first-difference signal that alerting and charting run on.

/// First differences and their z-scores.
pub mod standardize {
    use chrono::NaiveDate;
    use fsw_fred::observation::Observation;
    use serde::Serialize;

    /// One derived row: the first difference landing on `date` and the
    /// standardized (z-score) form of that difference.
    ///
    /// Either field can be `None`: a difference touching a missing
    /// value is undefined, and z is undefined whenever the difference
    /// is, or when the spread of the whole series is degenerate.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct DerivedPoint {
        pub date: NaiveDate,
        pub diff: Option<f64>,
        pub z: Option<f64>,
    }

    /// The standardized series. Always one row shorter than the
    /// observations it came from; empty below two observations.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct DerivedFrame {
        points: Vec<DerivedPoint>,
    }

    impl DerivedFrame {
        pub fn points(&self) -> &[DerivedPoint] {
            &self.points
        }

        pub fn len(&self) -> usize {
            self.points.len()
        }

        pub fn is_empty(&self) -> bool {
            self.points.is_empty()
        }

        /// The most recent row with a defined z-score, if any.
        ///
        /// Trailing undefined rows (publication holes, fresh series) are
        /// skipped; a frame with no defined z at all yields `None`,
        /// which callers treat as "no signal" rather than zero.
        pub fn latest_signal(&self) -> Option<(NaiveDate, f64)> {
            self.points
                .iter()
                .rev()
                .find_map(|point| point.z.map(|z| (point.date, z)))
        }
    }

    /// Arithmetic mean; `None` for an empty slice.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Sample standard deviation (n - 1 denominator).
    ///
    /// Needs at least two values; a single difference has no spread.
    pub fn sample_std(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let m = mean(values)?;
        let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
        Some((sum_sq / (values.len() - 1) as f64).sqrt())
    }

    /// Derive first differences and z-scores from an ordered frame.
    ///
    /// Differences are positional: row i minus row i-1, dated at row i,
    /// undefined if either side is missing. The mean and spread are
    /// taken over the defined differences only, and every z is
    /// standardized against that one global pair, so the signal is
    /// comparable across the whole history. A constant series (zero
    /// spread) produces no defined z at all.
    pub fn standardize(observations: &[Observation]) -> DerivedFrame {
        if observations.len() < 2 {
            return DerivedFrame::default();
        }

        let diffs: Vec<(NaiveDate, Option<f64>)> = observations
            .windows(2)
            .map(|pair| {
                let diff = match (pair[0].value, pair[1].value) {
                    (Some(prev), Some(curr)) => Some(curr - prev),
                    _ => None,
                };
                (pair[1].date, diff)
            })
            .collect();

        let defined: Vec<f64> = diffs.iter().filter_map(|(_, d)| *d).collect();
        let stats = match (mean(&defined), sample_std(&defined)) {
            (Some(m), Some(s)) if s > 0.0 => Some((m, s)),
            _ => None,
        };

        let points = diffs
            .into_iter()
            .map(|(date, diff)| {
                let z = match (diff, stats) {
                    (Some(d), Some((m, s))) => {
                        let z = (d - m) / s;
                        z.is_finite().then_some(z)
                    }
                    _ => None,
                };
                DerivedPoint { date, diff, z }
            })
            .collect();

        DerivedFrame { points }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        fn obs(day: u32, value: Option<f64>) -> Observation {
            Observation {
                date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                value,
            }
        }

        #[test]
        fn test_sample_std() {
            let std = sample_std(&[1.0, 2.0, 3.0, 4.0]).unwrap();
            assert!((std - 1.2909944487358056).abs() < 1e-12);
            assert_eq!(sample_std(&[1.0]), None);
            assert_eq!(sample_std(&[]), None);
        }

        #[test]
        fn test_standardize_basic() {
            // Values 10, 11, 13, 16, 20 give diffs 1, 2, 3, 4:
            // mean 2.5, sample std sqrt(5/3).
            let observations = vec![
                obs(1, Some(10.0)),
                obs(2, Some(11.0)),
                obs(3, Some(13.0)),
                obs(4, Some(16.0)),
                obs(5, Some(20.0)),
            ];
            let frame = standardize(&observations);
            assert_eq!(frame.len(), 4);
            assert_eq!(frame.points()[0].diff, Some(1.0));
            assert_eq!(
                frame.points()[0].date,
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
            );
            assert_eq!(frame.points()[3].diff, Some(4.0));

            let z_last = frame.points()[3].z.unwrap();
            assert!((z_last - 1.1618950038622251).abs() < 1e-12);
            let z_first = frame.points()[0].z.unwrap();
            assert!((z_first + 1.1618950038622251).abs() < 1e-12);

            let (date, z) = frame.latest_signal().unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
            assert!((z - 1.1618950038622251).abs() < 1e-12);
        }

        #[test]
        fn test_standardize_missing_value_breaks_both_neighbors() {
            let observations = vec![obs(1, Some(10.0)), obs(2, None), obs(3, Some(13.0))];
            let frame = standardize(&observations);
            assert_eq!(frame.len(), 2);
            assert!(frame.points().iter().all(|p| p.diff.is_none()));
            assert!(frame.points().iter().all(|p| p.z.is_none()));
            assert_eq!(frame.latest_signal(), None);
        }

        #[test]
        fn test_standardize_constant_series_has_no_signal() {
            let observations = vec![
                obs(1, Some(5.0)),
                obs(2, Some(5.0)),
                obs(3, Some(5.0)),
                obs(4, Some(5.0)),
            ];
            let frame = standardize(&observations);
            assert_eq!(frame.len(), 3);
            assert!(frame.points().iter().all(|p| p.diff == Some(0.0)));
            assert!(frame.points().iter().all(|p| p.z.is_none()));
            assert_eq!(frame.latest_signal(), None);
        }

        #[test]
        fn test_standardize_below_two_observations_is_empty() {
            assert!(standardize(&[]).is_empty());
            assert!(standardize(&[obs(1, Some(1.0))]).is_empty());
        }

        #[test]
        fn test_standardize_single_diff_has_no_spread() {
            let frame = standardize(&[obs(1, Some(1.0)), obs(2, Some(2.0))]);
            assert_eq!(frame.len(), 1);
            assert_eq!(frame.points()[0].diff, Some(1.0));
            assert_eq!(frame.points()[0].z, None);
        }

        #[test]
        fn test_latest_signal_skips_trailing_holes() {
            let observations = vec![
                obs(1, Some(10.0)),
                obs(2, Some(11.0)),
                obs(3, Some(13.0)),
                obs(4, Some(16.0)),
                obs(5, None),
            ];
            let frame = standardize(&observations);
            let (date, _) = frame.latest_signal().unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        }

        #[test]
        fn test_standardize_is_deterministic() {
            let observations = vec![
                obs(1, Some(10.0)),
                obs(2, Some(11.5)),
                obs(3, None),
                obs(4, Some(16.25)),
                obs(5, Some(20.0)),
            ];
            assert_eq!(standardize(&observations), standardize(&observations));
        }
    }
}
