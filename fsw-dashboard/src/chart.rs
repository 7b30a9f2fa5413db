use chrono::NaiveDate;
use fsw_data::standardize::DerivedFrame;
use fsw_fred::series::SeriesDescriptor;
use serde::Serialize;

/// One plotted point of the standardized line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub z: f64,
}

/// A horizontal reference line spanning the plotted date range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideLine {
    pub y: f64,
}

/// Everything a renderer needs to draw one series panel, independent of
/// the widget toolkit doing the drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub trace_name: String,
    pub points: Vec<ChartPoint>,
    pub guides: Vec<GuideLine>,
    pub span: Option<(NaiveDate, NaiveDate)>,
}

impl ChartSpec {
    /// First and last derived date, whether or not their z is defined.
    /// This is the range the guides and the x axis cover.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.span
    }
}

/// Build the chart description for one series.
///
/// Rows with an undefined z-score are left out of the line rather than
/// plotted as zero, but the span still covers every derived row, so
/// the guides reach dates whose signal is undefined. The two guide
/// lines sit at plus and minus the active threshold. Pure function of
/// its inputs.
pub fn render(
    descriptor: &SeriesDescriptor,
    frame: &DerivedFrame,
    threshold: f64,
) -> ChartSpec {
    let points = frame
        .points()
        .iter()
        .filter_map(|point| point.z.map(|z| ChartPoint {
            date: point.date,
            z,
        }))
        .collect();
    let span = match (frame.points().first(), frame.points().last()) {
        (Some(first), Some(last)) => Some((first.date, last.date)),
        _ => None,
    };
    ChartSpec {
        title: format!(
            "Standardized First Difference of {}",
            descriptor.display_name
        ),
        x_label: "Date".to_string(),
        y_label: "Standardized Value (Z-Score)".to_string(),
        trace_name: format!("{} Z-Score", descriptor.display_name),
        points,
        guides: vec![GuideLine { y: threshold }, GuideLine { y: -threshold }],
        span,
    }
}

#[cfg(test)]
mod test {
    use super::render;
    use chrono::NaiveDate;
    use fsw_data::standardize::standardize;
    use fsw_fred::observation::Observation;
    use fsw_fred::series::SeriesDescriptor;

    fn descriptor() -> SeriesDescriptor {
        SeriesDescriptor {
            series_id: "NASDAQ100".to_string(),
            display_name: "NASDAQ 100 Index".to_string(),
            default_threshold: 2.5,
        }
    }

    fn observations() -> Vec<Observation> {
        [10.0, 11.0, 13.0, 16.0, 20.0]
            .iter()
            .enumerate()
            .map(|(i, v)| Observation {
                date: NaiveDate::from_ymd_opt(2024, 3, 1 + i as u32).unwrap(),
                value: Some(*v),
            })
            .collect()
    }

    #[test]
    fn test_render_labels_and_guides() {
        let frame = standardize(&observations());
        let spec = render(&descriptor(), &frame, 1.3);
        assert_eq!(spec.title, "Standardized First Difference of NASDAQ 100 Index");
        assert_eq!(spec.x_label, "Date");
        assert_eq!(spec.y_label, "Standardized Value (Z-Score)");
        assert_eq!(spec.trace_name, "NASDAQ 100 Index Z-Score");
        assert_eq!(spec.guides.len(), 2);
        assert_eq!(spec.guides[0].y, 1.3);
        assert_eq!(spec.guides[1].y, -1.3);
    }

    #[test]
    fn test_render_skips_undefined_rows() {
        let mut obs = observations();
        obs[2].value = None;
        // Two diffs touch the hole, so two of four rows have no z.
        let frame = standardize(&obs);
        let spec = render(&descriptor(), &frame, 1.0);
        assert_eq!(spec.points.len(), 2);
        assert!(spec.points.iter().all(|p| p.z.is_finite()));
    }

    #[test]
    fn test_span_covers_trailing_undefined_rows() {
        let mut obs = observations();
        obs[4].value = None;
        let frame = standardize(&obs);
        let spec = render(&descriptor(), &frame, 1.0);

        // The line stops at the last defined row, but the guides and
        // axis still reach the newest derived date.
        assert_eq!(
            spec.points.last().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        assert_eq!(
            spec.date_range(),
            Some((
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
            ))
        );
    }

    #[test]
    fn test_render_empty_frame() {
        let frame = standardize(&[]);
        let spec = render(&descriptor(), &frame, 1.0);
        assert!(spec.points.is_empty());
        assert_eq!(spec.date_range(), None);
        assert_eq!(spec.guides.len(), 2);
    }

    #[test]
    fn test_render_is_deterministic() {
        let frame = standardize(&observations());
        assert_eq!(
            render(&descriptor(), &frame, 2.5),
            render(&descriptor(), &frame, 2.5)
        );
    }
}
