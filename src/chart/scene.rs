use palette::Srgb;

use crate::color::STEELBLUE;
use crate::config::ChartLayout;
use crate::data::aggregate::aggregate_by_hospital;
use crate::data::model::{HospitalAggregate, PriceDataset};

use super::format::{meta_line, money};
use super::scale::{BandScale, LinearScale};
use super::wrap::{wrap_words, TextMeasure};

/// Length of axis tick marks, in pixels.
pub const TICK_SIZE: f32 = 6.0;
/// Gap between a tick mark and its label, in pixels.
pub const TICK_PADDING: f32 = 3.0;
/// Baseline offset of the first wrapped label line, in ems.
pub const LABEL_FIRST_DY: f32 = 0.9;
/// Vertical centring offset for value-axis labels, in ems.
pub const VALUE_LABEL_DY: f32 = 0.32;

// ---------------------------------------------------------------------------
// Scene description
// ---------------------------------------------------------------------------
//
// All coordinates are plot-local: (0, 0) is the top-left corner of the plot
// area, i.e. the canvas origin shifted by the left and top margins.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Segment {
    fn vertical(x: f32, y1: f32, y2: f32) -> Self {
        Self { x1: x, y1, x2: x, y2 }
    }

    fn horizontal(x1: f32, x2: f32, y: f32) -> Self {
        Self { x1, y1: y, x2, y2: y }
    }
}

/// A hospital name broken into lines under its tick.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLabel {
    pub lines: Vec<String>,
    pub font_size: f32,
    /// Line spacing in ems.
    pub line_height: f32,
}

impl WrappedLabel {
    /// Baseline of `line`, measured down from the axis line.
    pub fn baseline(&self, line: usize) -> f32 {
        TICK_SIZE
            + TICK_PADDING
            + (LABEL_FIRST_DY + line as f32 * self.line_height) * self.font_size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTick {
    pub key: String,
    /// Band centre.
    pub x: f32,
    pub label: WrappedLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueTick {
    pub value: f64,
    pub y: f32,
    pub label: String,
}

/// Hospital axis drawn along the bottom of the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BandAxis {
    /// Vertical position of the axis line.
    pub y: f32,
    pub range: (f32, f32),
    pub ticks: Vec<CategoryTick>,
}

/// Price axis drawn along the left edge of the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub range: (f32, f32),
    pub domain: (f64, f64),
    pub ticks: Vec<ValueTick>,
    pub font_size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStyle {
    pub color: Srgb<u8>,
    pub line_width: f32,
    pub cap_width: f32,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            color: STEELBLUE,
            line_width: 5.0,
            cap_width: 4.0,
        }
    }
}

/// One hospital's range: the vertical line plus its two end caps.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeMark {
    /// Hospital name; identifies the mark across renders.
    pub key: String,
    pub aggregate: HospitalAggregate,
    pub line: Segment,
    pub cap_min: Segment,
    pub cap_max: Segment,
}

/// Everything needed to draw the chart for one selected code.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub layout: ChartLayout,
    pub code: String,
    pub meta_line: String,
    pub x_axis: BandAxis,
    pub y_axis: ValueAxis,
    pub marks: Vec<RangeMark>,
    pub style: MarkStyle,
}

impl RenderOutput {
    /// The mark whose range line covers the plot-local point `(x, y)`.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&RangeMark> {
        let half = self.style.line_width / 2.0;
        self.marks.iter().find(|m| {
            let (top, bottom) = if m.line.y1 <= m.line.y2 {
                (m.line.y1, m.line.y2)
            } else {
                (m.line.y2, m.line.y1)
            };
            (x - m.line.x1).abs() <= half && y >= top && y <= bottom
        })
    }

    pub fn aggregates(&self) -> impl Iterator<Item = &HospitalAggregate> {
        self.marks.iter().map(|m| &m.aggregate)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Build the chart for `code`. Pure: the dataset is only read, and the
/// result replaces whatever was drawn for a previous selection.
pub fn render(
    dataset: &PriceDataset,
    code: &str,
    layout: &ChartLayout,
    measure: &dyn TextMeasure,
) -> RenderOutput {
    let aggregates = aggregate_by_hospital(&dataset.rows, code);
    render_aggregates(
        code,
        meta_line(code, dataset.meta(code)),
        aggregates,
        layout,
        measure,
    )
}

fn render_aggregates(
    code: &str,
    meta_line: String,
    aggregates: Vec<HospitalAggregate>,
    layout: &ChartLayout,
    measure: &dyn TextMeasure,
) -> RenderOutput {
    let plot_w = layout.plot_width();
    let plot_h = layout.plot_height();

    let x = BandScale::new(
        aggregates.iter().map(|a| a.hospital.clone()).collect(),
        (0.0, plot_w),
        layout.band_padding,
    );

    let max = aggregates.iter().map(|a| a.med_max).fold(f64::NAN, f64::max);
    let upper = if max.is_nan() || max == 0.0 { 1.0 } else { max };
    let y = LinearScale::new((0.0, upper), (plot_h, 0.0)).nice(10);

    let label_width = layout.max_label_width.min(x.bandwidth());
    let x_ticks = x
        .domain()
        .iter()
        .filter_map(|key| {
            let center = x.center(key)?;
            Some(CategoryTick {
                key: key.clone(),
                x: center,
                label: WrappedLabel {
                    lines: wrap_words(key, label_width, layout.font_size, measure),
                    font_size: layout.font_size,
                    line_height: layout.line_height,
                },
            })
        })
        .collect();

    let y_ticks = y
        .ticks(layout.y_tick_count)
        .into_iter()
        .map(|value| ValueTick {
            value,
            y: y.to_px(value),
            label: money(value),
        })
        .collect();

    let cap_half = x.bandwidth() * 0.5 / 2.0;
    let marks = aggregates
        .into_iter()
        .filter_map(|agg| {
            let cx = x.center(&agg.hospital)?;
            let y_min = y.to_px(agg.med_min);
            let y_max = y.to_px(agg.med_max);
            Some(RangeMark {
                key: agg.hospital.clone(),
                line: Segment::vertical(cx, y_min, y_max),
                cap_min: Segment::horizontal(cx - cap_half, cx + cap_half, y_min),
                cap_max: Segment::horizontal(cx - cap_half, cx + cap_half, y_max),
                aggregate: agg,
            })
        })
        .collect();

    RenderOutput {
        layout: *layout,
        code: code.to_string(),
        meta_line,
        x_axis: BandAxis {
            y: plot_h,
            range: (0.0, plot_w),
            ticks: x_ticks,
        },
        y_axis: ValueAxis {
            range: (plot_h, 0.0),
            domain: y.domain(),
            ticks: y_ticks,
            font_size: layout.font_size,
        },
        marks,
        style: MarkStyle::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::wrap::ApproxMeasure;
    use crate::data::model::{row, Row};

    fn scenario() -> PriceDataset {
        PriceDataset::from_rows(vec![
            Row {
                code_type: "CPT".into(),
                desc: "Brain MRI".into(),
                ..row("X001", "H1", 100.0, 200.0)
            },
            row("X001", "H1", 300.0, 400.0),
            row("X001", "H2", 50.0, 300.0),
            row("X002", "Other Hospital", 10.0, 20.0),
        ])
    }

    fn draw(ds: &PriceDataset, code: &str) -> RenderOutput {
        render(ds, code, &ChartLayout::default(), &ApproxMeasure::default())
    }

    #[test]
    fn marks_follow_aggregate_order() {
        let out = draw(&scenario(), "X001");
        let keys: Vec<&str> = out.marks.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["H1", "H2"]);
        let tick_keys: Vec<&str> = out.x_axis.ticks.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(tick_keys, keys);
        assert_eq!(out.meta_line, "Code: X001   Type: CPT   Description: Brain MRI");
    }

    #[test]
    fn y_domain_starts_at_zero_and_covers_max() {
        let out = draw(&scenario(), "X001");
        assert_eq!(out.y_axis.domain, (0.0, 300.0));
        let labels: Vec<&str> = out.y_axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["$0", "$50", "$100", "$150", "$200", "$250", "$300"]);
        // zero at the bottom of the plot
        assert_eq!(out.y_axis.ticks[0].y, ChartLayout::default().plot_height());
        assert_eq!(out.y_axis.ticks[6].y, 0.0);
    }

    #[test]
    fn range_line_spans_medians_with_caps() {
        let out = draw(&scenario(), "X001");
        let h1 = &out.marks[0];
        let plot_h = ChartLayout::default().plot_height();
        // H1 medians: min 200, max 300 on a [0, 300] domain
        assert!((h1.line.y1 - plot_h / 3.0).abs() < 1e-3);
        assert!(h1.line.y2.abs() < 1e-3);
        assert_eq!(h1.line.x1, h1.line.x2);
        assert_eq!(h1.cap_min.y1, h1.line.y1);
        assert_eq!(h1.cap_max.y1, h1.line.y2);

        let tick = &out.x_axis.ticks[0];
        assert_eq!(tick.x, h1.line.x1);
        let cap_len = h1.cap_min.x2 - h1.cap_min.x1;
        let band = BandScale::new(vec!["H1".into(), "H2".into()], (0.0, 990.0), 0.3);
        assert!((cap_len - band.bandwidth() / 2.0).abs() < 1e-3);
        assert!(((h1.cap_min.x1 + h1.cap_min.x2) / 2.0 - h1.line.x1).abs() < 1e-3);
    }

    #[test]
    fn unknown_code_renders_empty_chart() {
        let out = draw(&scenario(), "NOPE");
        assert!(out.marks.is_empty());
        assert!(out.x_axis.ticks.is_empty());
        assert_eq!(out.y_axis.domain, (0.0, 1.0));
        assert_eq!(out.meta_line, "Code: NOPE   Type: NA   Description: NA");
    }

    #[test]
    fn all_zero_prices_fall_back_to_unit_domain() {
        let ds = PriceDataset::from_rows(vec![row("Z", "H", 0.0, 0.0)]);
        let out = draw(&ds, "Z");
        assert_eq!(out.y_axis.domain, (0.0, 1.0));
        assert_eq!(out.marks.len(), 1);
    }

    #[test]
    fn long_names_wrap_within_band() {
        let rows = (0..12)
            .map(|i| row("W", &format!("Saint Example Regional Medical Center {i}"), 1.0, i as f64 + 2.0))
            .collect();
        let out = draw(&PriceDataset::from_rows(rows), "W");
        let measure = ApproxMeasure::default();
        let band = BandScale::new(
            out.x_axis.ticks.iter().map(|t| t.key.clone()).collect(),
            (0.0, 990.0),
            0.3,
        );
        let budget = band.bandwidth().min(140.0);
        for tick in &out.x_axis.ticks {
            assert!(tick.label.lines.len() > 1);
            for line in &tick.label.lines {
                if line.contains(' ') {
                    assert!(measure.width(line, 10.0) <= budget);
                }
            }
            assert_eq!(tick.label.lines.join(" "), tick.key);
        }
    }

    #[test]
    fn wide_bands_wrap_at_the_label_cap() {
        // two bands are ~301px wide, so the 140px cap decides the breaks
        let ds = PriceDataset::from_rows(vec![
            row("W", "Saint Example Regional Medical Center", 1.0, 5.0),
            row("W", "Mercy", 1.0, 2.0),
        ]);
        let out = draw(&ds, "W");
        let measure = ApproxMeasure::default();
        let band = BandScale::new(vec!["a".into(), "b".into()], (0.0, 990.0), 0.3);
        assert!(band.bandwidth() > 140.0);

        let label = &out.x_axis.ticks[0].label;
        assert!(measure.width(&out.x_axis.ticks[0].key, 10.0) < band.bandwidth());
        assert_eq!(label.lines, vec!["Saint Example Regional", "Medical Center"]);
        for line in &label.lines {
            assert!(measure.width(line, 10.0) <= 140.0);
        }
        assert_eq!(out.x_axis.ticks[1].label.lines, vec!["Mercy"]);
    }

    #[test]
    fn label_baselines_step_by_line_height() {
        let label = WrappedLabel {
            lines: vec!["a".into(), "b".into()],
            font_size: 10.0,
            line_height: 1.1,
        };
        assert!((label.baseline(0) - 18.0).abs() < 1e-4);
        assert!((label.baseline(1) - 29.0).abs() < 1e-4);
    }

    #[test]
    fn hit_test_finds_range_line_only() {
        let out = draw(&scenario(), "X001");
        let h2 = &out.marks[1];
        let mid_y = (h2.line.y1 + h2.line.y2) / 2.0;
        assert_eq!(out.hit_test(h2.line.x1 + 1.0, mid_y).map(|m| m.key.as_str()), Some("H2"));
        assert!(out.hit_test(h2.line.x1 + 10.0, mid_y).is_none());
        assert!(out.hit_test(h2.line.x1, h2.line.y1 + 5.0).is_none());
    }
}
