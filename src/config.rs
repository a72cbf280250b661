// ---------------------------------------------------------------------------
// Compile-time defaults
// ---------------------------------------------------------------------------

/// CSV read at start-up when no path is given on the command line.
pub const DEFAULT_CSV_PATH: &str = "hospital_prices_medians_common.csv";

/// Space reserved around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Fixed geometry of the chart canvas. The bottom margin is generous so
/// wrapped hospital names have room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f32,
    pub height: f32,
    pub margin: Margin,
    /// Padding fraction between (and outside) hospital bands.
    pub band_padding: f32,
    /// Upper bound for a wrapped hospital label, in pixels.
    pub max_label_width: f32,
    pub y_tick_count: usize,
    pub font_size: f32,
    /// Distance between wrapped label lines, in ems.
    pub line_height: f32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 560.0,
            margin: Margin {
                top: 30.0,
                right: 30.0,
                bottom: 140.0,
                left: 80.0,
            },
            band_padding: 0.3,
            max_label_width: 140.0,
            y_tick_count: 6,
            font_size: 10.0,
            line_height: 1.1,
        }
    }
}

impl ChartLayout {
    pub fn plot_width(&self) -> f32 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f32 {
        self.height - self.margin.top - self.margin.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_area_excludes_margins() {
        let layout = ChartLayout::default();
        assert_eq!(layout.plot_width(), 990.0);
        assert_eq!(layout.plot_height(), 390.0);
    }
}
