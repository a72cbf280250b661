use eframe::egui::{
    self, Align2, Color32, Context, FontId, Galley, Painter, Pos2, Sense, Stroke, Ui, Vec2,
};

use crate::chart::scene::{RenderOutput, Segment, TICK_PADDING, TICK_SIZE};
use crate::chart::TextMeasure;
use crate::color::{highlight, to_color32};
use crate::state::{AppState, LoadStatus, LOAD_FAILED_MESSAGE};

use super::tooltip::show_tooltip;

// ---------------------------------------------------------------------------
// Font-metric text measurement
// ---------------------------------------------------------------------------

/// Measures label widths with the same fonts the painter uses.
pub struct EguiMeasure<'a> {
    pub ctx: &'a Context,
}

impl TextMeasure for EguiMeasure<'_> {
    fn width(&self, text: &str, font_size: f32) -> f32 {
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(
                    text.to_owned(),
                    FontId::proportional(font_size),
                    Color32::PLACEHOLDER,
                )
                .size()
                .x
        })
    }
}

// ---------------------------------------------------------------------------
// Price chart (central panel)
// ---------------------------------------------------------------------------

/// Render the chart canvas in the central panel and drive the tooltip.
pub fn price_chart(ui: &mut Ui, state: &mut AppState) {
    let layout = state.layout;
    let (response, painter) =
        ui.allocate_painter(Vec2::new(layout.width, layout.height), Sense::hover());
    let origin = response.rect.min + Vec2::new(layout.margin.left, layout.margin.top);

    match &state.status {
        LoadStatus::Idle | LoadStatus::Loading(_) => {
            painter.text(
                origin + Vec2::new(0.0, 20.0),
                Align2::LEFT_BOTTOM,
                "Loading…",
                FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }
        LoadStatus::Failed(_) => {
            painter.text(
                origin + Vec2::new(0.0, 20.0),
                Align2::LEFT_BOTTOM,
                LOAD_FAILED_MESSAGE,
                FontId::proportional(14.0),
                ui.visuals().text_color(),
            );
            return;
        }
        LoadStatus::Loaded => {}
    }

    let Some(scene) = &state.scene else {
        return;
    };

    let text_color = ui.visuals().text_color();
    draw_axes(&painter, origin, scene, text_color);
    draw_marks(&painter, origin, scene, state.tooltip.hovered());

    // Hover: only the range line is a target.
    let hit = response.hover_pos().and_then(|pointer| {
        let local = pointer - origin;
        scene
            .hit_test(local.x, local.y)
            .map(|mark| (pointer, mark.aggregate.clone()))
    });
    match hit {
        Some((pointer, agg)) => state.tooltip.show(pointer, &agg),
        None => state.tooltip.hide(),
    }

    show_tooltip(ui.ctx(), &state.tooltip);
}

fn draw_axes(painter: &Painter, origin: Pos2, scene: &RenderOutput, color: Color32) {
    let stroke = Stroke::new(1.0, color);

    // Bottom (hospital) axis
    let x_axis = &scene.x_axis;
    let base = origin + Vec2::new(0.0, x_axis.y);
    painter.line_segment(
        [base + Vec2::new(x_axis.range.0, 0.0), base + Vec2::new(x_axis.range.1, 0.0)],
        stroke,
    );
    for tick in &x_axis.ticks {
        let at = base + Vec2::new(tick.x, 0.0);
        painter.line_segment([at, at + Vec2::new(0.0, TICK_SIZE)], stroke);
        for (i, line) in tick.label.lines.iter().enumerate() {
            let galley =
                painter.layout_no_wrap(line.clone(), FontId::proportional(tick.label.font_size), color);
            let ascent = baseline_offset(&galley).unwrap_or(tick.label.font_size * 0.8);
            let top_left = at + Vec2::new(-galley.size().x / 2.0, tick.label.baseline(i) - ascent);
            painter.galley(top_left, galley, color);
        }
    }

    // Left (price) axis
    let y_axis = &scene.y_axis;
    painter.line_segment(
        [origin + Vec2::new(0.0, y_axis.range.0), origin + Vec2::new(0.0, y_axis.range.1)],
        stroke,
    );
    for tick in &y_axis.ticks {
        let at = origin + Vec2::new(0.0, tick.y);
        painter.line_segment([at, at - Vec2::new(TICK_SIZE, 0.0)], stroke);
        painter.text(
            at - Vec2::new(TICK_SIZE + TICK_PADDING, 0.0),
            Align2::RIGHT_CENTER,
            &tick.label,
            FontId::proportional(y_axis.font_size),
            color,
        );
    }
}

/// Distance from the top of a laid-out line to its text baseline.
fn baseline_offset(galley: &Galley) -> Option<f32> {
    galley
        .rows
        .first()
        .and_then(|row| row.glyphs.first())
        .map(|glyph| glyph.pos.y)
}

fn draw_marks(painter: &Painter, origin: Pos2, scene: &RenderOutput, hovered: Option<&str>) {
    let style = &scene.style;
    for mark in &scene.marks {
        let color = if hovered == Some(mark.key.as_str()) {
            to_color32(highlight(style.color))
        } else {
            to_color32(style.color)
        };
        segment(painter, origin, &mark.line, Stroke::new(style.line_width, color));
        segment(painter, origin, &mark.cap_min, Stroke::new(style.cap_width, color));
        segment(painter, origin, &mark.cap_max, Stroke::new(style.cap_width, color));
    }
}

fn segment(painter: &Painter, origin: Pos2, s: &Segment, stroke: Stroke) {
    painter.line_segment(
        [origin + Vec2::new(s.x1, s.y1), origin + Vec2::new(s.x2, s.y2)],
        stroke,
    );
}

/// Scroll container for the fixed-size canvas.
pub fn chart_area(ui: &mut Ui, state: &mut AppState) {
    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| price_chart(ui, state));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_sit_on_their_baseline() {
        let ctx = Context::default();
        let mut ascent = None;
        let mut height = 0.0;
        let _ = ctx.run(Default::default(), |ctx| {
            let galley = ctx.fonts(|f| {
                f.layout_no_wrap("Mercy General".to_owned(), FontId::proportional(10.0), Color32::WHITE)
            });
            ascent = baseline_offset(&galley);
            height = galley.size().y;
        });
        let ascent = ascent.unwrap();
        assert!(ascent > 0.0 && ascent < height, "{ascent} vs {height}");
    }

    #[test]
    fn egui_measure_grows_with_text() {
        let ctx = Context::default();
        let mut widths = (0.0, 0.0);
        let _ = ctx.run(Default::default(), |ctx| {
            let m = EguiMeasure { ctx };
            widths = (m.width("Mercy", 10.0), m.width("Mercy General", 10.0));
        });
        assert!(widths.0 > 0.0);
        assert!(widths.1 > widths.0);
    }
}
