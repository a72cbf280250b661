use std::fmt::Write;

use crate::color::to_hex;
use crate::config::ChartLayout;

use super::format::money;
use super::scene::{RenderOutput, Segment, TICK_PADDING, TICK_SIZE, VALUE_LABEL_DY};

const FONT_FAMILY: &str = "sans-serif";

// ---------------------------------------------------------------------------
// SVG export
// ---------------------------------------------------------------------------

/// Serialise a rendered chart as a standalone SVG document. Each range line
/// carries a `<title>` so viewers show the hospital summary on hover.
pub fn to_svg(out: &RenderOutput) -> String {
    let mut svg = String::new();
    open_document(&mut svg, &out.layout);

    svg.push_str("<g class=\"axes\">\n");
    write_x_axis(&mut svg, out);
    write_y_axis(&mut svg, out);
    svg.push_str("</g>\n");

    svg.push_str("<g class=\"marks\">\n");
    let stroke = to_hex(out.style.color);
    for mark in &out.marks {
        let agg = &mark.aggregate;
        let title = format!(
            "{}\n{}\nMedian min {}\nMedian max {}",
            agg.hospital,
            agg.location(),
            money(agg.med_min),
            money(agg.med_max)
        );
        let _ = writeln!(
            svg,
            "<line class=\"range-line\" data-key=\"{}\" {} stroke=\"{stroke}\" stroke-width=\"{}\" stroke-linecap=\"butt\"><title>{}</title></line>",
            escape(&mark.key),
            segment_attrs(&mark.line),
            num(out.style.line_width),
            escape(&title)
        );
        for (class, cap) in [("cap-min", &mark.cap_min), ("cap-max", &mark.cap_max)] {
            let _ = writeln!(
                svg,
                "<line class=\"{class}\" data-key=\"{}\" {} stroke=\"{stroke}\" stroke-width=\"{}\"/>",
                escape(&mark.key),
                segment_attrs(cap),
                num(out.style.cap_width)
            );
        }
    }
    svg.push_str("</g>\n");

    close_document(&mut svg);
    svg
}

// ---------------------------------------------------------------------------
// Pieces
// ---------------------------------------------------------------------------

fn open_document(svg: &mut String, layout: &ChartLayout) {
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = num(layout.width),
        h = num(layout.height)
    );
    let _ = writeln!(
        svg,
        "<g transform=\"translate({},{})\">",
        num(layout.margin.left),
        num(layout.margin.top)
    );
}

fn close_document(svg: &mut String) {
    svg.push_str("</g>\n</svg>\n");
}

fn write_x_axis(svg: &mut String, out: &RenderOutput) {
    let axis = &out.x_axis;
    let _ = writeln!(
        svg,
        "<g class=\"axis x-axis\" transform=\"translate(0,{})\" fill=\"none\" font-size=\"{}\" font-family=\"{FONT_FAMILY}\" text-anchor=\"middle\">",
        num(axis.y),
        num(out.layout.font_size)
    );
    let _ = writeln!(
        svg,
        "<path class=\"domain\" stroke=\"currentColor\" d=\"M{r0},{t}V0H{r1}V{t}\"/>",
        r0 = num(axis.range.0),
        r1 = num(axis.range.1),
        t = num(TICK_SIZE)
    );
    for tick in &axis.ticks {
        let _ = write!(
            svg,
            "<g class=\"tick\" transform=\"translate({},0)\"><line stroke=\"currentColor\" y2=\"{}\"/><text fill=\"currentColor\">",
            num(tick.x),
            num(TICK_SIZE)
        );
        for (i, line) in tick.label.lines.iter().enumerate() {
            let _ = write!(
                svg,
                "<tspan x=\"0\" y=\"{}\">{}</tspan>",
                num(tick.label.baseline(i)),
                escape(line)
            );
        }
        svg.push_str("</text></g>\n");
    }
    svg.push_str("</g>\n");
}

fn write_y_axis(svg: &mut String, out: &RenderOutput) {
    let axis = &out.y_axis;
    let _ = writeln!(
        svg,
        "<g class=\"axis y-axis\" fill=\"none\" font-size=\"{}\" font-family=\"{FONT_FAMILY}\" text-anchor=\"end\">",
        num(axis.font_size)
    );
    let _ = writeln!(
        svg,
        "<path class=\"domain\" stroke=\"currentColor\" d=\"M-{t},{r0}H0V{r1}H-{t}\"/>",
        r0 = num(axis.range.0),
        r1 = num(axis.range.1),
        t = num(TICK_SIZE)
    );
    for tick in &axis.ticks {
        let _ = writeln!(
            svg,
            "<g class=\"tick\" transform=\"translate(0,{})\"><line stroke=\"currentColor\" x2=\"-{}\"/><text fill=\"currentColor\" x=\"-{}\" dy=\"{}em\">{}</text></g>",
            num(tick.y),
            num(TICK_SIZE),
            num(TICK_SIZE + TICK_PADDING),
            VALUE_LABEL_DY,
            escape(&tick.label)
        );
    }
    svg.push_str("</g>\n");
}

fn segment_attrs(s: &Segment) -> String {
    format!(
        "x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
        num(s.x1),
        num(s.y1),
        num(s.x2),
        num(s.y2)
    )
}

/// Compact decimal: at most two fractional digits, no trailing zeros.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::scene::render;
    use crate::chart::wrap::ApproxMeasure;
    use crate::data::model::{row, PriceDataset};

    fn chart() -> RenderOutput {
        let ds = PriceDataset::from_rows(vec![
            row("X1", "A & B Hospital", 100.0, 250.0),
            row("X1", "Mercy", 50.0, 300.0),
        ]);
        render(&ds, "X1", &ChartLayout::default(), &ApproxMeasure::default())
    }

    #[test]
    fn document_has_canvas_size_and_margins() {
        let svg = to_svg(&chart());
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1100\" height=\"560\""));
        assert!(svg.contains("<g transform=\"translate(80,30)\">"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn one_line_and_two_caps_per_hospital() {
        let svg = to_svg(&chart());
        assert_eq!(svg.matches("class=\"range-line\"").count(), 2);
        assert_eq!(svg.matches("class=\"cap-min\"").count(), 2);
        assert_eq!(svg.matches("class=\"cap-max\"").count(), 2);
        assert!(svg.contains("stroke=\"#4682b4\" stroke-width=\"5\""));
    }

    #[test]
    fn text_is_escaped() {
        let svg = to_svg(&chart());
        assert!(svg.contains("A &amp; B Hospital"));
        assert!(!svg.contains("A & B"));
    }

    #[test]
    fn tooltip_titles_carry_medians() {
        let svg = to_svg(&chart());
        assert!(svg.contains("Median min $50\nMedian max $300"));
    }

    #[test]
    fn value_axis_ticks_are_currency() {
        let svg = to_svg(&chart());
        assert!(svg.contains(">$0</text>"));
        assert!(svg.contains(">$300</text>"));
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
    }
}
