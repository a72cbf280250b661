// ---------------------------------------------------------------------------
// Text measurement
// ---------------------------------------------------------------------------

/// Reports the rendered width of a single line of text, in pixels.
pub trait TextMeasure {
    fn width(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed advance per character, for rendering without font metrics.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct ApproxMeasure {
    /// Average glyph advance as a fraction of the font size.
    pub em_per_char: f32,
}

#[cfg(test)]
impl Default for ApproxMeasure {
    fn default() -> Self {
        Self { em_per_char: 0.6 }
    }
}

#[cfg(test)]
impl TextMeasure for ApproxMeasure {
    fn width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * self.em_per_char * font_size
    }
}

// ---------------------------------------------------------------------------
// Greedy word wrapping
// ---------------------------------------------------------------------------

/// Break `text` into lines no wider than `max_width`, packing
/// whitespace-separated words greedily. A single word wider than the budget
/// gets a line of its own.
pub fn wrap_words(
    text: &str,
    max_width: f32,
    font_size: f32,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        line.push(word);
        if line.len() > 1 && measure.width(&line.join(" "), font_size) > max_width {
            line.pop();
            lines.push(line.join(" "));
            line = vec![word];
        }
    }
    if !line.is_empty() {
        lines.push(line.join(" "));
    }
    lines
}
