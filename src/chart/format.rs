use crate::data::model::CodeMeta;

/// Whole-dollar currency with thousands separators, e.g. `$12,345`.
pub fn money(value: f64) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("\u{2212}${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Summary line shown above the chart. Empty fields read `NA`.
pub fn meta_line(code: &str, meta: Option<&CodeMeta>) -> String {
    let na = |s: &str| if s.is_empty() { "NA".to_string() } else { s.to_string() };
    let (code_type, desc) = meta
        .map(|m| (na(&m.code_type), na(&m.desc)))
        .unwrap_or_else(|| ("NA".to_string(), "NA".to_string()));
    format!("Code: {code}   Type: {code_type}   Description: {desc}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0.0), "$0");
        assert_eq!(money(999.0), "$999");
        assert_eq!(money(1000.0), "$1,000");
        assert_eq!(money(1234567.0), "$1,234,567");
    }

    #[test]
    fn money_rounds_to_whole_dollars() {
        assert_eq!(money(149.5), "$150");
        assert_eq!(money(1999.4), "$1,999");
        assert_eq!(money(-0.2), "$0");
        assert_eq!(money(-1500.0), "\u{2212}$1,500");
    }

    #[test]
    fn meta_line_fills_missing_fields() {
        let meta = CodeMeta {
            code_type: "CPT".into(),
            desc: String::new(),
        };
        assert_eq!(
            meta_line("99213", Some(&meta)),
            "Code: 99213   Type: CPT   Description: NA"
        );
        assert_eq!(meta_line("X", None), "Code: X   Type: NA   Description: NA");
    }
}
