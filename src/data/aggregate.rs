use std::collections::HashMap;

use super::model::{HospitalAggregate, Row};

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Median of `values`; the mean of the two middle values for even counts.
/// Returns NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Most frequent value; on equal counts the value encountered first wins.
/// Returns `""` for an empty input.
pub fn mode<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for v in values {
        match counts.iter_mut().find(|(seen, _)| *seen == v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v, 1)),
        }
    }
    // stable sort keeps encounter order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.first().map(|(v, _)| v.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Per-hospital roll-up for one code
// ---------------------------------------------------------------------------

/// Roll up every row of `code` to one aggregate per hospital, ordered by
/// descending `med_max`. Hospitals with equal `med_max` keep the order in
/// which they first appear in `rows`.
pub fn aggregate_by_hospital(rows: &[Row], code: &str) -> Vec<HospitalAggregate> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Row>> = HashMap::new();

    for r in rows.iter().filter(|r| r.code == code) {
        groups
            .entry(r.hospital.as_str())
            .or_insert_with(|| {
                order.push(r.hospital.as_str());
                Vec::new()
            })
            .push(r);
    }

    let mut aggregates: Vec<HospitalAggregate> = order
        .into_iter()
        .filter_map(|hospital| {
            let group = groups.get(hospital)?;
            let mins: Vec<f64> = group.iter().map(|r| r.med_min).collect();
            let maxs: Vec<f64> = group.iter().map(|r| r.med_max).collect();
            Some(HospitalAggregate {
                hospital: hospital.to_string(),
                med_min: median(&mins),
                med_max: median(&maxs),
                city: mode(group.iter().map(|r| r.city.as_str())),
                state: mode(group.iter().map(|r| r.state.as_str())),
            })
        })
        .filter(|a| a.med_min.is_finite() && a.med_max.is_finite())
        .collect();

    aggregates.sort_by(|a, b| b.med_max.total_cmp(&a.med_max));
    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::row;

    fn located(code: &str, hospital: &str, city: &str, state: &str) -> Row {
        Row {
            city: city.into(),
            state: state.into(),
            ..row(code, hospital, 1.0, 2.0)
        }
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[30.0, 10.0, 20.0]), 20.0);
        assert_eq!(median(&[20.0, 10.0]), 15.0);
        assert_eq!(median(&[7.0]), 7.0);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn mode_prefers_most_frequent_then_first_seen() {
        assert_eq!(mode(["A", "A", "B"]), "A");
        assert_eq!(mode(["B", "A", "A"]), "A");
        assert_eq!(mode(["B", "A"]), "B");
        assert_eq!(mode(["A", "B", "B", "A"]), "A");
        assert_eq!(mode(std::iter::empty::<&str>()), "");
    }

    #[test]
    fn rolls_up_two_hospitals_with_tied_max() {
        let rows = vec![
            row("X001", "H1", 100.0, 200.0),
            row("X001", "H1", 300.0, 400.0),
            row("X001", "H2", 50.0, 300.0),
            row("X002", "H3", 1.0, 9999.0),
        ];
        let aggs = aggregate_by_hospital(&rows, "X001");
        assert_eq!(aggs.len(), 2);
        assert_eq!(aggs[0].hospital, "H1");
        assert_eq!(aggs[0].med_min, 200.0);
        assert_eq!(aggs[0].med_max, 300.0);
        assert_eq!(aggs[1].hospital, "H2");
        assert_eq!(aggs[1].med_min, 50.0);
        assert_eq!(aggs[1].med_max, 300.0);
    }

    #[test]
    fn sorted_descending_by_med_max() {
        let rows = vec![
            row("C", "low", 1.0, 10.0),
            row("C", "high", 1.0, 500.0),
            row("C", "mid", 1.0, 80.0),
            row("C", "mid", 1.0, 120.0),
        ];
        let aggs = aggregate_by_hospital(&rows, "C");
        let names: Vec<&str> = aggs.iter().map(|a| a.hospital.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
        assert!(aggs.windows(2).all(|w| w[0].med_max >= w[1].med_max));
        assert_eq!(aggs[1].med_max, 100.0);
    }

    #[test]
    fn one_entry_per_hospital_with_modal_location() {
        let rows = vec![
            located("C", "H1", "Boston", "MA"),
            located("C", "H1", "Cambridge", "MA"),
            located("C", "H1", "Cambridge", "MA"),
            located("C", "H2", "", "NY"),
        ];
        let aggs = aggregate_by_hospital(&rows, "C");
        assert_eq!(aggs.len(), 2);
        let h1 = aggs.iter().find(|a| a.hospital == "H1").unwrap();
        assert_eq!(h1.city, "Cambridge");
        assert_eq!(h1.state, "MA");
        let h2 = aggs.iter().find(|a| a.hospital == "H2").unwrap();
        assert_eq!(h2.city, "");
        assert_eq!(h2.location(), "NY");
    }

    #[test]
    fn unknown_code_yields_nothing() {
        let rows = vec![row("A", "H1", 1.0, 2.0)];
        assert!(aggregate_by_hospital(&rows, "B").is_empty());
    }
}
