use sheet_dash::stats::{
    BUBBLE_FALLBACK_SIZE, BUBBLE_MIN_SIZE, bubble_sizes, column_summaries, pareto,
};
use sheet_dash::{Cell, Table};

fn rows(items: &[(&str, f64)]) -> Vec<(String, f64)> {
    items.iter().map(|(l, v)| (l.to_string(), *v)).collect()
}

#[test]
fn pareto_example_orders_and_accumulates() {
    let got = pareto(&rows(&[("B", 30.0), ("A", 50.0), ("C", 20.0)]));
    let labels: Vec<&str> = got.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
    let pct: Vec<f64> = got.iter().map(|p| p.cumulative_percent()).collect();
    assert!((pct[0] - 50.0).abs() < 1e-9);
    assert!((pct[1] - 80.0).abs() < 1e-9);
    assert!((pct[2] - 100.0).abs() < 1e-9);
}

#[test]
fn pareto_fraction_is_non_decreasing_and_ends_at_one() {
    let got = pareto(&rows(&[("a", 3.0), ("b", 0.0), ("c", 7.5), ("d", 7.5), ("e", 1.0)]));
    for w in got.windows(2) {
        assert!(w[1].cumulative_fraction >= w[0].cumulative_fraction);
    }
    assert!((got.last().unwrap().cumulative_fraction - 1.0).abs() < 1e-12);
    // equal values keep their input order
    assert_eq!(got[0].label, "c");
    assert_eq!(got[1].label, "d");
}

#[test]
fn pareto_zero_total_uses_the_running_sum() {
    let got = pareto(&rows(&[("a", 0.0), ("b", 0.0)]));
    assert!(got.iter().all(|p| p.cumulative_fraction == p.cumulative));
    assert!(got.iter().all(|p| p.cumulative_fraction.is_finite()));
}

#[test]
fn bubble_sizes_are_monotonic() {
    let raw = [5.0, 1.0, 9.0, 3.0];
    let sizes = bubble_sizes(&raw);
    for i in 0..raw.len() {
        for j in 0..raw.len() {
            if raw[i] < raw[j] {
                assert!(sizes[i] < sizes[j]);
            }
        }
    }
    assert!((sizes[1] - BUBBLE_MIN_SIZE).abs() < 1e-9);
    assert!(sizes[2] <= 2100.0);
}

#[test]
fn equal_bubble_sizes_stay_equal() {
    let sizes = bubble_sizes(&[10.0, 10.0, 10.0]);
    assert!(sizes.iter().all(|s| *s == sizes[0]));
    assert_eq!(bubble_sizes(&[0.0, -2.0]), vec![BUBBLE_FALLBACK_SIZE; 2]);
}

#[test]
fn column_summaries_skip_non_numeric_cells() {
    let t = Table::new(
        ["k", "v"],
        vec![
            vec![Cell::from("a"), Cell::from(1)],
            vec![Cell::from("b"), Cell::from("n/a")],
            vec![Cell::from("c"), Cell::from(4)],
            vec![Cell::from("d"), Cell::from(3)],
            vec![Cell::from("e"), Cell::from(2)],
        ],
    );
    let s = &column_summaries(&t)[0];
    assert_eq!(s.column, "v");
    assert_eq!(s.count, 4);
    assert_eq!(s.missing, 1);
    assert_eq!(s.median, Some(2.5));
    assert_eq!(s.mean, Some(2.5));
    assert_eq!((s.min, s.max), (Some(1.0), Some(4.0)));
}
