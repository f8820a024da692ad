use sheet_dash::viz;
use sheet_dash::{Cell, ChartCategory, DisplayOptions, Table};

/// Opening tags `<name ...>` of every `name` element in an SVG document.
fn tags<'a>(svg: &'a str, name: &str) -> Vec<&'a str> {
    let open = format!("<{name} ");
    svg.split(open.as_str())
        .skip(1)
        .map(|rest| rest.split('>').next().unwrap_or(""))
        .collect()
}

fn attr<'a>(tag: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!("{key}=\"");
    let start = if tag.starts_with(&needle) {
        0
    } else {
        tag.find(&format!(" {needle}"))? + 1
    };
    tag[start + needle.len()..].split('"').next()
}

/// Filled bubble markers in drawing order, as `(radius, opacity)`.
fn bubble_fills(svg: &str) -> Vec<(u32, String)> {
    tags(svg, "circle")
        .into_iter()
        .filter(|t| attr(t, "fill").is_some_and(|f| f != "none"))
        .map(|t| {
            let r = attr(t, "r").and_then(|r| r.parse().ok()).unwrap();
            (r, attr(t, "opacity").unwrap().to_string())
        })
        .collect()
}

fn bubble_table(rows: &[(i32, i32, i32)]) -> Table {
    Table::new(
        ["x", "y", "size"],
        rows.iter()
            .map(|&(x, y, s)| vec![Cell::from(x), Cell::from(y), Cell::from(s)])
            .collect(),
    )
}

fn sales_table() -> Table {
    Table::new(
        ["region", "2023", "2024"],
        vec![
            vec![Cell::from("North"), Cell::from(1200), Cell::from(4800)],
            vec![Cell::from("South"), Cell::from(2500), Cell::from(3100)],
        ],
    )
}

#[test]
fn svg_size_follows_category_and_height() {
    let opts = DisplayOptions {
        height_px: 420,
        ..Default::default()
    };
    let chart = viz::render_svg(ChartCategory::Pareto, "파레토차트", &sales_table(), &opts).unwrap();
    assert_eq!((chart.width, chart.height), (900, 420));
    assert!(chart.svg.contains("width=\"900\""));
    assert!(chart.svg.contains("height=\"420\""));
    assert!(chart.svg.contains("Cumulative %"));
    assert!(chart.time_axis.is_none());
}

#[test]
fn value_ticks_use_the_locale() {
    let en = DisplayOptions::default();
    let de = DisplayOptions {
        locale: "de".into(),
        ..Default::default()
    };
    let t = sales_table();
    let svg_en = viz::render_svg(ChartCategory::BarHistogram, "b", &t, &en).unwrap().svg;
    let svg_de = viz::render_svg(ChartCategory::BarHistogram, "b", &t, &de).unwrap().svg;
    assert!(svg_en.contains("1,000"));
    assert!(svg_de.contains("1.000"));
}

#[test]
fn layout_option_changes_the_drawing() {
    let tight = DisplayOptions::default();
    let loose = DisplayOptions {
        tight_layout: false,
        ..Default::default()
    };
    let t = sales_table();
    for c in [ChartCategory::BarHistogram, ChartCategory::Pie, ChartCategory::Scatter] {
        let a = viz::render_svg(c, "s", &t, &tight).unwrap().svg;
        let b = viz::render_svg(c, "s", &t, &loose).unwrap().svg;
        assert_ne!(a, b, "{c}");
    }
}

#[test]
fn pie_labels_carry_one_decimal_shares() {
    let t = Table::new(
        ["item", "value"],
        vec![
            vec![Cell::from("A"), Cell::from(1)],
            vec![Cell::from("B"), Cell::from(2)],
        ],
    );
    let svg = viz::render_svg(ChartCategory::Pie, "파이차트", &t, &DisplayOptions::default())
        .unwrap()
        .svg;
    assert!(svg.contains("33.3%"));
    assert!(svg.contains("66.7%"));
}

#[test]
fn bubble_and_scatter_accept_categorical_x() {
    let t = Table::new(
        ["team", "score", "budget"],
        vec![
            vec![Cell::from("red"), Cell::from(3), Cell::from(10)],
            vec![Cell::from("blue"), Cell::from(5), Cell::from(0)],
            vec![Cell::from("green"), Cell::from("n/a"), Cell::from(4)],
        ],
    );
    let opts = DisplayOptions::default();
    for c in [ChartCategory::Scatter, ChartCategory::Bubble] {
        let chart = viz::render_svg(c, "x", &t, &opts).unwrap();
        assert!(chart.svg.contains("blue"), "{c}");
    }
}

#[test]
fn zero_sum_pie_is_an_error() {
    let t = Table::new(
        ["item", "value"],
        vec![vec![Cell::from("A"), Cell::from(0)], vec![Cell::from("B"), Cell::from(0)]],
    );
    let err = viz::render_svg(ChartCategory::Pie, "파이차트", &t, &DisplayOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("sum to zero"));
}

#[test]
fn bubble_opacity_option_reaches_the_markers() {
    let t = bubble_table(&[(1, 1, 10), (2, 2, 20), (3, 3, 30)]);
    for (opacity, expected) in [(0.25, "0.25"), (1.0, "1")] {
        let opts = DisplayOptions {
            bubble_opacity: opacity,
            ..Default::default()
        };
        let svg = viz::render_svg(ChartCategory::Bubble, "버블차트", &t, &opts).unwrap().svg;
        let fills = bubble_fills(&svg);
        assert_eq!(fills.len(), 3);
        assert!(fills.iter().all(|(_, o)| o == expected), "{fills:?}");
    }
}

#[test]
fn bubble_markers_grow_with_size_and_match_when_sizes_tie() {
    let opts = DisplayOptions::default();

    let tied = bubble_table(&[(1, 1, 10), (2, 2, 10), (3, 3, 10)]);
    let svg = viz::render_svg(ChartCategory::Bubble, "버블차트", &tied, &opts).unwrap().svg;
    let radii: Vec<u32> = bubble_fills(&svg).into_iter().map(|(r, _)| r).collect();
    assert_eq!(radii.len(), 3);
    assert!(radii.iter().all(|r| *r == radii[0]), "{radii:?}");

    let growing = bubble_table(&[(1, 1, 1), (2, 2, 5), (3, 3, 9)]);
    let svg = viz::render_svg(ChartCategory::Bubble, "버블차트", &growing, &opts).unwrap().svg;
    let radii: Vec<u32> = bubble_fills(&svg).into_iter().map(|(r, _)| r).collect();
    assert_eq!(radii.len(), 3);
    assert!(radii.windows(2).all(|w| w[0] < w[1]), "{radii:?}");
}

#[test]
fn pareto_draws_a_dashed_line_at_eighty_percent() {
    let svg = viz::render_svg(ChartCategory::Pareto, "파레토차트", &sales_table(), &DisplayOptions::default())
        .unwrap()
        .svg;

    let dash_ys: Vec<i32> = tags(&svg, "polyline")
        .into_iter()
        .filter(|t| attr(t, "stroke") == Some("#C00000"))
        .flat_map(|t| {
            attr(t, "points")
                .unwrap_or("")
                .split_whitespace()
                .filter_map(|p| p.split(',').nth(1)?.parse().ok())
                .collect::<Vec<i32>>()
        })
        .collect();
    assert!(dash_ys.len() >= 32, "expected many short dashes, got {}", dash_ys.len());
    assert!(dash_ys.iter().all(|y| *y == dash_ys[0]));

    // The secondary axis tick for 80% sits on the same row as the dashes.
    let tick_y: i32 = svg
        .split("<text ")
        .skip(1)
        .find(|t| t.split('>').nth(1).is_some_and(|body| body.starts_with("80%<")))
        .and_then(|t| attr(t, "y"))
        .and_then(|y| y.parse().ok())
        .unwrap();
    assert!((tick_y - dash_ys[0]).abs() <= 1, "tick {tick_y} vs dashes {}", dash_ys[0]);
}
