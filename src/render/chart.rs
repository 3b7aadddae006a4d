//! Chart assemblers: validate, scale, rasterize, lay out, write.
//!
//! Every entry point builds the complete text before touching the output
//! stream, so an error never leaves half a chart behind.

use std::io::{Write, stdout};

use tracing::debug;

use crate::{
    core::{
        bounds::{Axis, Domain},
        config::{BarConfig, PlotConfig},
        constants::BAR,
        error::GraphError,
        format::format_value,
        series::{Point, Series, extract, number, require_fields, resolve_key_kind},
        value::{KeyKind, Record, Value},
    },
    render::{
        binner::downsample,
        frame::{Block, Ticks, join_lines, plot_block, text_width},
        grid::{Projection, bar_length, polyline, scatter},
        layout::{group_by, tile_blocks},
    },
};

// --- Bar ---

/// Horizontal bars, one per record, in input order.
pub fn bar_chart(
    records: &[Record],
    label: &str,
    value: &str,
    cfg: &BarConfig,
) -> Result<String, GraphError> {
    require_fields(records, &[label, value])?;
    debug!(kind = "bar", rows = records.len(), width = cfg.width, "rendering chart");

    let values = records
        .iter()
        .enumerate()
        .map(|(row, r)| number(r, row, value))
        .collect::<Result<Vec<f64>, _>>()?;
    let labels: Vec<String> = records
        .iter()
        .map(|r| cfg.format_labels.apply(r.get(label).unwrap_or(&Value::Null)))
        .collect();

    let max = cfg
        .domain_max
        .or_else(|| Domain::of(values.iter().copied()).map(|d| d.max))
        .unwrap_or(0.0);
    let lw = labels
        .iter()
        .map(|l| text_width(l))
        .chain(cfg.total_label.as_deref().map(text_width))
        .max()
        .unwrap_or(0);
    let pad = |l: &str| " ".repeat(lw - text_width(l));

    let mut lines = Vec::with_capacity(records.len() * 2 + 3);
    if let Some(t) = &cfg.title {
        lines.push(t.clone());
    }
    for (i, (l, v)) in labels.iter().zip(&values).enumerate() {
        if i > 0 && !cfg.compact {
            lines.push(String::new());
        }
        let bar: String = std::iter::repeat_n(BAR, bar_length(*v, max, cfg.width)).collect();
        let shown = cfg.format_values.apply(&Value::Num(*v));
        lines.push(format!("{l}{} │{bar} {shown}", pad(l)));
    }
    if let Some(t) = &cfg.total_label {
        if !cfg.compact {
            lines.push(String::new());
        }
        let total = cfg.format_values.apply(&Value::Num(values.iter().sum()));
        lines.push(format!("{t}{} │ {total}", pad(t)));
    }
    Ok(join_lines(&lines))
}

// --- Dot / line ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Dots,
    Line,
}

impl Mark {
    fn name(self) -> &'static str {
        match self {
            Self::Dots => "dot",
            Self::Line => "line",
        }
    }
}

fn render_block(
    points: &[Point],
    header: &str,
    (x, y): (Domain, Domain),
    kind: KeyKind,
    mark: Mark,
    cfg: &PlotConfig,
) -> Block {
    let proj = Projection::new(x, y, cfg.width, cfg.height);
    let grid = match mark {
        Mark::Dots => scatter(points, &proj),
        Mark::Line => polyline(&downsample(points, cfg.width), &proj),
    };
    let ticks = Ticks {
        y_top: cfg.format_y.apply(&Value::Num(y.max)),
        y_bottom: cfg.format_y.apply(&Value::Num(y.min)),
        x_left: cfg.format_x.apply(&kind.to_value(x.min)),
        x_right: cfg.format_x.apply(&kind.to_value(x.max)),
    };
    plot_block(header, &grid, &ticks)
}

fn xy_chart(
    records: &[Record],
    x: &str,
    y: &str,
    cfg: &PlotConfig,
    mark: Mark,
) -> Result<String, GraphError> {
    let mut fields = vec![x, y];
    if let Some(g) = &cfg.small_multiples {
        fields.push(g);
    }
    require_fields(records, &fields)?;
    let kind = resolve_key_kind(records, x, cfg.x_kind)?;
    let series = extract(records, x, y, kind)?;
    debug!(
        kind = mark.name(),
        rows = records.len(),
        width = cfg.width,
        height = cfg.height,
        "rendering chart"
    );

    let (headers, groups): (Vec<String>, Vec<Series>) = match &cfg.small_multiples {
        None => (
            vec![cfg.title.clone().unwrap_or_else(|| format!("{y} vs {x}"))],
            vec![series],
        ),
        Some(field) => group_by(records, field)
            .into_iter()
            .map(|g| {
                let members: Series = g.rows.iter().map(|&i| series[i]).collect();
                (format_value(&g.key), members)
            })
            .unzip(),
    };

    let xs = Axis::X.domains(&groups, cfg.fixed_scales);
    let ys = Axis::Y.domains(&groups, cfg.fixed_scales);
    let blocks = groups
        .iter()
        .zip(&headers)
        .zip(xs.into_iter().zip(ys))
        .map(|((points, header), domains)| match domains {
            (Some(dx), Some(dy)) => Ok(render_block(points, header, (dx, dy), kind, mark, cfg)),
            _ => Err(GraphError::EmptyData),
        })
        .collect::<Result<Vec<Block>, _>>()?;

    let lines = if cfg.small_multiples.is_some() {
        let mut lines: Vec<String> = cfg.title.iter().cloned().collect();
        lines.extend(tile_blocks(&blocks, cfg.small_multiples_per_row));
        lines
    } else {
        blocks.into_iter().flat_map(|b| b.lines).collect()
    };
    Ok(join_lines(&lines))
}

/// Scatter of `y` against `x`, optionally as small multiples.
pub fn dot_chart(
    records: &[Record],
    x: &str,
    y: &str,
    cfg: &PlotConfig,
) -> Result<String, GraphError> {
    xy_chart(records, x, y, cfg, Mark::Dots)
}

/// Connected `y` against `x`; dense series are bucket-averaged to `width`.
pub fn line_chart(
    records: &[Record],
    x: &str,
    y: &str,
    cfg: &PlotConfig,
) -> Result<String, GraphError> {
    xy_chart(records, x, y, cfg, Mark::Line)
}

// --- Writers ---

pub fn write_bar_chart<W: Write>(
    out: &mut W,
    records: &[Record],
    label: &str,
    value: &str,
    cfg: &BarConfig,
) -> Result<(), GraphError> {
    let text = bar_chart(records, label, value, cfg)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

pub fn write_dot_chart<W: Write>(
    out: &mut W,
    records: &[Record],
    x: &str,
    y: &str,
    cfg: &PlotConfig,
) -> Result<(), GraphError> {
    let text = dot_chart(records, x, y, cfg)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

pub fn write_line_chart<W: Write>(
    out: &mut W,
    records: &[Record],
    x: &str,
    y: &str,
    cfg: &PlotConfig,
) -> Result<(), GraphError> {
    let text = line_chart(records, x, y, cfg)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// [`bar_chart`] straight to stdout.
pub fn log_bar_chart(
    records: &[Record],
    label: &str,
    value: &str,
    cfg: &BarConfig,
) -> Result<(), GraphError> {
    write_bar_chart(&mut stdout().lock(), records, label, value, cfg)
}

/// [`dot_chart`] straight to stdout.
pub fn log_dot_chart(
    records: &[Record],
    x: &str,
    y: &str,
    cfg: &PlotConfig,
) -> Result<(), GraphError> {
    write_dot_chart(&mut stdout().lock(), records, x, y, cfg)
}

/// [`line_chart`] straight to stdout.
pub fn log_line_chart(
    records: &[Record],
    x: &str,
    y: &str,
    cfg: &PlotConfig,
) -> Result<(), GraphError> {
    write_line_chart(&mut stdout().lock(), records, x, y, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::MARKER;

    fn bars(rows: &[(&str, f64)]) -> Vec<Record> {
        rows.iter()
            .map(|(r, v)| Record::new().with("r", *r).with("v", *v))
            .collect()
    }

    fn bar_count(line: &str) -> usize {
        line.chars().filter(|c| *c == BAR).count()
    }

    #[test]
    fn compact_bars_have_no_blank_lines() {
        let cfg = BarConfig::builder().width(10).compact(true).build().unwrap();
        let out = bar_chart(&bars(&[("A", 10.0), ("B", 5.0)]), "r", "v", &cfg).unwrap();
        assert_eq!(out, "A │██████████ 10\nB │█████ 5\n");
    }

    #[test]
    fn total_row_sums_values() {
        let cfg = BarConfig::builder()
            .width(4)
            .title("Sales")
            .total_label("Total")
            .build()
            .unwrap();
        let out = bar_chart(&bars(&[("A", 1500.0), ("B", 500.0)]), "r", "v", &cfg).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Sales");
        assert_eq!(lines[1], "A     │████ 1,500");
        assert_eq!(lines[2], "");
        assert_eq!(lines.last(), Some(&"Total │ 2,000"));
    }

    #[test]
    fn negative_bars_are_empty() {
        let cfg = BarConfig::builder().width(10).compact(true).build().unwrap();
        let out = bar_chart(&bars(&[("up", 4.0), ("down", -4.0)]), "r", "v", &cfg).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(bar_count(lines[0]), 10);
        assert_eq!(bar_count(lines[1]), 0);
        assert!(lines[1].ends_with("-4"));
    }

    #[test]
    fn custom_formatters_are_injected() {
        let cfg = BarConfig::builder()
            .width(2)
            .compact(true)
            .format_labels(|v| format_value(v).to_uppercase())
            .format_values(|v| format!("{}%", format_value(v)))
            .build()
            .unwrap();
        let out = bar_chart(&bars(&[("a", 1.0)]), "r", "v", &cfg).unwrap();
        assert_eq!(out, "A │██ 1%\n");
    }

    #[test]
    fn missing_value_aborts_without_output() {
        let rows = vec![
            Record::new().with("r", "A").with("v", 1),
            Record::new().with("r", "B").with("v", Value::Null),
        ];
        let mut sink = Vec::new();
        let err = write_bar_chart(&mut sink, &rows, "r", "v", &BarConfig::default()).unwrap_err();
        assert!(matches!(err, GraphError::InvalidData { row: 1, .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn default_header_names_both_fields() {
        let rows = vec![Record::new().with("t", 1).with("temp", 3)];
        let cfg = PlotConfig::builder().width(10).height(4).build().unwrap();
        let out = dot_chart(&rows, "t", "temp", &cfg).unwrap();
        assert!(out.lines().next().unwrap().trim() == "temp vs t");
        assert_eq!(out.chars().filter(|c| *c == MARKER).count(), 1);
    }

    #[test]
    fn line_chart_with_single_point_renders() {
        let rows = vec![Record::new().with("x", 5).with("y", 5)];
        let cfg = PlotConfig::builder().width(6).height(3).build().unwrap();
        let out = line_chart(&rows, "x", "y", &cfg).unwrap();
        assert_eq!(out.chars().filter(|c| *c == MARKER).count(), 1);
    }

    #[test]
    fn domain_max_sets_the_bar_ceiling() {
        let cfg = BarConfig::builder()
            .width(10)
            .compact(true)
            .domain_max(20.0)
            .build()
            .unwrap();
        let out = bar_chart(&bars(&[("A", 10.0)]), "r", "v", &cfg).unwrap();
        assert_eq!(out, "A │█████ 10\n");
    }

    #[test]
    fn declared_date_keys_render_date_ticks() {
        let rows: Vec<Record> = (1..=3)
            .map(|d| {
                let day = chrono::NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
                Record::new().with("d", day).with("v", f64::from(d))
            })
            .collect();
        let cfg = PlotConfig::builder()
            .width(24)
            .height(3)
            .x_kind(KeyKind::Date)
            .build()
            .unwrap();
        let out = line_chart(&rows, "d", "v", &cfg).unwrap();
        let ticks = out.lines().last().unwrap();
        assert!(ticks.trim_start().starts_with("2024-05-01"));
        assert!(ticks.ends_with("2024-05-03"));
    }

    #[test]
    fn dense_groups_are_each_averaged_to_the_width() {
        let rows: Vec<Record> = ["a", "b"]
            .iter()
            .flat_map(|g| {
                (0..100).map(move |i| Record::new().with("g", *g).with("x", i).with("y", i))
            })
            .collect();
        let cfg = PlotConfig::builder()
            .width(10)
            .height(4)
            .small_multiples("g")
            .small_multiples_per_row(2)
            .build()
            .unwrap();
        let out = line_chart(&rows, "x", "y", &cfg).unwrap();
        let lines: Vec<Vec<char>> = out.lines().map(|l| l.chars().collect()).collect();
        assert_eq!(lines.len(), 7);

        // "99 ┤" is four columns wide, blocks are fourteen, the gap is four.
        let plot_start = [4, 4 + 14 + 4];
        for start in plot_start {
            let mut cols: Vec<usize> = lines[1..=4]
                .iter()
                .flat_map(|l| {
                    l.iter()
                        .enumerate()
                        .skip(start)
                        .take(10)
                        .filter(|(_, c)| **c == MARKER)
                        .map(move |(i, _)| i - start)
                })
                .collect();
            cols.sort_unstable();
            cols.dedup();
            assert_eq!(cols, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn missing_grouping_field_is_a_config_error() {
        let rows = vec![Record::new().with("x", 1).with("y", 1)];
        let cfg = PlotConfig::builder().small_multiples("region").build().unwrap();
        assert!(matches!(
            dot_chart(&rows, "x", "y", &cfg),
            Err(GraphError::Config(_))
        ));
    }
}
