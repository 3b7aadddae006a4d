use std::time::Instant;

use tracing::debug;

use crate::{
    core::{
        bounds::{fit_width, terminal_geometry},
        config::{BarConfig, PlotConfig},
        constants::{
            BLOCK_GAP, DEFAULT_BAR_WIDTH, DEFAULT_PER_ROW, DEFAULT_PLOT_WIDTH, MIN_PLOT_WIDTH,
        },
        data::read_csv_from_path,
        error::GraphError,
        format::format_value,
        value::{Record, Value},
    },
    render::{log_bar_chart, log_dot_chart, log_line_chart},
};

use super::parse::{BarArgs, PlotArgs};

/// Room kept free for y tick labels, gutter and axis glyph.
const PLOT_CHROME: usize = 14;
/// Room after a bar for ` │`, a space and the value.
const BAR_CHROME: usize = 16;

fn load(file: &str) -> Result<Vec<Record>, GraphError> {
    let t_ingest = Instant::now();
    let data = read_csv_from_path(file)?;
    debug!(
        rows = data.len(),
        micros = t_ingest.elapsed().as_micros(),
        "CSV ingest"
    );
    Ok(data)
}

fn terminal_columns() -> usize {
    usize::from(terminal_geometry().0.0)
}

pub fn bar(a: BarArgs) -> Result<(), GraphError> {
    let data = load(&a.file)?;

    let width = a.width.unwrap_or_else(|| {
        let labels = data
            .iter()
            .map(|r| format_value(r.get(&a.label).unwrap_or(&Value::Null)).chars().count())
            .max()
            .unwrap_or(0);
        fit_width(terminal_columns(), DEFAULT_BAR_WIDTH, labels + BAR_CHROME)
    });

    let cfg = BarConfig::builder()
        .width(width)
        .title_opt(a.title)
        .total_label_opt(a.total_label)
        .compact(a.compact)
        .build()?;
    log_bar_chart(&data, &a.label, &a.value, &cfg)
}

fn plot_config(a: &PlotArgs) -> Result<PlotConfig, GraphError> {
    let mut b = PlotConfig::builder()
        .title_opt(a.title.clone())
        .small_multiples_opt(a.facets.facet.clone())
        .fixed_scales(a.facets.fixed_scales);
    if let Some(n) = a.facets.per_row {
        b = b.small_multiples_per_row(n);
    }
    if let Some(h) = a.grid.height {
        b = b.height(h);
    }

    let width = a.grid.width.unwrap_or_else(|| {
        let per_row = match &a.facets.facet {
            Some(_) => a.facets.per_row.unwrap_or(DEFAULT_PER_ROW).max(1),
            None => 1,
        };
        let columns = terminal_columns().saturating_sub(BLOCK_GAP * (per_row - 1)) / per_row;
        fit_width(columns, DEFAULT_PLOT_WIDTH, PLOT_CHROME).max(MIN_PLOT_WIDTH)
    });
    Ok(b.width(width).build()?)
}

pub fn dot(a: PlotArgs) -> Result<(), GraphError> {
    let data = load(&a.file)?;
    let cfg = plot_config(&a)?;
    log_dot_chart(&data, &a.x, &a.y, &cfg)
}

pub fn line(a: PlotArgs) -> Result<(), GraphError> {
    let data = load(&a.file)?;
    let cfg = plot_config(&a)?;
    log_line_chart(&data, &a.x, &a.y, &cfg)
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "ascii-charts";
    println!(
        "
Example invocations
-------------------
• Bar chart        : {bin} bar sales.csv --label region --value sales
• With a total     : {bin} bar sales.csv -l region -v sales --total-label Total --compact
• Dot chart        : {bin} dot temps.csv --x date --y temp --width 60 --height 20
• Line chart       : {bin} line temps.csv -x date -y temp --title \"Daily temperature\"
• Small multiples  : {bin} line temps.csv -x date -y temp --facet city --per-row 2
• Shared scales    : {bin} dot temps.csv -x date -y temp --facet city --fixed-scales
• Debug logging    : {bin} --debug line temps.csv -x date -y temp
"
    );
}
