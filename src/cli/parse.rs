use clap::{Args, Parser, Subcommand};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "ascii-charts",
    about = "Bar, dot and line charts from CSV, as plain text"
)]
pub struct Cli {
    /// Emit debug logs on stderr (overrides `RUST_LOG`)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Horizontal bar chart, one bar per row
    Bar(BarArgs),
    /// Scatter plot of two columns
    Dot(PlotArgs),
    /// Line chart of two columns, averaged down to the plot width
    Line(PlotArgs),
    /// Print example invocations
    Examples,
}

/// `ascii-charts bar …`
#[derive(Parser, Debug)]
pub struct BarArgs {
    /// CSV path (use `-` for stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,

    /// Column holding bar labels
    #[arg(short, long)]
    pub label: String,

    /// Column holding bar values
    #[arg(short, long)]
    pub value: String,

    /// Longest bar in characters (fits the terminal if omitted)
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Chart title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Append a total row with this label
    #[arg(long)]
    pub total_label: Option<String>,

    /// No blank line between bars
    #[arg(long)]
    pub compact: bool,
}

/// `ascii-charts dot|line …`
#[derive(Parser, Debug)]
pub struct PlotArgs {
    /// CSV path (use `-` for stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,

    /// Key column (numbers or YYYY-MM-DD dates)
    #[arg(short, long)]
    pub x: String,

    /// Value column
    #[arg(short, long)]
    pub y: String,

    /// Chart title
    #[arg(short, long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub facets: FacetArgs,
}

#[derive(Args, Debug)]
pub struct GridArgs {
    /// Plot width in cells (fits the terminal if omitted)
    #[arg(long)]
    pub width: Option<usize>,

    /// Plot height in cells
    #[arg(long)]
    pub height: Option<usize>,
}

#[derive(Args, Debug)]
pub struct FacetArgs {
    /// Split into small multiples by this column
    #[arg(long, value_name = "FIELD")]
    pub facet: Option<String>,

    /// Share x/y scales across small multiples
    #[arg(long, requires = "facet")]
    pub fixed_scales: bool,

    /// Small multiples per row
    #[arg(long, requires = "facet")]
    pub per_row: Option<usize>,
}
