pub mod binner;
pub mod chart;
pub mod frame;
pub mod grid;
pub mod layout;

pub use binner::downsample;
pub use chart::{
    bar_chart, dot_chart, line_chart, log_bar_chart, log_dot_chart, log_line_chart,
    write_bar_chart, write_dot_chart, write_line_chart,
};
pub use frame::{Block, Ticks, plot_block};
pub use grid::{Cell, Grid, Projection, bar_length};
pub use layout::{Group, group_by, tile_blocks};
