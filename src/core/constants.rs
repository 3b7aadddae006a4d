//! A collection of constants.

/// Bar charts are 40 characters wide unless told otherwise
pub const DEFAULT_BAR_WIDTH: usize = 40;
/// Dot and line charts default to a 60×20 cell grid
pub const DEFAULT_PLOT_WIDTH: usize = 60;
pub const DEFAULT_PLOT_HEIGHT: usize = 20;
/// Small multiples laid out three to a row
pub const DEFAULT_PER_ROW: usize = 3;

/// A plot needs at least two cells on each axis to carry both end ticks
pub const MIN_PLOT_WIDTH: usize = 2;
pub const MIN_PLOT_HEIGHT: usize = 2;

/// One character of space between y labels and the axis
pub const LABEL_GUTTER: usize = 1;
/// Horizontal gap between tiled small-multiple blocks
pub const BLOCK_GAP: usize = 4;

/// Numbers are rounded to at most two decimal places.
///
/// 14.832 becomes 14.83, 14.8 stays 14.8
pub const DECIMAL_PRECISION: usize = 2;

// Glyphs
pub const BAR: char = '█';
pub const MARKER: char = '•';
pub const EMPTY: char = ' ';
pub const V: char = '│';
pub const V_TICK: char = '┤';
pub const H: char = '─';
pub const BL: char = '└';
