//! Text blocks: a rasterized grid plus its axes, ticks and header.
//!
//! ```text
//!         header
//!   30 ┤   •
//!      │ •   •
//!   10 ┤•      •
//!      └────────
//!       0      7
//! ```

use crate::{
    core::constants::{BL, H, LABEL_GUTTER, V, V_TICK},
    render::grid::Grid,
};

/// Width in terminal columns; every glyph we emit is single-width.
#[inline]
#[must_use]
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// `text` centred inside `width` columns, left padding only.
fn push_centered(buf: &mut String, text: &str, width: usize) {
    let len = text_width(text);
    if len < width {
        buf.push_str(&" ".repeat((width - len) / 2));
    }
    buf.push_str(text);
}

/// Tick labels framing one plot.
#[derive(Debug, Clone, Default)]
pub struct Ticks {
    pub y_top: String,
    pub y_bottom: String,
    pub x_left: String,
    pub x_right: String,
}

/// A rectangular run of lines, the unit the tiler works with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub lines: Vec<String>,
}

impl Block {
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Widest line.
    #[must_use]
    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| text_width(l)).max().unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Line `i` right-padded to `width`; missing lines are all blanks.
    #[must_use]
    pub fn padded_line(&self, i: usize, width: usize) -> String {
        let line = self.lines.get(i).map_or("", String::as_str);
        let mut out = String::with_capacity(width);
        out.push_str(line);
        out.push_str(&" ".repeat(width.saturating_sub(text_width(line))));
        out
    }
}

/// Assemble header, y ticks, grid rows, x axis and x ticks into a block.
#[must_use]
pub fn plot_block(header: &str, grid: &Grid, ticks: &Ticks) -> Block {
    let lw = text_width(&ticks.y_top).max(text_width(&ticks.y_bottom));
    let gutter = " ".repeat(LABEL_GUTTER);
    let blank = " ".repeat(lw);
    // Plot columns start after labels, gutter and the axis glyph.
    let offset = " ".repeat(lw + LABEL_GUTTER + 1);
    let rows = grid.rows();
    let last = rows.len().saturating_sub(1);

    let mut lines = Vec::with_capacity(rows.len() + 3);

    let mut head = offset.clone();
    push_centered(&mut head, header, grid.width());
    lines.push(head.trim_end().to_owned());

    for (i, row) in rows.iter().enumerate() {
        let (label, axis) = match i {
            0 => (ticks.y_top.as_str(), V_TICK),
            i if i == last => (ticks.y_bottom.as_str(), V_TICK),
            _ => (blank.as_str(), V),
        };
        let pad = " ".repeat(lw - text_width(label));
        lines.push(format!("{pad}{label}{gutter}{axis}{row}"));
    }

    let rule: String = std::iter::repeat_n(H, grid.width()).collect();
    lines.push(format!("{blank}{gutter}{BL}{rule}"));

    let (left, right) = (&ticks.x_left, &ticks.x_right);
    let room = grid.width().saturating_sub(text_width(left) + text_width(right));
    let spacer = " ".repeat(room.max(1));
    lines.push(format!("{offset}{left}{spacer}{right}").trim_end().to_owned());

    Block::new(lines)
}

/// Join lines into one newline-terminated string.
#[must_use]
pub fn join_lines(lines: &[String]) -> String {
    let mut out = String::new();
    for l in lines {
        out.push_str(l);
        out.push('\n');
    }
    out
}
