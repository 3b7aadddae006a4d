//! Domain-space samples to a fixed character grid.
//!
//! ### Workflow
//! 1. [`Projection`] maps a [`Point`] to a [`Cell`]: column 0 is the key
//!    minimum, row 0 is the value *maximum*.
//! 2. Dot charts [`Grid::plot`] one marker per sample; a cell hit twice is
//!    still one marker.
//! 3. Line charts [`Grid::line_to`] between consecutive cells with
//!    Bresenham stepping, giving an 8-connected path with no holes.
//!
//! Bars never touch the grid; [`bar_length`] is all they need.

use crate::core::{
    bounds::Domain,
    constants::{EMPTY, MARKER},
    series::Point,
};

/// `(col, row)` position inside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

/// The x/y domains of one plot, fixed to a grid size.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub x: Domain,
    pub y: Domain,
    pub width: usize,
    pub height: usize,
}

impl Projection {
    #[must_use]
    pub fn new(x: Domain, y: Domain, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub fn cell(&self, p: Point) -> Cell {
        Cell {
            col: self.x.project(p.key, self.width),
            row: self.y.project_from_top(p.value, self.height),
        }
    }
}

/// Row-major `height × width` character buffer.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Out-of-range cells are ignored.
    #[inline]
    pub fn set(&mut self, cell: Cell, ch: char) {
        if cell.col < self.width && cell.row < self.height {
            self.cells[cell.row * self.width + cell.col] = ch;
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<char> {
        (cell.col < self.width && cell.row < self.height)
            .then(|| self.cells[cell.row * self.width + cell.col])
    }

    #[inline]
    pub fn plot(&mut self, cell: Cell) {
        self.set(cell, MARKER);
    }

    /// Mark every cell on the straight path `from..=to`.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn line_to(&mut self, from: Cell, to: Cell) {
        let (mut x, mut y) = (from.col as isize, from.row as isize);
        let (x1, y1) = (to.col as isize, to.row as isize);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(Cell {
                col: x as usize,
                row: y as usize,
            });
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Marked cells, top row first then left to right.
    #[must_use]
    pub fn marked(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != EMPTY)
            .map(|(i, _)| Cell {
                col: i % self.width,
                row: i / self.width,
            })
            .collect()
    }

    /// One string per row, top first, every row exactly `width` chars.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|r| r.iter().collect())
            .collect()
    }
}

/// Dots: one marker per sample.
#[must_use]
pub fn scatter(points: &[Point], proj: &Projection) -> Grid {
    let mut grid = Grid::new(proj.width, proj.height);
    for p in points {
        grid.plot(proj.cell(*p));
    }
    grid
}

/// Lines: consecutive samples joined; a lone sample is a single marker.
#[must_use]
pub fn polyline(points: &[Point], proj: &Projection) -> Grid {
    let mut grid = Grid::new(proj.width, proj.height);
    let cells: Vec<Cell> = points.iter().map(|p| proj.cell(*p)).collect();
    match cells.as_slice() {
        [] => {}
        [only] => grid.plot(*only),
        _ => {
            for w in cells.windows(2) {
                grid.line_to(w[0], w[1]);
            }
        }
    }
    grid
}

/// Bar length in characters: `round(value / max * width)`.
///
/// Zero, negative and non-positive-max cases are empty bars; values above
/// `max` are capped at `width`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if value <= 0.0 || max <= 0.0 || !value.is_finite() || !max.is_finite() {
        return 0;
    }
    let ratio = (value / max).min(1.0);
    ((ratio * width as f64).round() as usize).min(width)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn proj(w: usize, h: usize) -> Projection {
        Projection::new(Domain::new(0.0, 10.0), Domain::new(0.0, 10.0), w, h)
    }

    #[test]
    fn corners_map_to_corners() {
        let p = proj(11, 11);
        assert_eq!(p.cell(Point::new(0.0, 0.0)), Cell { col: 0, row: 10 });
        assert_eq!(p.cell(Point::new(10.0, 10.0)), Cell { col: 10, row: 0 });
    }

    #[test]
    fn overplotting_marks_a_cell_once() {
        let g = scatter(
            &[Point::new(5.0, 5.0), Point::new(5.0, 5.0), Point::new(5.01, 5.0)],
            &proj(11, 11),
        );
        assert_eq!(g.marked(), vec![Cell { col: 5, row: 5 }]);
    }

    #[test]
    fn steep_line_has_no_vertical_gaps() {
        let mut g = Grid::new(5, 10);
        g.line_to(Cell { col: 0, row: 9 }, Cell { col: 4, row: 0 });
        let cells = g.marked();
        for row in 0..10 {
            assert!(cells.iter().any(|c| c.row == row), "row {row} empty");
        }
        assert_eq!(g.get(Cell { col: 0, row: 9 }), Some(MARKER));
        assert_eq!(g.get(Cell { col: 4, row: 0 }), Some(MARKER));
    }

    #[test]
    fn flat_line_fills_every_column() {
        let g = polyline(&[Point::new(0.0, 3.0), Point::new(10.0, 3.0)], &proj(8, 4));
        let cells = g.marked();
        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|c| c.row == cells[0].row));
    }

    #[test]
    fn degenerate_domains_still_render() {
        let flat = Domain::new(7.0, 7.0);
        let p = Projection::new(flat, flat, 60, 20);
        let g = polyline(&[Point::new(7.0, 7.0)], &p);
        assert_eq!(g.marked().len(), 1);
        assert!(g.rows().iter().all(|r| r.chars().count() == 60));
        assert_eq!(g.rows().len(), 20);
    }

    #[test]
    fn bars_scale_to_max() {
        assert_eq!(bar_length(10.0, 10.0, 10), 10);
        assert_eq!(bar_length(5.0, 10.0, 10), 5);
        assert_eq!(bar_length(-5.0, 10.0, 10), 0);
        assert_eq!(bar_length(0.0, 10.0, 10), 0);
        assert_eq!(bar_length(25.0, 10.0, 10), 10);
        assert_eq!(bar_length(3.0, 0.0, 10), 0);
    }

    proptest! {
        #[test]
        fn prop_bar_length_monotone_in_value(
            a in 0.0f64..1e6,
            b in 0.0f64..1e6,
            width in 1usize..200,
        ) {
            let max = a.max(b).max(1.0);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(bar_length(lo, max, width) <= bar_length(hi, max, width));
        }

        #[test]
        fn prop_lines_stay_connected(
            c0 in 0usize..40, r0 in 0usize..15,
            c1 in 0usize..40, r1 in 0usize..15,
        ) {
            let mut g = Grid::new(40, 15);
            g.line_to(Cell { col: c0, row: r0 }, Cell { col: c1, row: r1 });
            let (lo, hi) = (c0.min(c1), c0.max(c1));
            for col in lo..=hi {
                prop_assert!(g.marked().iter().any(|c| c.col == col));
            }
        }
    }
}
