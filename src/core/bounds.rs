//! Scale calculator: axis domains + terminal size plumbing.

use terminal_size::{Height, Width, terminal_size};

use crate::core::series::Point;

/// Inclusive `[min, max]` over one axis.  Derived per render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    #[inline]
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Exact extrema of the finite values, or `None` when there are none.
    #[must_use]
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in values.into_iter().filter(|v| v.is_finite()) {
            low = low.min(v);
            high = high.max(v);
        }
        (low.is_finite() && high.is_finite()).then_some(Self::new(low, high))
    }

    #[inline]
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    #[inline]
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// `min == max` exactly; a span of any width, however small, still maps.
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(self) -> bool {
        self.min == self.max
    }

    /// Same domain, but a flat one gets +-0.5 of breathing room so the
    /// mapping step never divides by zero.
    #[must_use]
    pub fn padded(self) -> Self {
        if self.is_degenerate() {
            Self::new(self.min - 0.5, self.max + 0.5)
        } else {
            self
        }
    }

    /// Map `v` onto `0..cells`, `min` landing on 0 and `max` on `cells - 1`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn project(self, v: f64, cells: usize) -> usize {
        let d = self.padded();
        let last = cells.saturating_sub(1);
        let t = ((v - d.min) / d.span()).clamp(0.0, 1.0);
        ((t * last as f64).round() as usize).min(last)
    }

    /// Like [`Domain::project`] but measured from `max`: row 0 is the top.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn project_from_top(self, v: f64, cells: usize) -> usize {
        let d = self.padded();
        let last = cells.saturating_sub(1);
        let t = ((d.max - v) / d.span()).clamp(0.0, 1.0);
        ((t * last as f64).round() as usize).min(last)
    }
}

/// Which axis we're measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn pick(self, p: &Point) -> f64 {
        match self {
            Self::X => p.key,
            Self::Y => p.value,
        }
    }

    /// Domain of a single series, `None` if it is empty.
    #[must_use]
    pub fn domain(self, series: &[Point]) -> Option<Domain> {
        Domain::of(series.iter().map(|p| self.pick(p)))
    }

    /// Per-group domains.  With `fixed` every group receives the union of all
    /// groups so magnitudes stay comparable across small multiples.
    #[must_use]
    pub fn domains<S: AsRef<[Point]>>(self, groups: &[S], fixed: bool) -> Vec<Option<Domain>> {
        let own: Vec<Option<Domain>> = groups.iter().map(|s| self.domain(s.as_ref())).collect();
        if !fixed {
            return own;
        }
        let shared = own
            .iter()
            .flatten()
            .copied()
            .reduce(Domain::union);
        vec![shared; groups.len()]
    }
}

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Largest plot width that fits in `columns` next to `reserve` columns of
/// labels and chrome.
#[inline]
#[must_use]
pub fn fit_width(columns: usize, requested: usize, reserve: usize) -> usize {
    requested.min(columns.saturating_sub(reserve)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(f64, f64)]) -> Vec<Point> {
        v.iter().map(|&(k, y)| Point::new(k, y)).collect()
    }

    #[test]
    fn exact_extrema_without_padding() {
        let s = pts(&[(0.0, 3.0), (1.0, -2.0), (2.0, 7.5)]);
        assert_eq!(Axis::Y.domain(&s), Some(Domain::new(-2.0, 7.5)));
        assert_eq!(Axis::X.domain(&s), Some(Domain::new(0.0, 2.0)));
        assert_eq!(Axis::Y.domain(&[]), None);
    }

    #[test]
    fn flat_domain_projects_to_the_middle() {
        let d = Domain::new(4.0, 4.0);
        assert!(d.is_degenerate());
        assert_eq!(d.padded(), Domain::new(3.5, 4.5));
        assert_eq!(d.project(4.0, 21), 10);
    }

    #[test]
    fn tiny_spans_are_not_flat() {
        let d = Domain::new(1e-17, 9e-17);
        assert!(!d.is_degenerate());
        assert_eq!(d.padded(), d);
        assert_eq!(d.project_from_top(9e-17, 5), 0);
        assert_eq!(d.project_from_top(5e-17, 5), 2);
        assert_eq!(d.project_from_top(1e-17, 5), 4);
    }

    #[test]
    fn projection_hits_both_ends() {
        let d = Domain::new(10.0, 20.0);
        assert_eq!(d.project(10.0, 60), 0);
        assert_eq!(d.project(20.0, 60), 59);
        assert_eq!(d.project(15.0, 3), 1);
        assert_eq!(d.project(99.0, 3), 2);
        assert_eq!(d.project_from_top(20.0, 20), 0);
        assert_eq!(d.project_from_top(10.0, 20), 19);
    }

    #[test]
    fn fixed_domains_are_shared_independent_are_not() {
        let groups = vec![pts(&[(0.0, 1.0), (1.0, 2.0)]), pts(&[(0.0, 10.0), (5.0, 30.0)])];
        let own = Axis::Y.domains(&groups, false);
        assert_eq!(own[0], Some(Domain::new(1.0, 2.0)));
        assert_eq!(own[1], Some(Domain::new(10.0, 30.0)));

        let fixed = Axis::Y.domains(&groups, true);
        assert!(fixed.iter().all(|d| *d == Some(Domain::new(1.0, 30.0))));
        let fixed_x = Axis::X.domains(&groups, true);
        assert!(fixed_x.iter().all(|d| *d == Some(Domain::new(0.0, 5.0))));
    }

    #[test]
    fn fit_width_respects_terminal() {
        assert_eq!(fit_width(80, 60, 10), 60);
        assert_eq!(fit_width(40, 60, 10), 30);
        assert_eq!(fit_width(5, 60, 10), 1);
    }
}
