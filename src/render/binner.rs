//! Index binning for line charts.
//!
//! When a series has more points than the plot has columns, it is cut into
//! `width` contiguous buckets by *index* (not by key), so irregular key
//! spacing never leaves buckets empty.  Each bucket collapses to the mean of
//! its keys and the mean of its values.

use tracing::debug;

use crate::core::series::Point;

/// Half-open index range of one bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bucket {
    start: usize, // inclusive
    end: usize,   // exclusive
}

/// `target` balanced buckets over `n` points.  Requires `n >= target > 0`,
/// which guarantees every bucket holds at least one point.
fn buckets(n: usize, target: usize) -> impl Iterator<Item = Bucket> {
    (0..target).map(move |i| Bucket {
        start: i * n / target,
        end: (i + 1) * n / target,
    })
}

#[allow(clippy::cast_precision_loss)]
fn mean(slice: &[Point]) -> Point {
    let len = slice.len() as f64;
    let (k, v) = slice
        .iter()
        .fold((0.0, 0.0), |(k, v), p| (k + p.key, v + p.value));
    Point::new(k / len, v / len)
}

/// Reduce `series` to at most `width` points.
///
/// Series that already fit (or a zero width) pass through unchanged, so
/// applying this twice with the same width is a no-op.
#[must_use]
pub fn downsample(series: &[Point], width: usize) -> Vec<Point> {
    let n = series.len();
    if width == 0 || n <= width {
        return series.to_vec();
    }
    debug!(from = n, to = width, "downsampling line series");
    buckets(n, width)
        .map(|b| mean(&series[b.start..b.end]))
        .collect()
}
