//! Run-time configuration objects + fluent builders.

use crate::core::{
    constants::{
        DEFAULT_BAR_WIDTH, DEFAULT_PER_ROW, DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH,
        MIN_PLOT_HEIGHT, MIN_PLOT_WIDTH,
    },
    error::ConfigError,
    format::Formatter,
    value::{KeyKind, Value},
};

fn at_least(name: &'static str, value: usize, min: usize) -> Result<usize, ConfigError> {
    if value < min {
        return Err(ConfigError::InvalidDimension { name, value, min });
    }
    Ok(value)
}

// --- Bar ---

/// Immutable bar chart parameters.
#[derive(Debug, Clone)]
pub struct BarConfig {
    pub width: usize,
    pub title: Option<String>,
    pub total_label: Option<String>,
    pub compact: bool,
    /// Value that maps to a full-width bar; defaults to the largest value.
    pub domain_max: Option<f64>,
    pub format_labels: Formatter,
    pub format_values: Formatter,
}

impl BarConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> BarConfigBuilder {
        BarConfigBuilder::default()
    }
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BAR_WIDTH,
            title: None,
            total_label: None,
            compact: false,
            domain_max: None,
            format_labels: Formatter::default(),
            format_values: Formatter::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BarConfigBuilder {
    width: Option<usize>,
    title: Option<String>,
    total_label: Option<String>,
    compact: bool,
    domain_max: Option<f64>,
    format_labels: Option<Formatter>,
    format_values: Option<Formatter>,
}

impl BarConfigBuilder {
    #[inline]
    #[must_use]
    pub fn width(mut self, w: usize) -> Self {
        self.width = Some(w);
        self
    }
    #[inline]
    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn title_opt(mut self, t: Option<String>) -> Self {
        self.title = t;
        self
    }
    #[inline]
    #[must_use]
    pub fn total_label(mut self, t: impl Into<String>) -> Self {
        self.total_label = Some(t.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn total_label_opt(mut self, t: Option<String>) -> Self {
        self.total_label = t;
        self
    }
    #[inline]
    #[must_use]
    pub fn compact(mut self, c: bool) -> Self {
        self.compact = c;
        self
    }
    #[inline]
    #[must_use]
    pub fn domain_max(mut self, v: f64) -> Self {
        self.domain_max = Some(v);
        self
    }
    #[inline]
    #[must_use]
    pub fn format_labels(mut self, f: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        self.format_labels = Some(Formatter::new(f));
        self
    }
    #[inline]
    #[must_use]
    pub fn format_values(mut self, f: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        self.format_values = Some(Formatter::new(f));
        self
    }

    pub fn build(self) -> Result<BarConfig, ConfigError> {
        Ok(BarConfig {
            width: at_least("width", self.width.unwrap_or(DEFAULT_BAR_WIDTH), 1)?,
            title: self.title,
            total_label: self.total_label,
            compact: self.compact,
            domain_max: self.domain_max.filter(|m| m.is_finite() && *m > 0.0),
            format_labels: self.format_labels.unwrap_or_default(),
            format_values: self.format_values.unwrap_or_default(),
        })
    }
}

// --- Dot / line ---

/// Immutable dot/line chart parameters.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub width: usize,
    pub height: usize,
    pub title: Option<String>,
    pub x_kind: Option<KeyKind>,
    pub format_x: Formatter,
    pub format_y: Formatter,
    /// Field whose distinct values split the data into small multiples.
    pub small_multiples: Option<String>,
    pub fixed_scales: bool,
    pub small_multiples_per_row: usize,
}

impl PlotConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> PlotConfigBuilder {
        PlotConfigBuilder::default()
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLOT_WIDTH,
            height: DEFAULT_PLOT_HEIGHT,
            title: None,
            x_kind: None,
            format_x: Formatter::default(),
            format_y: Formatter::default(),
            small_multiples: None,
            fixed_scales: false,
            small_multiples_per_row: DEFAULT_PER_ROW,
        }
    }
}

#[derive(Debug, Default)]
pub struct PlotConfigBuilder {
    width: Option<usize>,
    height: Option<usize>,
    title: Option<String>,
    x_kind: Option<KeyKind>,
    format_x: Option<Formatter>,
    format_y: Option<Formatter>,
    small_multiples: Option<String>,
    fixed_scales: bool,
    per_row: Option<usize>,
}

impl PlotConfigBuilder {
    #[inline]
    #[must_use]
    pub fn width(mut self, w: usize) -> Self {
        self.width = Some(w);
        self
    }
    #[inline]
    #[must_use]
    pub fn height(mut self, h: usize) -> Self {
        self.height = Some(h);
        self
    }
    #[inline]
    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn title_opt(mut self, t: Option<String>) -> Self {
        self.title = t;
        self
    }
    #[inline]
    #[must_use]
    pub fn x_kind(mut self, k: KeyKind) -> Self {
        self.x_kind = Some(k);
        self
    }
    #[inline]
    #[must_use]
    pub fn format_x(mut self, f: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        self.format_x = Some(Formatter::new(f));
        self
    }
    #[inline]
    #[must_use]
    pub fn format_y(mut self, f: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        self.format_y = Some(Formatter::new(f));
        self
    }
    #[inline]
    #[must_use]
    pub fn small_multiples(mut self, field: impl Into<String>) -> Self {
        self.small_multiples = Some(field.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn small_multiples_opt(mut self, field: Option<String>) -> Self {
        self.small_multiples = field;
        self
    }
    #[inline]
    #[must_use]
    pub fn fixed_scales(mut self, f: bool) -> Self {
        self.fixed_scales = f;
        self
    }
    #[inline]
    #[must_use]
    pub fn small_multiples_per_row(mut self, n: usize) -> Self {
        self.per_row = Some(n);
        self
    }

    pub fn build(self) -> Result<PlotConfig, ConfigError> {
        Ok(PlotConfig {
            width: at_least("width", self.width.unwrap_or(DEFAULT_PLOT_WIDTH), MIN_PLOT_WIDTH)?,
            height: at_least(
                "height",
                self.height.unwrap_or(DEFAULT_PLOT_HEIGHT),
                MIN_PLOT_HEIGHT,
            )?,
            title: self.title,
            x_kind: self.x_kind,
            format_x: self.format_x.unwrap_or_default(),
            format_y: self.format_y.unwrap_or_default(),
            small_multiples: self.small_multiples,
            fixed_scales: self.fixed_scales,
            small_multiples_per_row: at_least(
                "small_multiples_per_row",
                self.per_row.unwrap_or(DEFAULT_PER_ROW),
                1,
            )?,
        })
    }
}

/// Ergonomic `?` on a builder chain.
impl From<BarConfigBuilder> for Result<BarConfig, ConfigError> {
    fn from(b: BarConfigBuilder) -> Self {
        b.build()
    }
}

impl From<PlotConfigBuilder> for Result<PlotConfig, ConfigError> {
    fn from(b: PlotConfigBuilder) -> Self {
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = PlotConfig::builder().build().unwrap();
        assert_eq!((c.width, c.height), (60, 20));
        assert_eq!(c.small_multiples_per_row, 3);
        assert!(!c.fixed_scales);

        let b = BarConfig::builder().build().unwrap();
        assert_eq!(b.width, 40);
        assert!(!b.compact);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(matches!(
            PlotConfig::builder().height(1).build(),
            Err(ConfigError::InvalidDimension { name: "height", .. })
        ));
        assert!(PlotConfig::builder().small_multiples_per_row(0).build().is_err());
        assert!(BarConfig::builder().width(0).build().is_err());
    }

    #[test]
    fn nonsense_domain_max_is_ignored() {
        let b = BarConfig::builder().domain_max(-3.0).build().unwrap();
        assert_eq!(b.domain_max, None);
    }
}
