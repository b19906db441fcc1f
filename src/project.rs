use crate::errors::DiaError;
use crate::palette;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fixed canvas size handed to the chart renderer. Not persisted.
pub const CANVAS_WIDTH: u32 = 10;
pub const CANVAS_HEIGHT: u32 = 6;

pub const DEFAULT_NAME: &str = "New Project";
pub const DEFAULT_TITLE: &str = "My Chart";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current local time in the ISO-8601 form written to `.dia` files.
#[must_use]
pub fn now_timestamp() -> String {
    Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Scatter,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [Self::Bar, Self::Line, Self::Pie, Self::Scatter];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "Bar",
            Self::Line => "Line",
            Self::Pie => "Pie",
            Self::Scatter => "Scatter",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown chart type {s:?}"))
    }
}

/// One series record: label, value and the color it is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
    pub color: String,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self { label: label.into(), value, color: color.into() }
    }
}

/// The unit of persistence: chart configuration plus its data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub created: String,
    pub modified: String,
    pub series: Vec<DataPoint>,
    pub chart_type: ChartType,
    pub color_scheme: String,
    pub title: String,
    /// Overrides not tied to a data point. Kept verbatim through round-trips.
    pub custom_colors: BTreeMap<String, String>,
}

impl Default for Project {
    fn default() -> Self {
        let now = now_timestamp();
        Self {
            name: DEFAULT_NAME.to_string(),
            created: now.clone(),
            modified: now,
            series: Vec::new(),
            chart_type: ChartType::default(),
            color_scheme: palette::DEFAULT_SCHEME.to_string(),
            title: DEFAULT_TITLE.to_string(),
            custom_colors: BTreeMap::new(),
        }
    }
}

impl Project {
    /// Create an empty project. The name is trimmed and must not be empty.
    pub fn new(name: &str) -> Result<Self, DiaError> {
        let name = validate_name(name)?;
        Ok(Self { name, ..Self::default() })
    }

    /// Stamp `modified` with the current time.
    pub fn touch(&mut self) {
        self.modified = now_timestamp();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|p| p.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series.iter().map(|p| p.value)
    }

    /// Append a point colored with the next color of the active scheme.
    pub fn add_point(&mut self, label: impl Into<String>, value: f64) {
        let color = palette::color_at(&self.color_scheme, self.series.len());
        self.series.push(DataPoint::new(label, value, color));
    }

    pub fn push_point(&mut self, point: DataPoint) {
        self.series.push(point);
    }

    pub fn remove_point(&mut self, index: usize) -> Result<DataPoint, DiaError> {
        self.check_index(index)?;
        Ok(self.series.remove(index))
    }

    pub fn recolor_point(&mut self, index: usize, color: impl Into<String>) -> Result<(), DiaError> {
        self.check_index(index)?;
        self.series[index].color = color.into();
        Ok(())
    }

    pub fn clear_series(&mut self) {
        self.series.clear();
    }

    /// Switch scheme and recolor every point cyclically from it.
    pub fn set_color_scheme(&mut self, scheme: &str) {
        self.color_scheme = scheme.to_string();
        for (i, point) in self.series.iter_mut().enumerate() {
            point.color = palette::color_at(scheme, i).to_string();
        }
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
    }

    /// Empty or blank titles fall back to the placeholder title.
    pub fn set_title(&mut self, title: &str) {
        let title = title.trim();
        self.title = if title.is_empty() { DEFAULT_TITLE.to_string() } else { title.to_string() };
    }

    /// Append imported (label, value) pairs, continuing the scheme's color cycle.
    pub fn append_pairs<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        for (label, value) in pairs {
            self.add_point(label, value);
        }
    }

    fn check_index(&self, index: usize) -> Result<(), DiaError> {
        if index < self.series.len() {
            Ok(())
        } else {
            Err(DiaError::IndexOutOfRange { index, len: self.series.len() })
        }
    }
}

/// Trim a project name and reject empty results.
pub fn validate_name(name: &str) -> Result<String, DiaError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DiaError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}
