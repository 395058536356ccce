//! Chart datasets

use super::format::ValueFormat;
use super::surface::Color;
use serde::{Deserialize, Serialize};

/// One labelled value; position in the series is meaningful
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Ordered series plus how to draw and format it.
///
/// Immutable once handed to a chart; switching metric means building a new
/// dataset and replacing the old one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    points: Vec<SeriesPoint>,
    color: Color,
    format: ValueFormat,
}

impl ChartDataset {
    pub fn new(points: Vec<SeriesPoint>, color: Color, format: ValueFormat) -> Self {
        Self {
            points,
            color,
            format,
        }
    }

    /// Build from parallel label and value slices, extra entries are ignored
    pub fn from_pairs<S: AsRef<str>>(
        labels: &[S],
        values: &[f64],
        color: Color,
        format: ValueFormat,
    ) -> Self {
        let points = labels
            .iter()
            .zip(values)
            .map(|(label, &value)| SeriesPoint::new(label.as_ref(), value))
            .collect();
        Self::new(points, color, format)
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.label.as_str())
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn format(&self) -> ValueFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
