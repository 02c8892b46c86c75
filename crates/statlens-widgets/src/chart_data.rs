//! Chart data model shared by the statistics widgets.
//!
//! A chart is one x axis of timestamps (milliseconds since the Unix epoch)
//! plus any number of named, colored series aligned to it. Construction is
//! validated so widgets can index every series by any valid x index.

use serde::{Deserialize, Serialize};
use statlens_core::Color;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while building or loading chart data.
#[derive(Debug, Error)]
pub enum ChartDataError {
    /// The x axis has no points.
    #[error("chart has no x values")]
    EmptyX,

    /// A series does not have one value per x point.
    #[error("line {id} has {actual} values, expected {expected}")]
    LengthMismatch {
        /// Offending line id
        id: i32,
        /// Number of x points
        expected: usize,
        /// Number of values in the line
        actual: usize,
    },

    /// Two series share an id.
    #[error("duplicate line id {0}")]
    DuplicateId(i32),

    /// The JSON document could not be parsed.
    #[error("invalid chart JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One named, colored series of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLine {
    /// Stable identifier, used for legend toggles
    pub id: i32,
    /// Display name
    pub name: String,
    /// Series color
    #[serde(with = "hex_color")]
    pub color: Color,
    /// One value per x point
    pub y: Vec<f64>,
}

impl ChartLine {
    /// Create a series.
    #[must_use]
    pub fn new(id: i32, name: impl Into<String>, color: Color, y: Vec<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            y,
        }
    }
}

#[derive(Deserialize)]
struct RawChartData {
    x: Vec<i64>,
    #[serde(default)]
    lines: Vec<ChartLine>,
}

impl TryFrom<RawChartData> for ChartData {
    type Error = ChartDataError;

    fn try_from(raw: RawChartData) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.lines)
    }
}

/// Validated chart data: x timestamps plus aligned series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawChartData")]
pub struct ChartData {
    x: Vec<i64>,
    lines: Vec<ChartLine>,
}

impl ChartData {
    /// Build chart data, checking that every series matches the x axis.
    pub fn new(x: Vec<i64>, lines: Vec<ChartLine>) -> Result<Self, ChartDataError> {
        if x.is_empty() {
            return Err(ChartDataError::EmptyX);
        }
        let mut ids = HashSet::with_capacity(lines.len());
        for line in &lines {
            if line.y.len() != x.len() {
                return Err(ChartDataError::LengthMismatch {
                    id: line.id,
                    expected: x.len(),
                    actual: line.y.len(),
                });
            }
            if !ids.insert(line.id) {
                return Err(ChartDataError::DuplicateId(line.id));
            }
        }
        Ok(Self { x, lines })
    }

    /// Parse chart data from JSON (`{"x": [...], "lines": [...]}`).
    pub fn from_json_str(json: &str) -> Result<Self, ChartDataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// X axis timestamps in milliseconds.
    #[must_use]
    pub fn x(&self) -> &[i64] {
        &self.x
    }

    /// All series.
    #[must_use]
    pub fn lines(&self) -> &[ChartLine] {
        &self.lines
    }

    /// Number of x points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the chart has no x points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Largest absolute value over all series, `0.0` without series.
    #[must_use]
    pub fn max_absolute_value(&self) -> f64 {
        self.lines
            .iter()
            .flat_map(|line| line.y.iter())
            .map(|v| v.abs())
            .fold(0.0, f64::max)
    }
}

/// Serde adapter storing colors as `#rrggbb` (or `#rrggbbaa`) strings.
pub mod hex_color {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use statlens_core::Color;

    /// Serialize a color as a hex string.
    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        if color.a < 1.0 {
            let alpha = (color.a * 255.0).round() as u8;
            serializer.serialize_str(&format!("{}{alpha:02x}", color.to_hex()))
        } else {
            serializer.serialize_str(&color.to_hex())
        }
    }

    /// Deserialize a color from a hex string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::from_hex(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i32, y: Vec<f64>) -> ChartLine {
        ChartLine::new(id, format!("line {id}"), Color::BLACK, y)
    }

    #[test]
    fn test_chart_data_new() {
        let data = ChartData::new(vec![1, 2, 3], vec![line(1, vec![1.0, 2.0, 3.0])]).unwrap();
        assert_eq!(data.len(), 3);
        assert!(!data.is_empty());
        assert_eq!(data.x(), &[1, 2, 3]);
        assert_eq!(data.lines().len(), 1);
    }

    #[test]
    fn test_chart_data_without_lines_is_valid() {
        let data = ChartData::new(vec![1], vec![]).unwrap();
        assert_eq!(data.max_absolute_value(), 0.0);
    }

    #[test]
    fn test_chart_data_empty_x() {
        assert!(matches!(
            ChartData::new(vec![], vec![]),
            Err(ChartDataError::EmptyX)
        ));
    }

    #[test]
    fn test_chart_data_length_mismatch() {
        let err = ChartData::new(vec![1, 2], vec![line(7, vec![1.0])]).unwrap_err();
        assert!(matches!(
            err,
            ChartDataError::LengthMismatch {
                id: 7,
                expected: 2,
                actual: 1
            }
        ));
        assert_eq!(err.to_string(), "line 7 has 1 values, expected 2");
    }

    #[test]
    fn test_chart_data_duplicate_id() {
        let err = ChartData::new(vec![1], vec![line(3, vec![1.0]), line(3, vec![2.0])]).unwrap_err();
        assert!(matches!(err, ChartDataError::DuplicateId(3)));
    }

    #[test]
    fn test_max_absolute_value_uses_magnitude() {
        let data = ChartData::new(
            vec![1, 2],
            vec![line(1, vec![10.0, -250.0]), line(2, vec![100.0, 3.0])],
        )
        .unwrap();
        assert_eq!(data.max_absolute_value(), 250.0);
    }

    #[test]
    fn test_from_json() {
        let json = r##"{
            "x": [1705276800000, 1705363200000],
            "lines": [
                {"id": 0, "name": "Joined", "color": "#3497ed", "y": [12, 40]},
                {"id": 1, "name": "Left", "color": "#f34c44", "y": [3, 1]}
            ]
        }"##;
        let data = ChartData::from_json_str(json).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.lines()[0].name, "Joined");
        assert_eq!(data.lines()[1].color.to_hex(), "#f34c44");
        assert_eq!(data.lines()[0].y, vec![12.0, 40.0]);
    }

    #[test]
    fn test_from_json_validates() {
        let json = r##"{"x": [1, 2], "lines": [{"id": 0, "name": "a", "color": "#000000", "y": [1]}]}"##;
        let err = ChartData::from_json_str(json).unwrap_err();
        assert!(matches!(err, ChartDataError::Json(_)));
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn test_from_json_bad_color() {
        let json = r#"{"x": [1], "lines": [{"id": 0, "name": "a", "color": "blue", "y": [1]}]}"#;
        assert!(ChartData::from_json_str(json).is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_hex_colors() {
        let data = ChartData::new(
            vec![5],
            vec![ChartLine::new(
                1,
                "a",
                Color::from_hex("#10203080").unwrap(),
                vec![1.5],
            )],
        )
        .unwrap();
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"#10203080\""));
        let back = ChartData::from_json_str(&json).unwrap();
        assert_eq!(back.lines()[0].color.to_hex(), "#102030");
    }
}
