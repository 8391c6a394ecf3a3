use serde::{Deserialize, Serialize};

/// Visual configuration for a plate. Every field has a default, so a partial
/// JS object or JSON document is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlateConfig {
    /// Margin reserved left of the grid for row labels (px)
    pub left_offset: f64,
    /// Margin reserved above the grid for column labels (px)
    pub top_offset: f64,
    /// Largest font size used for well and axis labels (px)
    pub max_label_size: f64,
    /// Font family for all text
    pub font_family: String,
    /// Fill for the drag/hover preview overlay
    pub highlight_color: String,
    /// Fill for the committed selection overlay
    pub select_color: String,
    /// Dashed interior gridlines
    pub grid_line_color: String,
    /// Solid outer border
    pub border_color: String,
    /// Row letters and column numbers
    pub axis_label_color: String,
    /// Label color on light fills
    pub label_dark: String,
    /// Label color on dark fills
    pub label_light: String,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            left_offset: 24.0,
            top_offset: 24.0,
            max_label_size: 12.0,
            font_family: "monospace".to_string(),
            highlight_color: "rgba(163, 207, 255, 0.66)".to_string(),
            select_color: "rgba(23, 61, 166, 0.66)".to_string(),
            grid_line_color: "rgba(99, 99, 99, 0.33)".to_string(),
            border_color: "rgba(155, 155, 155, 1.0)".to_string(),
            axis_label_color: "#999".to_string(),
            label_dark: "black".to_string(),
            label_light: "white".to_string(),
        }
    }
}

impl PlateConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// CSS font shorthand at the given pixel size.
    pub fn font(&self, size: f64) -> String {
        format!("{size}px {}", self.font_family)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PlateConfig::from_json(r#"{"leftOffset": 40, "selectColor": "red"}"#).unwrap();
        assert_eq!(config.left_offset, 40.0);
        assert_eq!(config.top_offset, 24.0);
        assert_eq!(config.select_color, "red");
        assert_eq!(config.font_family, "monospace");
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = PlateConfig::from_json("{").unwrap_err();
        assert!(err.to_string().starts_with("Config:"));
    }

    #[test]
    fn test_font_shorthand() {
        assert_eq!(PlateConfig::default().font(12.0), "12px monospace");
        assert_eq!(PlateConfig::default().font(7.5), "7.5px monospace");
    }
}
