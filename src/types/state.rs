use serde::{Deserialize, Serialize};

use super::{resize_cells, Dimensions, PlateSelection, WellLabel};

/// Optional CSS fill color per well.
pub type PlateColors = Vec<Option<String>>;

/// Optional label per well.
pub type PlateLabels = Vec<Option<WellLabel>>;

/// Complete visual state of a plate. Replaced as a whole on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateState {
    pub dimensions: Dimensions,
    pub labels: PlateLabels,
    pub colors: PlateColors,
    pub selection: PlateSelection,
    pub highlight: PlateSelection,
}

impl PlateState {
    /// Default-empty state: no colors, no labels, nothing selected.
    pub fn empty(dimensions: Dimensions) -> Self {
        let size = dimensions.size();
        Self {
            dimensions,
            labels: vec![None; size],
            colors: vec![None; size],
            selection: PlateSelection::empty(dimensions),
            highlight: PlateSelection::empty(dimensions),
        }
    }

    /// Produce the next snapshot from a partial update.
    ///
    /// When the dimensions change, every per-well array the update does not
    /// supply is resized to the new well count, keeping its prefix.
    pub fn merged(&self, update: PlateUpdate) -> Self {
        let dimensions = update.dimensions.unwrap_or(self.dimensions);
        let resize = dimensions != self.dimensions;
        let size = dimensions.size();

        Self {
            dimensions,
            labels: update.labels.unwrap_or_else(|| {
                if resize {
                    resize_cells(&self.labels, size, None)
                } else {
                    self.labels.clone()
                }
            }),
            colors: update.colors.unwrap_or_else(|| {
                if resize {
                    resize_cells(&self.colors, size, None)
                } else {
                    self.colors.clone()
                }
            }),
            selection: update.selection.unwrap_or_else(|| {
                if resize {
                    self.selection.resized(size)
                } else {
                    self.selection.clone()
                }
            }),
            highlight: update.highlight.unwrap_or_else(|| {
                if resize {
                    self.highlight.resized(size)
                } else {
                    self.highlight.clone()
                }
            }),
        }
    }
}

/// Partial state; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateUpdate {
    pub dimensions: Option<Dimensions>,
    pub labels: Option<PlateLabels>,
    pub colors: Option<PlateColors>,
    pub selection: Option<PlateSelection>,
    pub highlight: Option<PlateSelection>,
}

impl PlateUpdate {
    pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn labels(mut self, labels: PlateLabels) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn colors(mut self, colors: PlateColors) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn selection(mut self, selection: PlateSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn highlight(mut self, highlight: PlateSelection) -> Self {
        self.highlight = Some(highlight);
        self
    }
}
