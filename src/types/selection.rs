use serde::{Deserialize, Serialize};

use super::{Dimensions, WellCoords};

/// One flag per well, row-major. Used for both the committed selection and
/// the transient drag/hover highlight.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateSelection(Vec<bool>);

impl PlateSelection {
    /// All wells unselected.
    pub fn empty(dimensions: Dimensions) -> Self {
        Self(vec![false; dimensions.size()])
    }

    /// The axis-aligned rectangle spanned by two corner wells, inclusive.
    /// Corners outside the grid are clamped onto its edge.
    pub fn rect(dimensions: Dimensions, a: WellCoords, b: WellCoords) -> Self {
        let mut selection = Self::empty(dimensions);
        selection.apply_rect(dimensions, a, b);
        selection
    }

    /// Mark every well in the rectangle spanned by `a` and `b` as selected.
    pub fn apply_rect(&mut self, dimensions: Dimensions, a: WellCoords, b: WellCoords) {
        let (row_a, col_a) = dimensions.clamp(a);
        let (row_b, col_b) = dimensions.clamp(b);
        for row in row_a.min(row_b)..=row_a.max(row_b) {
            for col in col_a.min(col_b)..=col_a.max(col_b) {
                if let Some(flag) = dimensions
                    .index(row, col)
                    .and_then(|index| self.0.get_mut(index))
                {
                    *flag = true;
                }
            }
        }
    }

    /// Number of selected wells.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|selected| **selected).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|selected| *selected)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Row-major indices of the selected wells.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, selected)| selected.then_some(index))
    }

    /// Number of flags (the plate's well count).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Truncate or pad with `false` to `len`, keeping the existing prefix.
    pub fn resized(&self, len: usize) -> Self {
        Self(resize_cells(&self.0, len, false))
    }
}

impl From<Vec<bool>> for PlateSelection {
    fn from(flags: Vec<bool>) -> Self {
        Self(flags)
    }
}

/// Truncate or pad a per-well array to `len`, preserving the prefix.
pub fn resize_cells<T: Clone>(cells: &[T], len: usize, empty: T) -> Vec<T> {
    let mut resized: Vec<T> = cells.iter().take(len).cloned().collect();
    resized.resize(len, empty);
    resized
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_is_inclusive_and_order_independent() {
        let dims = Dimensions::new(3, 3);
        let forward = PlateSelection::rect(dims, WellCoords::new(0, 0), WellCoords::new(1, 1));
        let backward = PlateSelection::rect(dims, WellCoords::new(1, 1), WellCoords::new(0, 0));
        assert_eq!(forward, backward);
        assert_eq!(forward.indices().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_rect_clamps_outside_corner() {
        let dims = Dimensions::new(2, 3);
        let sel = PlateSelection::rect(dims, WellCoords::new(1, 1), WellCoords::new(-4, 9));
        assert_eq!(sel.indices().collect::<Vec<_>>(), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_single_cell_rect() {
        let dims = Dimensions::new(4, 4);
        let sel = PlateSelection::rect(dims, WellCoords::new(2, 3), WellCoords::new(2, 3));
        assert_eq!(sel.count(), 1);
        assert!(sel.is_selected(11));
    }

    #[test]
    fn test_resize_cells_truncates_and_pads() {
        assert_eq!(resize_cells(&[1, 2, 3, 4], 2, 0), vec![1, 2]);
        assert_eq!(resize_cells(&[1, 2], 4, 0), vec![1, 2, 0, 0]);
        assert!(resize_cells::<u8>(&[], 0, 0).is_empty());
    }
}
