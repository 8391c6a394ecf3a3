//! Pointer state for rectangular drag selection.

use crate::types::{PlateSelection, WellCoords};

/// An in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    /// Well under the pointer when the button went down.
    pub anchor: WellCoords,
    /// Committed selection from before the drag started.
    pub previous_selection: PlateSelection,
}

/// Tracks hover and drag across pointer events. `drag` is `None` while idle.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pub(crate) inside: bool,
    pub(crate) drag: Option<Drag>,
    /// Last well the pointer was mapped to.
    pub(crate) last: WellCoords,
}

impl PointerTracker {
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    /// Whether pointer movement belongs to this plate (the host should
    /// suppress default handling such as text selection).
    pub fn captures_movement(&self) -> bool {
        self.inside || self.drag.is_some()
    }
}

/// Outcome of releasing a drag over `highlight`.
///
/// A single-well drag that exactly matches the previous committed selection
/// deselects it; anything else commits the highlight.
pub fn release(drag: &Drag, highlight: &PlateSelection) -> Option<PlateSelection> {
    let toggle_off = highlight.count() == 1 && drag.previous_selection == *highlight;
    if toggle_off {
        None
    } else {
        Some(highlight.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Dimensions;

    fn single(dims: Dimensions, row: i32, col: i32) -> PlateSelection {
        PlateSelection::rect(dims, WellCoords::new(row, col), WellCoords::new(row, col))
    }

    #[test]
    fn test_release_same_single_well_toggles_off() {
        let dims = Dimensions::new(3, 3);
        let drag = Drag {
            anchor: WellCoords::new(1, 1),
            previous_selection: single(dims, 1, 1),
        };
        assert_eq!(release(&drag, &single(dims, 1, 1)), None);
    }

    #[test]
    fn test_release_other_single_well_commits() {
        let dims = Dimensions::new(3, 3);
        let drag = Drag {
            anchor: WellCoords::new(0, 0),
            previous_selection: single(dims, 1, 1),
        };
        assert_eq!(release(&drag, &single(dims, 0, 0)), Some(single(dims, 0, 0)));
    }

    #[test]
    fn test_release_multi_well_commits_even_if_equal() {
        let dims = Dimensions::new(3, 3);
        let block = PlateSelection::rect(dims, WellCoords::new(0, 0), WellCoords::new(1, 1));
        let drag = Drag {
            anchor: WellCoords::new(0, 0),
            previous_selection: block.clone(),
        };
        assert_eq!(release(&drag, &block), Some(block));
    }
}
