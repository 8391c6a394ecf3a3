use serde::{Deserialize, Serialize};

/// Grid topology: `rows` x `cols` wells, addressed row-major.
///
/// Serialized as the JS pair `[rows, cols]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Dimensions {
    pub rows: u32,
    pub cols: u32,
}

impl Dimensions {
    /// Both values must be at least 1; this is not checked.
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Number of wells.
    pub fn size(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Row-major index of a well, or `None` when outside the grid.
    pub fn index(self, row: u32, col: u32) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// Inverse of [`Dimensions::index`].
    #[allow(clippy::cast_possible_truncation)] // index < rows * cols, both u32
    pub fn coords_of(self, index: usize) -> Option<(u32, u32)> {
        if self.cols == 0 || index >= self.size() {
            return None;
        }
        let cols = self.cols as usize;
        Some(((index / cols) as u32, (index % cols) as u32))
    }

    /// Whether `coords` addresses a well inside the grid.
    pub fn contains(self, coords: WellCoords) -> bool {
        coords.row >= 0
            && coords.col >= 0
            && i64::from(coords.row) < i64::from(self.rows)
            && i64::from(coords.col) < i64::from(self.cols)
    }

    /// Clamp possibly out-of-grid coordinates onto the nearest well.
    #[allow(clippy::cast_sign_loss)] // clamped to >= 0 first
    pub fn clamp(self, coords: WellCoords) -> (u32, u32) {
        let max_row = i64::from(self.rows.saturating_sub(1));
        let max_col = i64::from(self.cols.saturating_sub(1));
        let row = i64::from(coords.row).clamp(0, max_row) as u32;
        let col = i64::from(coords.col).clamp(0, max_col) as u32;
        (row, col)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((rows, cols): (u32, u32)) -> Self {
        Self { rows, cols }
    }
}

impl From<Dimensions> for (u32, u32) {
    fn from(d: Dimensions) -> Self {
        (d.rows, d.cols)
    }
}

/// Pointer-derived well coordinates. Signed because a pointer can sit in the
/// axis margin or outside the container while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WellCoords {
    pub row: i32,
    pub col: i32,
}

impl WellCoords {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Convert a 0-based row index to plate row letters (A, B, ..., Z, AA, AB, ...)
#[allow(clippy::cast_possible_truncation)] // n % 26 < 26
pub fn row_to_label(row: u32) -> String {
    let mut result = String::new();
    let mut n = u64::from(row) + 1; // Convert to 1-based
    while n > 0 {
        n -= 1;
        let c = char::from(b'A' + (n % 26) as u8);
        result.insert(0, c);
        n /= 26;
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_row_to_label() {
        assert_eq!(row_to_label(0), "A");
        assert_eq!(row_to_label(7), "H");
        assert_eq!(row_to_label(25), "Z");
        assert_eq!(row_to_label(26), "AA");
        assert_eq!(row_to_label(27), "AB");
        assert_eq!(row_to_label(701), "ZZ");
    }

    #[test]
    fn test_index_row_major() {
        let dims = Dimensions::new(8, 12);
        assert_eq!(dims.size(), 96);
        assert_eq!(dims.index(0, 0), Some(0));
        assert_eq!(dims.index(1, 0), Some(12));
        assert_eq!(dims.index(7, 11), Some(95));
        assert_eq!(dims.index(8, 0), None);
        assert_eq!(dims.coords_of(13), Some((1, 1)));
        assert_eq!(dims.coords_of(96), None);
    }

    #[test]
    fn test_clamp_out_of_grid() {
        let dims = Dimensions::new(3, 4);
        assert_eq!(dims.clamp(WellCoords::new(-1, -5)), (0, 0));
        assert_eq!(dims.clamp(WellCoords::new(10, 10)), (2, 3));
        assert!(!dims.contains(WellCoords::new(-1, 0)));
        assert!(dims.contains(WellCoords::new(2, 3)));
    }

    #[test]
    fn test_serializes_as_pair() {
        let json = serde_json::to_string(&Dimensions::new(2, 3)).unwrap();
        assert_eq!(json, "[2,3]");
        let back: Dimensions = serde_json::from_str("[4,6]").unwrap();
        assert_eq!(back, Dimensions::new(4, 6));
    }
}
