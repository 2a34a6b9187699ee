use alloc::vec::Vec;

/// Pixel borders of the N column bands the grid width is divided into.
///
/// `borders()[0] == 0`, `borders()[N] == total_width()`, and the widths
/// differ by at most one pixel: the division remainder is spread across the
/// bands with a running accumulator (largest-remainder method), so no
/// rounding pixels are lost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnBands {
    borders: Vec<i32>,
    unit: i32,
    width: i32,
}

impl ColumnBands {
    pub fn new(total_width: i32, columns: usize) -> Self {
        let mut bands = Self::default();
        bands.recompute(total_width, columns);
        bands
    }

    /// Recomputes the borders if the geometry changed; returns whether it did.
    pub(crate) fn update(&mut self, total_width: i32, columns: usize) -> bool {
        if self.width == total_width && self.borders.len() == columns + 1 {
            return false;
        }
        self.recompute(total_width, columns);
        true
    }

    fn recompute(&mut self, total_width: i32, columns: usize) {
        self.width = total_width;
        self.unit = total_width / columns as i32;
        self.borders.clear();
        self.borders.reserve_exact(columns + 1);
        self.borders.push(0);

        let remainder = total_width % columns as i32;
        let mut consumed = 0;
        let mut carry = 0;
        for _ in 0..columns {
            let mut band = self.unit;
            carry += remainder;
            if carry > 0 && columns as i32 - carry < remainder {
                band += 1;
                carry -= columns as i32;
            }
            consumed += band;
            self.borders.push(consumed);
        }
    }

    /// Pixel size of the smallest (1×1) span.
    pub fn unit(&self) -> i32 {
        self.unit
    }

    pub fn columns(&self) -> usize {
        self.borders.len().saturating_sub(1)
    }

    pub fn total_width(&self) -> i32 {
        self.width
    }

    /// Left border of `column`; `left_of(columns())` is the right edge.
    pub fn left_of(&self, column: usize) -> i32 {
        self.borders[column]
    }

    pub fn borders(&self) -> &[i32] {
        &self.borders
    }
}
