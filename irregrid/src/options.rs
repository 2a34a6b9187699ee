use crate::{GridError, SizingMode};

/// Column count used when none is configured.
pub const DEFAULT_COLUMN_COUNT: usize = 4;

/// Configuration for [`crate::GridEngine`], accepted at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptions {
    /// Number of columns the grid is divided into; at least 2.
    pub column_count: usize,
    /// How tiles without an explicit hint choose their span size.
    pub sizing: SizingMode,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            column_count: DEFAULT_COLUMN_COUNT,
            sizing: SizingMode::Deterministic,
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_count(mut self, column_count: usize) -> Self {
        self.column_count = column_count;
        self
    }

    pub fn with_sizing(mut self, sizing: SizingMode) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_randomized_sizing(mut self, seed: u64) -> Self {
        self.sizing = SizingMode::Randomized { seed };
        self
    }

    pub(crate) fn validate(&self) -> Result<(), GridError> {
        if self.column_count < 2 {
            return Err(GridError::InvalidColumnCount(self.column_count));
        }
        Ok(())
    }
}
