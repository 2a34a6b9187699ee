use thiserror::Error;

/// Errors surfaced while constructing a grid engine.
///
/// Steady-state operations never fail: recoverable anomalies (empty dataset,
/// degenerate viewport, out-of-range positions) degrade to no-op layouts.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The grid cannot host double-span tiles with fewer than two columns.
    #[error("column count must be at least 2, got {0}")]
    InvalidColumnCount(usize),
}
