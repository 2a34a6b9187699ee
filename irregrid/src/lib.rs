//! A headless irregular-grid layout and virtualization engine.
//!
//! The grid divides a fixed width into N columns and packs tiles spanning one
//! or two columns per axis against per-column pixel frontiers. This crate
//! focuses on the core algorithms needed to keep such a grid interactive over
//! large datasets: greedy frontier packing, incremental fill and recycling
//! while scrolling, and a two-phase (speculative + authoritative) layout
//! protocol that lets hosts animate tiles out when items are removed.
//!
//! It is UI-agnostic. A host drives it through the [`ItemProvider`] trait and
//! four entry points:
//! - [`GridEngine::notify_dataset_changed`] / [`GridEngine::notify_items_removed`]
//! - [`GridEngine::run_layout`] (pre or real pass)
//! - [`GridEngine::scroll_by`]
//!
//! For protocol-sequencing helpers (controller, anchoring, scroll tweens),
//! see the `irregrid-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod disappearing;
mod engine;
mod error;
mod occupancy;
mod options;
mod partition;
mod placement;
mod provider;
mod sizing;
mod state;
mod types;


pub use disappearing::{DisappearingCache, DisappearingTile};
pub use engine::GridEngine;
pub use error::GridError;
pub use occupancy::SpanOccupancy;
pub use options::{DEFAULT_COLUMN_COUNT, GridOptions};
pub use partition::ColumnBands;
pub use placement::PlacementCache;
pub use provider::ItemProvider;
pub use sizing::SizingMode;
pub use types::{
    FillDirection, Insets, LayoutPhase, Placement, PxRect, PxSize, SpanSize, Viewport,
};
