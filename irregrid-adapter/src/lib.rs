//! Adapter utilities for the `irregrid` crate.
//!
//! The `irregrid` crate is UI-agnostic and focuses on the core layout state.
//! This crate provides small, framework-neutral helpers commonly needed by
//! adapters:
//!
//! - A controller that sequences the notification → pre-layout → real-layout
//!   → scroll protocol so hosts cannot get the ordering wrong
//! - Scroll anchoring (keep the same tile visible across relayouts)
//! - Tween-based smooth scrolling helpers (optional; adapter-driven)
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod controller;
mod tween;

#[cfg(test)]
mod tests;

pub use anchor::{GridAnchor, apply_anchor, capture_first_visible_anchor};
pub use controller::GridController;
pub use tween::{Easing, ScrollTween};
