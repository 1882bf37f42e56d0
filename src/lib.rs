//! Masonry (staggered column) layout for scrollable card views.
//!
//! Pure geometry. The host supplies each item's content heights, the engine
//! returns every item's frame and the total content height. `no_std`
//! compatible with `alloc`.
//!
//! # Modules
//!
//! - [`geometry`] — Float rectangles, sizes, and content insets
//! - [`provider`] — The [`HeightProvider`] delegate contract
//! - [`layout`] — Column placement, result caching, visible-item queries
//! - `svg` — SVG visualization of a computed layout (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod geometry;
pub mod layout;
pub mod provider;
#[cfg(feature = "svg")]
pub mod svg;

// Re-exports: core types
pub use geometry::{Insets, Rect, Size};
pub use layout::{
    ColumnStrategy, ItemAttributes, LayoutError, LayoutResult, MasonryConfig, MasonryLayout,
    NegativeHeight,
};
pub use provider::{HeightProvider, ItemHeights};
