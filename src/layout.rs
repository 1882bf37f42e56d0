//! Masonry layout engine: column placement, result caching, and viewport queries.
//!
//! Items are placed top to bottom into fixed-width columns. Each item's
//! height comes from a [`HeightProvider`]; the engine adds `cell_padding`
//! above and below, stacks the resulting slot under the previous item in
//! its column, and stores the slot shrunk by the padding as the item frame.
//!
//! # Example
//!
//! ```
//! use zenmasonry::{MasonryConfig, MasonryLayout, Rect};
//!
//! let mut layout = MasonryLayout::with_config(MasonryConfig::new().columns(2).cell_padding(6.0));
//! let result = layout
//!     .compute(4, 300.0, &mut |_index: usize, _width: f64| (100.0, 20.0))
//!     .unwrap();
//!
//! // 150-wide columns, 132-tall slots, two per column
//! assert_eq!(result.column_width, 150.0);
//! assert_eq!(result.content_height, 264.0);
//! assert_eq!(result.items[3].frame, Rect::new(156.0, 138.0, 138.0, 120.0));
//!
//! // Only the top row is visible in a 100-tall window
//! let visible: Vec<usize> = layout
//!     .frames_intersecting(Rect::new(0.0, 0.0, 300.0, 100.0))
//!     .map(|item| item.index)
//!     .collect();
//! assert_eq!(visible, [0, 1]);
//! ```

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use num_traits::{Float, ToPrimitive};

use crate::geometry::{Insets, Rect, Size};
use crate::provider::{HeightProvider, ItemHeights};

/// Default number of columns.
pub const DEFAULT_COLUMNS: usize = 2;
/// Default padding around each item, in layout units.
pub const DEFAULT_CELL_PADDING: f64 = 6.0;

/// How the next item picks its column.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColumnStrategy {
    /// Item `i` goes to column `i % columns`, regardless of column heights.
    ///
    /// Every item's position depends only on earlier items in its own
    /// column, so appending items never moves existing ones. Long runs of
    /// uneven heights leave the columns ragged.
    #[default]
    RoundRobin,
    /// Item goes to the column whose bottom edge is currently highest
    /// (smallest y). Ties go to the leftmost column.
    ShortestColumn,
}

impl ColumnStrategy {
    fn pick<F: Float>(self, index: usize, y_offsets: &[F]) -> usize {
        match self {
            Self::RoundRobin => index % y_offsets.len(),
            Self::ShortestColumn => {
                let mut best = 0;
                for (column, &y) in y_offsets.iter().enumerate().skip(1) {
                    if y < y_offsets[best] {
                        best = column;
                    }
                }
                best
            }
        }
    }
}

/// What to do when a [`HeightProvider`] reports a negative height.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NegativeHeight {
    /// Treat the height as zero and log a warning.
    #[default]
    Clamp,
    /// Fail the pass with [`LayoutError::NegativeHeight`].
    Reject,
}

/// Layout computation error.
///
/// Every error is raised before the engine's cache is touched, so a
/// previously computed result stays available after a failed pass.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Column count is zero.
    ZeroColumns,
    /// Cell padding is negative, NaN, or infinite.
    InvalidPadding,
    /// Viewport width, insets, or the content width between them are not
    /// finite, or the insets are wider than the viewport.
    InvalidViewport,
    /// A column is narrower than twice the cell padding, which would give
    /// items a negative width.
    PaddingExceedsColumn,
    /// The provider returned NaN or infinity for this item, or its heights
    /// push the column bottom past the float range.
    InvalidHeight { index: usize },
    /// The provider returned a negative height for this item under
    /// [`NegativeHeight::Reject`].
    NegativeHeight { index: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroColumns => f.write_str("masonry layout needs at least one column"),
            Self::InvalidPadding => f.write_str("cell padding must be finite and non-negative"),
            Self::InvalidViewport => {
                f.write_str("viewport width and insets must be finite and leave a non-negative content width")
            }
            Self::PaddingExceedsColumn => {
                f.write_str("column width is smaller than twice the cell padding")
            }
            Self::InvalidHeight { index } => {
                write!(f, "height provider returned a non-finite height for item {index}")
            }
            Self::NegativeHeight { index } => {
                write!(f, "height provider returned a negative height for item {index}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

/// Layout configuration.
///
/// ```
/// use zenmasonry::{ColumnStrategy, Insets, MasonryConfig};
///
/// let config = MasonryConfig::new()
///     .columns(3)
///     .cell_padding(4.0f32)
///     .insets(Insets::new(8.0, 10.0, 8.0, 10.0))
///     .strategy(ColumnStrategy::ShortestColumn);
/// assert_eq!(config.columns, 3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MasonryConfig<F> {
    /// Number of equal-width columns. Must be at least 1.
    pub columns: usize,
    /// Space added on all four sides of every item.
    pub cell_padding: F,
    /// Host content insets. Left and right reduce the content width; top
    /// and bottom are applied by the host scroll view and do not move
    /// item frames.
    pub insets: Insets<F>,
    pub strategy: ColumnStrategy,
    pub negative_heights: NegativeHeight,
}

impl<F: Float> MasonryConfig<F> {
    /// Two columns, 6.0 padding, no insets, round-robin placement.
    pub fn new() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            cell_padding: cast(DEFAULT_CELL_PADDING),
            insets: Insets::zero(),
            strategy: ColumnStrategy::RoundRobin,
            negative_heights: NegativeHeight::Clamp,
        }
    }

    /// Set the column count.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Set the padding around each item.
    pub fn cell_padding(mut self, padding: F) -> Self {
        self.cell_padding = padding;
        self
    }

    /// Set the content insets.
    pub fn insets(mut self, insets: Insets<F>) -> Self {
        self.insets = insets;
        self
    }

    /// Set the column placement strategy.
    pub fn strategy(mut self, strategy: ColumnStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the negative height policy.
    pub fn negative_heights(mut self, policy: NegativeHeight) -> Self {
        self.negative_heights = policy;
        self
    }
}

impl<F: Float> Default for MasonryConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Placement of one item.
///
/// Compared structurally, so a host can diff two passes item by item to
/// find the cells whose frame or photo height changed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemAttributes<F> {
    /// Position in the item sequence.
    pub index: usize,
    /// Column the item was placed in.
    pub column: usize,
    /// Item rectangle with padding removed, relative to the content origin.
    pub frame: Rect<F>,
    /// Height of the photo block at the top of the frame.
    pub photo_height: F,
    /// Height of the annotation block below the photo.
    pub annotation_height: F,
}

impl<F: Float> ItemAttributes<F> {
    /// The photo block: top of the frame, `photo_height` tall.
    pub fn photo_frame(&self) -> Rect<F> {
        Rect::new(self.frame.x, self.frame.y, self.frame.width, self.photo_height)
    }

    /// The annotation block: directly below the photo.
    pub fn annotation_frame(&self) -> Rect<F> {
        Rect::new(
            self.frame.x,
            self.frame.y + self.photo_height,
            self.frame.width,
            self.annotation_height,
        )
    }
}

/// Output of one layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult<F> {
    /// One entry per item, in index order.
    pub items: Vec<ItemAttributes<F>>,
    /// Viewport width minus left and right insets.
    pub content_width: F,
    /// Lowest slot bottom edge over all columns. Zero when there are no items.
    pub content_height: F,
    /// `content_width / columns`.
    pub column_width: F,
    /// Width of every item frame: `column_width - 2 * cell_padding`. This is
    /// also the width the provider was asked about.
    pub item_width: F,
    column_bottoms: Vec<F>,
}

impl<F: Float> LayoutResult<F> {
    /// Number of items laid out.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the pass had no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bottom edge of each column's last slot (0 for empty columns).
    pub fn column_heights(&self) -> &[F] {
        &self.column_bottoms
    }

    /// Width x height of the scrollable content.
    pub fn content_size(&self) -> Size<F> {
        Size::new(self.content_width, self.content_height)
    }

    /// Items whose frame overlaps `rect`, in index order.
    pub fn intersecting(&self, rect: Rect<F>) -> impl Iterator<Item = &ItemAttributes<F>> {
        self.items
            .iter()
            .filter(move |item| item.frame.intersects(&rect))
    }
}

/// A computed result plus the inputs it was computed for.
#[derive(Clone, Debug)]
struct CachedPass<F> {
    item_count: usize,
    viewport_width: F,
    result: LayoutResult<F>,
}

impl<F: Float> CachedPass<F> {
    fn matches(&self, item_count: usize, viewport_width: F) -> bool {
        self.item_count == item_count && self.viewport_width == viewport_width
    }
}

/// Masonry layout engine with a memoized result.
///
/// [`compute`](Self::compute) runs a full pass the first time and after
/// every invalidation, then serves the cached result while the item count
/// and viewport width stay the same. Call [`invalidate`](Self::invalidate)
/// when the provider's heights change.
///
/// Not internally synchronized; share across threads behind a mutex.
#[derive(Clone, Debug)]
pub struct MasonryLayout<F = f64> {
    config: MasonryConfig<F>,
    cache: Option<CachedPass<F>>,
    passes: u64,
}

impl<F: Float> MasonryLayout<F> {
    /// Engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(MasonryConfig::new())
    }

    /// Engine with the given configuration.
    pub fn with_config(config: MasonryConfig<F>) -> Self {
        Self {
            config,
            cache: None,
            passes: 0,
        }
    }

    pub fn config(&self) -> &MasonryConfig<F> {
        &self.config
    }

    /// Replace the configuration and drop the cached result.
    pub fn set_config(&mut self, config: MasonryConfig<F>) {
        self.config = config;
        self.invalidate();
    }

    /// Change the column count and drop the cached result.
    pub fn set_columns(&mut self, columns: usize) {
        self.config.columns = columns;
        self.invalidate();
    }

    /// Change the cell padding and drop the cached result.
    pub fn set_cell_padding(&mut self, padding: F) {
        self.config.cell_padding = padding;
        self.invalidate();
    }

    /// Change the content insets and drop the cached result.
    pub fn set_insets(&mut self, insets: Insets<F>) {
        self.config.insets = insets;
        self.invalidate();
    }

    /// Change the placement strategy and drop the cached result.
    pub fn set_strategy(&mut self, strategy: ColumnStrategy) {
        self.config.strategy = strategy;
        self.invalidate();
    }

    /// Change the negative height policy and drop the cached result.
    pub fn set_negative_heights(&mut self, policy: NegativeHeight) {
        self.config.negative_heights = policy;
        self.invalidate();
    }

    /// Lay out `item_count` items in a viewport `viewport_width` wide.
    ///
    /// Returns the cached result without calling `provider` when the cache
    /// holds a pass for the same item count and viewport width. On error
    /// the cache is left exactly as it was.
    pub fn compute<P>(
        &mut self,
        item_count: usize,
        viewport_width: F,
        provider: &mut P,
    ) -> Result<&LayoutResult<F>, LayoutError>
    where
        P: HeightProvider<F> + ?Sized,
    {
        let pass = match self.cache.take() {
            Some(cached) if cached.matches(item_count, viewport_width) => {
                tracing::trace!(item_count, "masonry layout served from cache");
                cached
            }
            stale => match self.run_pass(item_count, viewport_width, provider) {
                Ok(pass) => {
                    self.passes += 1;
                    tracing::debug!(
                        item_count,
                        columns = self.config.columns,
                        pass = self.passes,
                        "computed masonry layout"
                    );
                    pass
                }
                Err(e) => {
                    self.cache = stale;
                    tracing::debug!(error = %e, "masonry layout pass failed");
                    return Err(e);
                }
            },
        };
        Ok(&self.cache.insert(pass).result)
    }

    /// Drop the cached result. The next [`compute`](Self::compute) runs a full pass.
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            tracing::trace!("masonry layout invalidated");
        }
    }

    /// The cached result, if any.
    pub fn result(&self) -> Option<&LayoutResult<F>> {
        self.cache.as_ref().map(|c| &c.result)
    }

    /// Cached items whose frame overlaps `rect`, in index order.
    ///
    /// Yields nothing when no result is cached.
    pub fn frames_intersecting(&self, rect: Rect<F>) -> impl Iterator<Item = &ItemAttributes<F>> {
        self.result()
            .into_iter()
            .flat_map(move |result| result.intersecting(rect))
    }

    /// Cached attributes of the item at `index`.
    pub fn attributes_at(&self, index: usize) -> Option<&ItemAttributes<F>> {
        self.result()?.items.get(index)
    }

    /// Size of the scrollable content of the cached pass.
    pub fn content_size(&self) -> Option<Size<F>> {
        self.result().map(LayoutResult::content_size)
    }

    /// Whether a cached pass exists for a width other than `viewport_width`.
    ///
    /// Hosts call this on bounds changes; vertical scrolling alone never
    /// requires a new pass.
    pub fn should_invalidate_for_width(&self, viewport_width: F) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|c| c.viewport_width != viewport_width)
    }

    /// Number of full passes computed since construction.
    pub fn pass_count(&self) -> u64 {
        self.passes
    }

    fn run_pass<P>(
        &self,
        item_count: usize,
        viewport_width: F,
        provider: &mut P,
    ) -> Result<CachedPass<F>, LayoutError>
    where
        P: HeightProvider<F> + ?Sized,
    {
        let config = &self.config;
        if config.columns == 0 {
            return Err(LayoutError::ZeroColumns);
        }
        let padding = config.cell_padding;
        if !padding.is_finite() || padding < F::zero() {
            return Err(LayoutError::InvalidPadding);
        }
        if !viewport_width.is_finite() || !config.insets.is_finite() {
            return Err(LayoutError::InvalidViewport);
        }
        let content_width = viewport_width - config.insets.horizontal();
        if !content_width.is_finite() || content_width < F::zero() {
            return Err(LayoutError::InvalidViewport);
        }

        let column_width = content_width / cast::<F, _>(config.columns);
        let item_width = column_width - (padding + padding);
        // Also rejects a NaN column width.
        if !(item_width >= F::zero()) {
            return Err(LayoutError::PaddingExceedsColumn);
        }

        let mut y_offsets = vec![F::zero(); config.columns];
        let mut items = Vec::with_capacity(item_count);
        let mut content_height = F::zero();

        for index in 0..item_count {
            let column = config.strategy.pick(index, &y_offsets);
            let heights = self.checked_heights(index, provider.heights(index, item_width))?;
            let slot_height = padding + heights.photo + heights.annotation + padding;
            let next_y = y_offsets[column] + slot_height;
            // Finite heights can still sum past the float range.
            if !next_y.is_finite() {
                return Err(LayoutError::InvalidHeight { index });
            }
            let slot = Rect::new(
                cast::<F, _>(column) * column_width,
                y_offsets[column],
                column_width,
                slot_height,
            );

            items.push(ItemAttributes {
                index,
                column,
                frame: slot.inset(padding, padding),
                photo_height: heights.photo,
                annotation_height: heights.annotation,
            });

            content_height = content_height.max(slot.max_y());
            y_offsets[column] = next_y;
        }

        Ok(CachedPass {
            item_count,
            viewport_width,
            result: LayoutResult {
                items,
                content_width,
                content_height,
                column_width,
                item_width,
                column_bottoms: y_offsets,
            },
        })
    }

    fn checked_heights(
        &self,
        index: usize,
        heights: ItemHeights<F>,
    ) -> Result<ItemHeights<F>, LayoutError> {
        Ok(ItemHeights {
            photo: self.checked_height(index, heights.photo)?,
            annotation: self.checked_height(index, heights.annotation)?,
        })
    }

    fn checked_height(&self, index: usize, height: F) -> Result<F, LayoutError> {
        if !height.is_finite() {
            return Err(LayoutError::InvalidHeight { index });
        }
        if height < F::zero() {
            return match self.config.negative_heights {
                NegativeHeight::Clamp => {
                    tracing::warn!(index, "clamping negative item height to zero");
                    Ok(F::zero())
                }
                NegativeHeight::Reject => Err(LayoutError::NegativeHeight { index }),
            };
        }
        Ok(height)
    }
}

impl<F: Float> Default for MasonryLayout<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric conversion into the layout float type. Conversions into `f32`
/// and `f64` never fail; other float types yield NaN, which the pass rejects.
fn cast<F: Float, N: ToPrimitive>(n: N) -> F {
    F::from(n).unwrap_or_else(F::nan)
}
