//! The height delegate contract between the engine and its host.

use num_traits::Float;

/// Content heights for one item, as reported by a [`HeightProvider`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemHeights<F> {
    /// Height of the primary content block (the photo).
    pub photo: F,
    /// Height of the secondary content block (caption, comment, metadata).
    pub annotation: F,
}

impl<F: Float> ItemHeights<F> {
    /// Create a pair of heights.
    pub const fn new(photo: F, annotation: F) -> Self {
        Self { photo, annotation }
    }

    /// Photo plus annotation.
    pub fn total(&self) -> F {
        self.photo + self.annotation
    }
}

/// Supplies the intrinsic content heights of each item.
///
/// `width` is the usable width inside an item's padding, identical for
/// every item in a pass. Implementations typically scale an image's aspect
/// ratio to this width and measure a caption's wrapped text at it.
///
/// Heights must be finite and should be non-negative; see
/// [`NegativeHeight`](crate::NegativeHeight) for how negative values are
/// handled.
///
/// Any `FnMut(usize, F) -> (F, F)` closure returning `(photo, annotation)`
/// is a provider:
///
/// ```
/// use zenmasonry::MasonryLayout;
///
/// let mut layout = MasonryLayout::<f64>::new();
/// let result = layout
///     .compute(3, 320.0, &mut |_index: usize, width: f64| (width * 0.75, 24.0))
///     .unwrap();
/// assert_eq!(result.items.len(), 3);
/// ```
pub trait HeightProvider<F> {
    /// Height of the photo block for the item at `index`.
    fn photo_height(&mut self, index: usize, width: F) -> F;

    /// Height of the annotation block for the item at `index`.
    fn annotation_height(&mut self, index: usize, width: F) -> F;

    /// Both heights at once. The engine only calls this method.
    fn heights(&mut self, index: usize, width: F) -> ItemHeights<F>
    where
        F: Copy,
    {
        ItemHeights {
            photo: self.photo_height(index, width),
            annotation: self.annotation_height(index, width),
        }
    }
}

impl<F, T> HeightProvider<F> for T
where
    F: Copy,
    T: FnMut(usize, F) -> (F, F),
{
    fn photo_height(&mut self, index: usize, width: F) -> F {
        self(index, width).0
    }

    fn annotation_height(&mut self, index: usize, width: F) -> F {
        self(index, width).1
    }

    fn heights(&mut self, index: usize, width: F) -> ItemHeights<F> {
        let (photo, annotation) = self(index, width);
        ItemHeights { photo, annotation }
    }
}
