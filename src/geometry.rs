//! Floating-point rectangles, sizes, and insets in layout units.
//!
//! Generic over [`Float`] so hosts can lay out in `f32` (typical GPU and
//! mobile toolkits) or `f64`.

use num_traits::Float;

/// Width × height in layout units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Size<F> {
    /// Width in layout units.
    pub width: F,
    /// Height in layout units.
    pub height: F,
}

impl<F: Float> Size<F> {
    /// Create a new size.
    pub const fn new(width: F, height: F) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle. `(x, y)` is the top-left corner, y grows downward.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect<F> {
    pub x: F,
    pub y: F,
    pub width: F,
    pub height: F,
}

impl<F: Float> Rect<F> {
    /// Create a new rect.
    pub const fn new(x: F, y: F, width: F, height: F) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn max_x(&self) -> F {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn max_y(&self) -> F {
        self.y + self.height
    }

    /// Shrink by `dx` on the left and right edges and `dy` on the top and bottom.
    ///
    /// Negative amounts grow the rect. Width and height are not clamped.
    pub fn inset(self, dx: F, dy: F) -> Self {
        let two = F::one() + F::one();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - two * dx,
            height: self.height - two * dy,
        }
    }

    /// Overlap test. Rects that only share an edge do not intersect.
    ///
    /// On an axis where either rect has zero extent the test is inclusive,
    /// so a zero-height rect intersects every rect it lies inside or on the
    /// edge of, itself included.
    pub fn intersects(&self, other: &Rect<F>) -> bool {
        overlaps(self.x, self.width, other.x, other.width)
            && overlaps(self.y, self.height, other.y, other.height)
    }

    /// Whether `other` lies entirely inside this rect (edges inclusive).
    pub fn contains_rect(&self, other: &Rect<F>) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }
}

/// One-axis overlap of `[a, a + a_len)` and `[b, b + b_len)`, closed when
/// either span is empty.
fn overlaps<F: Float>(a: F, a_len: F, b: F, b_len: F) -> bool {
    if a_len == F::zero() || b_len == F::zero() {
        a <= b + b_len && b <= a + a_len
    } else {
        a < b + b_len && b < a + a_len
    }
}

/// Content insets, in the host scroll view's convention (top, left, bottom, right).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Insets<F> {
    pub top: F,
    pub left: F,
    pub bottom: F,
    pub right: F,
}

impl<F: Float> Insets<F> {
    /// Create insets from explicit edges.
    pub const fn new(top: F, left: F, bottom: F, right: F) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// No insets.
    pub fn zero() -> Self {
        Self::uniform(F::zero())
    }

    /// The same inset on all four edges.
    pub fn uniform(v: F) -> Self {
        Self::new(v, v, v, v)
    }

    /// Left plus right.
    pub fn horizontal(&self) -> F {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> F {
        self.top + self.bottom
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.bottom.is_finite()
            && self.right.is_finite()
    }
}

impl<F: Float> Default for Insets<F> {
    fn default() -> Self {
        Self::zero()
    }
}
