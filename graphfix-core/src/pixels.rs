//! Pixel source abstraction consumed by the grid builder.

/// A decoded raster exposed as 8-bit RGB triples.
///
/// Implementations drop any alpha channel before answering [`Self::rgb`].
///
/// # Examples
/// ```
/// use graphfix_core::PixelSource;
///
/// struct Solid;
///
/// impl PixelSource for Solid {
///     fn width(&self) -> usize { 2 }
///     fn height(&self) -> usize { 1 }
///     fn rgb(&self, x: usize, y: usize) -> Option<[u8; 3]> {
///         (x < 2 && y < 1).then_some([10, 20, 30])
///     }
/// }
///
/// assert_eq!(Solid.pixel_count(), Some(2));
/// assert_eq!(Solid.rgb(1, 0), Some([10, 20, 30]));
/// assert_eq!(Solid.rgb(2, 0), None);
/// ```
pub trait PixelSource {
    /// Returns the number of columns.
    fn width(&self) -> usize;

    /// Returns the number of rows.
    fn height(&self) -> usize;

    /// Returns the colour at `(x, y)` or `None` when out of bounds.
    fn rgb(&self, x: usize, y: usize) -> Option<[u8; 3]>;

    /// Returns `width * height`, or `None` on overflow.
    #[must_use]
    fn pixel_count(&self) -> Option<usize> {
        self.width().checked_mul(self.height())
    }
}

/// Row-major in-memory pixel buffer.
///
/// # Examples
/// ```
/// use graphfix_core::{PixelSource, RgbGrid};
///
/// let grid = RgbGrid::new(2, 1, vec![[0, 0, 0], [255, 255, 255]]).expect("sizes agree");
/// assert_eq!(grid.rgb(1, 0), Some([255, 255, 255]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbGrid {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl RgbGrid {
    /// Wraps a row-major pixel buffer, returning `None` unless
    /// `pixels.len() == width * height`.
    #[must_use]
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Option<Self> {
        (width.checked_mul(height)? == pixels.len()).then_some(Self {
            width,
            height,
            pixels,
        })
    }
}

impl PixelSource for RgbGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn rgb(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width {
            return None;
        }
        let offset = y.checked_mul(self.width)?.checked_add(x)?;
        self.pixels.get(offset).copied()
    }
}
