//! Decoded RGB raster backed by the `image` crate.
use std::path::Path;

use graphfix_core::PixelSource;
use image::{DynamicImage, ImageReader, RgbImage};
use tracing::{debug, instrument};

use crate::errors::ImageProviderError;

/// An image normalized to 8-bit RGB, alpha dropped.
#[derive(Debug, Clone)]
pub struct ImageProvider {
    pixels: RgbImage,
}

impl ImageProvider {
    /// Normalizes an already decoded image.
    ///
    /// # Examples
    /// ```
    /// use graphfix_core::PixelSource;
    /// use graphfix_providers_image::ImageProvider;
    /// use image::{DynamicImage, Rgba, RgbaImage};
    ///
    /// let rgba = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 0]));
    /// let provider = ImageProvider::from_dynamic(DynamicImage::ImageRgba8(rgba));
    /// assert_eq!((provider.width(), provider.height()), (3, 2));
    /// assert_eq!(provider.rgb(2, 1), Some([10, 20, 30]));
    /// ```
    #[must_use]
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            pixels: image.into_rgb8(),
        }
    }

    /// Decodes the image at `path`, detecting the format from its contents
    /// and falling back to the file extension.
    ///
    /// # Errors
    /// Returns [`ImageProviderError::Io`] when the file cannot be opened and
    /// [`ImageProviderError::Decode`] for unsupported or corrupt data.
    #[instrument(name = "image.load", err, skip_all, fields(path = %path.as_ref().display()))]
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, ImageProviderError> {
        let path = path.as_ref();
        let io_error = |source| ImageProviderError::Io {
            path: path.to_path_buf(),
            source,
        };
        let reader = ImageReader::open(path)
            .map_err(io_error)?
            .with_guessed_format()
            .map_err(io_error)?;
        let format = reader.format();
        let image = reader.decode().map_err(|source| ImageProviderError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(?format, width = image.width(), height = image.height(), "image decoded");
        Ok(Self::from_dynamic(image))
    }
}

impl PixelSource for ImageProvider {
    fn width(&self) -> usize {
        self.pixels.width() as usize
    }

    fn height(&self) -> usize {
        self.pixels.height() as usize
    }

    fn rgb(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        self.pixels.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }
}
