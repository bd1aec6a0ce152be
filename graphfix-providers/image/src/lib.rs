//! Raster image provider exposing decoded pixels to the grid builder.

mod errors;
mod provider;

pub use errors::ImageProviderError;
pub use provider::ImageProvider;

#[cfg(test)]
mod tests;
