//! CobiCodec builder, the ergonomic entry point for the crate.

use crate::decode::decode;
use crate::encode::encode;
use crate::error::CodecError;
use crate::partition::EncodedImage;
use crate::quality::QualityOptions;
use crate::raster::Image;

/// Reusable encoder/decoder with fluent quality configuration.
///
/// Configuration methods consume and return `self`; [`encode`](Self::encode)
/// and [`decode`](Self::decode) borrow it, so one codec can process any
/// number of images.
///
/// # Example
///
/// ```
/// use cobi_codec::{CobiCodec, Image};
///
/// let rgba = vec![120u8; 6 * 4 * 4];
/// let image = Image::from_rgba(6, 4, &rgba).unwrap();
///
/// let codec = CobiCodec::new().threshold(0.01);
/// let encoded = codec.encode(&image).unwrap();
/// let decoded = codec.decode(&encoded).unwrap();
///
/// assert_eq!(encoded.area_count(), 4);
/// assert_eq!(decoded, image);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CobiCodec {
    options: QualityOptions,
}

impl CobiCodec {
    /// Codec with the default quality options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec using `options` as-is.
    pub fn with_options(options: QualityOptions) -> Self {
        Self { options }
    }

    /// Set the acceptance threshold.
    #[inline]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.options = self.options.threshold(threshold);
        self
    }

    /// Set the exponent of the aspect-ratio penalty.
    #[inline]
    pub fn aspect_exponent(mut self, exponent: f64) -> Self {
        self.options = self.options.aspect_exponent(exponent);
        self
    }

    /// Set the area at which the size penalty doubles a score.
    #[inline]
    pub fn size_scale(mut self, scale: f64) -> Self {
        self.options = self.options.size_scale(scale);
        self
    }

    #[inline]
    pub fn options(&self) -> &QualityOptions {
        &self.options
    }

    pub fn encode(&self, image: &Image) -> Result<EncodedImage, CodecError> {
        encode(image, &self.options)
    }

    pub fn decode(&self, encoded: &EncodedImage) -> Result<Image, CodecError> {
        decode(encoded)
    }
}
