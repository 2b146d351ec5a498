//! Raster containers: single sample planes and four-channel images.
//!
//! Samples are stored row-major, one `u8` per pixel per channel. [`Image`]
//! keeps its four planes separate because every channel is encoded and
//! decoded independently.

use crate::error::CodecError;
use std::fmt;

/// One of the four sample planes of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Alpha
    Alpha,
}

impl ChannelKind {
    /// All channels in storage order (R, G, B, A).
    pub const ALL: [ChannelKind; 4] = [
        ChannelKind::Red,
        ChannelKind::Green,
        ChannelKind::Blue,
        ChannelKind::Alpha,
    ];

    /// Position of this channel in storage order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ChannelKind::Red => 0,
            ChannelKind::Green => 1,
            ChannelKind::Blue => 2,
            ChannelKind::Alpha => 3,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelKind::Red => "R",
            ChannelKind::Green => "G",
            ChannelKind::Blue => "B",
            ChannelKind::Alpha => "A",
        };
        f.write_str(name)
    }
}

/// A single 8-bit sample plane in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl Plane {
    /// Wrap a row-major sample buffer.
    ///
    /// Fails with [`CodecError::InvalidChannelSize`] when the buffer length
    /// is not `width * height`.
    pub fn new(width: usize, height: usize, samples: Vec<u8>) -> Result<Self, CodecError> {
        let expected = width * height;
        if samples.len() != expected {
            return Err(CodecError::InvalidChannelSize {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A plane with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.samples[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.samples[y * self.width + x] = value;
    }

    /// One row as a slice.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.samples[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}

/// Images must be non-empty and addressable by the `u32` record origins.
fn valid_dimensions(width: usize, height: usize) -> bool {
    width > 0 && height > 0 && width <= u32::MAX as usize && height <= u32::MAX as usize
}

/// A four-channel 8-bit raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    planes: [Plane; 4],
}

impl Image {
    /// Split interleaved `[R, G, B, A, R, G, B, A, ...]` bytes into planes.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Result<Self, CodecError> {
        if !valid_dimensions(width, height) {
            return Err(CodecError::InvalidDimensions { width, height });
        }
        let expected = width * height * 4;
        if rgba.len() != expected {
            return Err(CodecError::InvalidChannelSize {
                expected,
                actual: rgba.len(),
            });
        }

        let mut channels: [Vec<u8>; 4] =
            std::array::from_fn(|_| Vec::with_capacity(width * height));
        for pixel in rgba.chunks_exact(4) {
            for (channel, &sample) in channels.iter_mut().zip(pixel) {
                channel.push(sample);
            }
        }

        let planes = channels.map(|samples| Plane {
            width,
            height,
            samples,
        });
        Ok(Self {
            width,
            height,
            planes,
        })
    }

    /// Assemble an image from four planes in R, G, B, A order.
    ///
    /// All planes must share the red plane's shape; the first one that does
    /// not is reported as [`CodecError::DimensionMismatch`].
    pub fn from_planes(planes: [Plane; 4]) -> Result<Self, CodecError> {
        let expected = planes[0].shape();
        if !valid_dimensions(expected.0, expected.1) {
            return Err(CodecError::InvalidDimensions {
                width: expected.0,
                height: expected.1,
            });
        }
        for kind in ChannelKind::ALL {
            let actual = planes[kind.index()].shape();
            if actual != expected {
                return Err(CodecError::DimensionMismatch {
                    channel: kind,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self {
            width: expected.0,
            height: expected.1,
            planes,
        })
    }

    /// Assemble planes whose common shape the caller already guarantees.
    pub(crate) fn from_validated_planes(planes: [Plane; 4]) -> Self {
        let (width, height) = planes[0].shape();
        debug_assert!(planes.iter().all(|p| p.shape() == (width, height)));
        Self {
            width,
            height,
            planes,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn plane(&self, kind: ChannelKind) -> &Plane {
        &self.planes[kind.index()]
    }

    #[inline]
    pub fn planes(&self) -> &[Plane; 4] {
        &self.planes
    }

    /// Interleave the planes back into `[R, G, B, A, ...]` bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.width * self.height * 4);
        for i in 0..self.width * self.height {
            for plane in &self.planes {
                rgba.push(plane.samples[i]);
            }
        }
        rgba
    }
}
