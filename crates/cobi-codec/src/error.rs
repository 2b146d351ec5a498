//! Error type for the cobi-codec public API.
//!
//! Every fallible operation in the crate returns [`CodecError`]. None of the
//! variants describe transient conditions: they all point at structurally
//! invalid input, so callers should report them rather than retry.

use crate::raster::ChannelKind;
use std::fmt;

/// Errors produced while building rasters, encoding or decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Sample buffer length does not match the declared dimensions.
    InvalidChannelSize {
        /// Number of samples implied by width and height
        expected: usize,
        /// Number of samples actually provided
        actual: usize,
    },
    /// Width or height is zero.
    InvalidDimensions {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },
    /// Channels that must share one shape disagree.
    DimensionMismatch {
        /// First channel whose shape differs from the red channel
        channel: ChannelKind,
        /// Shape of the red channel as `(width, height)`
        expected: (usize, usize),
        /// Shape of the offending channel as `(width, height)`
        actual: (usize, usize),
    },
    /// The partition leaves a pixel uncovered (first one in row-major order).
    CoverageGap {
        /// Column of the uncovered pixel
        x: usize,
        /// Row of the uncovered pixel
        y: usize,
    },
    /// Two records of the same partition cover one pixel.
    OverlappingArea {
        /// Column of the doubly covered pixel
        x: usize,
        /// Row of the doubly covered pixel
        y: usize,
    },
    /// A record reaches outside the raster.
    AreaOutOfBounds {
        /// Position of the record in its partition
        index: usize,
        /// Record origin column
        x: usize,
        /// Record origin row
        y: usize,
        /// Record width
        width: usize,
        /// Record height
        height: usize,
    },
    /// A record has a zero width or height.
    InvalidArea {
        /// Position of the record in its partition
        index: usize,
    },
    /// The source raster uses more than 8 bits per sample.
    UnsupportedSampleDepth {
        /// Bits per sample reported by the source
        bits: u8,
    },
    /// Quality options are out of range.
    InvalidOptions(String),
    /// A per-channel failure, tagged with the channel it occurred in.
    Channel {
        /// Channel being processed
        channel: ChannelKind,
        /// Underlying failure
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Tag this error with the channel it was detected in.
    pub fn in_channel(self, channel: ChannelKind) -> Self {
        CodecError::Channel {
            channel,
            source: Box::new(self),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidChannelSize { expected, actual } => {
                write!(
                    f,
                    "channel size mismatch: expected {} samples, got {}",
                    expected, actual
                )
            }
            CodecError::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {}x{}", width, height)
            }
            CodecError::DimensionMismatch {
                channel,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "channel {} is {}x{}, expected {}x{}",
                    channel, actual.0, actual.1, expected.0, expected.1
                )
            }
            CodecError::CoverageGap { x, y } => {
                write!(f, "coverage gap: pixel ({}, {}) is not covered", x, y)
            }
            CodecError::OverlappingArea { x, y } => {
                write!(f, "overlapping areas: pixel ({}, {}) is covered twice", x, y)
            }
            CodecError::AreaOutOfBounds {
                index,
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "area {} ({}x{} at {}, {}) lies outside the raster",
                    index, width, height, x, y
                )
            }
            CodecError::InvalidArea { index } => {
                write!(f, "area {} has zero width or height", index)
            }
            CodecError::UnsupportedSampleDepth { bits } => {
                write!(
                    f,
                    "unsupported sample depth: {} bits (only 8 bits per channel)",
                    bits
                )
            }
            CodecError::InvalidOptions(msg) => write!(f, "invalid quality options: {}", msg),
            CodecError::Channel { channel, source } => {
                write!(f, "channel {}: {}", channel, source)
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Channel { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
