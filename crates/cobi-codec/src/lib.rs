//! cobi-codec: corner-based interpolated block coding for 8-bit rasters
//!
//! The codec replaces rectangular regions of every channel with the four
//! samples at their corners and reconstructs each region by bilinear
//! interpolation. Smooth regions collapse into large rectangles; detailed
//! regions fall back to small ones. How much error a rectangle may carry is
//! controlled by a single quality threshold.
//!
//! # Quick Start
//!
//! The [`CobiCodec`] builder is the primary entry point:
//!
//! ```
//! use cobi_codec::{ChannelKind, CobiCodec, Image};
//!
//! // 8x2 image with a horizontal red ramp, everything else constant
//! let rgba: Vec<u8> = (0..16)
//!     .flat_map(|i| [(i % 8) as u8 * 10, 50, 50, 255])
//!     .collect();
//! let image = Image::from_rgba(8, 2, &rgba).unwrap();
//!
//! let codec = CobiCodec::new();
//! let encoded = codec.encode(&image).unwrap();
//! assert_eq!(encoded.channel(ChannelKind::Red).len(), 1);
//!
//! let decoded = codec.decode(&encoded).unwrap();
//! assert_eq!(decoded.to_rgba(), rgba);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Image ──► 4 × ChannelEncoder ──► EncodedImage (4 × ChannelPartition)
//!                                         │
//! Image ◄── 4 × decode_channel ◄──────────┘
//! ```
//!
//! Channels are independent. With the default `parallel` feature the four
//! channels run on the rayon thread pool; results are identical either way.
//!
//! # Interpolation
//!
//! [`interpolate`] is the single reconstruction routine used both while the
//! encoder scores candidate rectangles and while the decoder rebuilds them,
//! so the quality measured at encode time is exactly the quality delivered.
//! Top and bottom rows are interpolated between their corners first, then
//! every column between its top and bottom sample. Each sample is computed
//! in `f32` and truncated toward zero.
//!
//! # Encoding
//!
//! The encoder walks the frontier (first uncovered pixel in row-major
//! order), grows the largest acceptable rectangle there and commits it.
//! Rectangles are scored with
//!
//! ```text
//! score = sum((t - i)^2) / sqrt(sum(t^2) * sum(i^2))
//!       * (long_side / short_side)^aspect_exponent
//!       * (1 + area / size_scale)
//! ```
//!
//! and accepted when the score is below [`QualityOptions::threshold`]. See
//! [`ChannelEncoder`] for the growth search.

pub mod area;
pub mod codec;
pub mod coverage;
pub mod debug;
pub mod decode;
pub mod encode;
pub mod error;
pub mod interpolate;
pub mod partition;
pub mod quality;
pub mod raster;

#[cfg(test)]
mod domain_tests;

pub use area::{AreaRecord, Rect, MAX_AREA_SIDE};
pub use codec::CobiCodec;
pub use coverage::CoverageTracker;
pub use debug::corner_map;
pub use decode::{decode, decode_channel};
pub use encode::{encode, encode_channel, ChannelEncoder};
pub use error::CodecError;
pub use interpolate::{interpolate, Block, Corners};
pub use partition::{ChannelPartition, EncodedImage};
pub use quality::{QualityEvaluator, QualityOptions};
pub use raster::{ChannelKind, Image, Plane};
