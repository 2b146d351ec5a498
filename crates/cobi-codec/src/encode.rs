//! Greedy frontier-driven channel encoder.
//!
//! Each channel is partitioned independently. Starting from the top-left
//! pixel, the encoder repeatedly takes the frontier (the first uncovered
//! pixel in row-major order), grows the largest rectangle anchored there
//! whose interpolation stays within the quality threshold, records its four
//! true corners and marks it covered.
//!
//! # Growth search
//!
//! Candidate shapes are enumerated by their dimension sum `d = w + h`,
//! starting from the always-exact 1x1 block. At every `d` each split that
//! fits the uncovered run to the right of the frontier and the rows below it
//! is scored; among the accepted shapes larger than the current best the
//! lowest score wins, ties going to the larger area. The search stops at the
//! first `d` with no accepted shape larger than the best. It never
//! backtracks.
//!
//! Every candidate is scored from scratch, so growing one `w x h` rectangle
//! costs on the order of `(w + h) * w * h` sample operations. Flat content
//! reaching the 255-pixel side limit is the expensive case.
//!
//! When the chosen width falls short of the uncovered run by two pixels or
//! fewer, the rectangle is widened to the full run so no sliver is left that
//! would otherwise need its own one-pixel-wide rectangle.

use crate::area::{AreaRecord, Rect, MAX_AREA_SIDE};
use crate::coverage::CoverageTracker;
use crate::error::CodecError;
use crate::partition::{ChannelPartition, EncodedImage};
use crate::quality::{QualityEvaluator, QualityOptions};
use crate::raster::{ChannelKind, Image, Plane};

/// Widths this close to the uncovered run are snapped to the full run.
const SNAP_SLACK: usize = 2;

/// Encoder for a single channel.
///
/// The encoder owns its [`CoverageTracker`] and yields [`AreaRecord`]s in
/// frontier order as an iterator; it is exhausted once every pixel of the
/// plane is covered.
///
/// # Example
///
/// ```
/// use cobi_codec::{ChannelEncoder, Plane, QualityOptions};
///
/// let plane = Plane::filled(10, 4, 128);
/// let options = QualityOptions::default();
/// let areas: Vec<_> = ChannelEncoder::new(&plane, &options).collect();
///
/// assert_eq!(areas.len(), 1);
/// assert_eq!((areas[0].width, areas[0].height), (10, 4));
/// ```
pub struct ChannelEncoder<'a> {
    plane: &'a Plane,
    evaluator: QualityEvaluator<'a>,
    coverage: CoverageTracker,
}

impl<'a> ChannelEncoder<'a> {
    pub fn new(plane: &'a Plane, options: &'a QualityOptions) -> Self {
        Self {
            plane,
            evaluator: QualityEvaluator::new(plane, options),
            coverage: CoverageTracker::new(plane.width(), plane.height()),
        }
    }

    /// Whether every pixel has been assigned to a record.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.coverage.frontier().is_none()
    }

    /// Grow the rectangle anchored at the frontier `(x, y)`.
    fn grow(&self, x: usize, y: usize) -> Rect {
        let max_width = self.coverage.run_width(x, y, MAX_AREA_SIDE);
        assert!(
            max_width > 0,
            "frontier ({}, {}) is already covered",
            x,
            y
        );
        let max_height = (self.plane.height() - y).min(MAX_AREA_SIDE);

        let mut best = Rect::new(x, y, 1, 1);
        for d in 3..=max_width + max_height {
            let mut chosen: Option<(Rect, f64)> = None;

            let min_w = d.saturating_sub(max_height).max(1);
            let max_w = (d - 1).min(max_width);
            for w in min_w..=max_w {
                let candidate = Rect::new(x, y, w, d - w);
                // Only strictly larger shapes extend growth
                if candidate.area() <= best.area() {
                    continue;
                }
                let score = self.evaluator.score(candidate);
                if !self.evaluator.accepts(score) {
                    continue;
                }
                let better = match chosen {
                    None => true,
                    Some((rect, chosen_score)) => {
                        score < chosen_score
                            || (score == chosen_score && candidate.area() > rect.area())
                    }
                };
                if better {
                    chosen = Some((candidate, score));
                }
            }

            match chosen {
                Some((rect, _)) => best = rect,
                None => break,
            }
        }

        if max_width - best.width <= SNAP_SLACK {
            best.width = max_width;
        }
        best
    }
}

impl Iterator for ChannelEncoder<'_> {
    type Item = AreaRecord;

    fn next(&mut self) -> Option<AreaRecord> {
        let (x, y) = self.coverage.frontier()?;
        let rect = self.grow(x, y);
        let record = AreaRecord::from_plane(self.plane, rect);
        self.coverage.commit(rect);
        Some(record)
    }
}

/// Partition one plane into rectangle records.
pub fn encode_channel(
    plane: &Plane,
    options: &QualityOptions,
) -> Result<ChannelPartition, CodecError> {
    options.validate()?;
    if plane.is_empty() {
        return Err(CodecError::InvalidDimensions {
            width: plane.width(),
            height: plane.height(),
        });
    }
    let areas = ChannelEncoder::new(plane, options).collect();
    Ok(ChannelPartition::new(plane.width(), plane.height(), areas))
}

/// Encode all four channels of `image`.
///
/// Channels share no state and are encoded on the rayon pool when the
/// `parallel` feature is enabled; the result does not depend on it.
pub fn encode(image: &Image, options: &QualityOptions) -> Result<EncodedImage, CodecError> {
    options.validate()?;
    let encode_one = |kind: ChannelKind| {
        encode_channel(image.plane(kind), options).map_err(|e| e.in_channel(kind))
    };

    let [red, green, blue, alpha] = ChannelKind::ALL;

    #[cfg(feature = "parallel")]
    let ((r, g), (b, a)) = rayon::join(
        || rayon::join(|| encode_one(red), || encode_one(green)),
        || rayon::join(|| encode_one(blue), || encode_one(alpha)),
    );
    #[cfg(not(feature = "parallel"))]
    let ((r, g), (b, a)) = (
        (encode_one(red), encode_one(green)),
        (encode_one(blue), encode_one(alpha)),
    );

    EncodedImage::from_channels([r?, g?, b?, a?])
}
