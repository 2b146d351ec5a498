//! Encoded channel partitions and the four-channel encoded image.

use crate::area::AreaRecord;
use crate::error::CodecError;
use crate::raster::ChannelKind;

/// Ordered rectangle records covering one channel of a `width x height`
/// raster.
///
/// Records produced by the encoder are disjoint, tile the raster exactly and
/// appear in ascending frontier order. Partitions built from external data
/// carry no such guarantee until [`validate`](Self::validate) succeeds; the
/// decoder always validates before reconstructing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPartition {
    width: usize,
    height: usize,
    areas: Vec<AreaRecord>,
}

impl ChannelPartition {
    pub fn new(width: usize, height: usize, areas: Vec<AreaRecord>) -> Self {
        Self {
            width,
            height,
            areas,
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
    pub fn areas(&self) -> &[AreaRecord] {
        &self.areas
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Bounding size spanned by the records alone, ignoring the declared
    /// dimensions.
    pub fn extent(&self) -> (usize, usize) {
        self.areas.iter().fold((0, 0), |(w, h), area| {
            let rect = area.rect();
            (w.max(rect.right()), h.max(rect.bottom()))
        })
    }

    /// Check that the records tile the declared raster exactly.
    ///
    /// Reports, in this order of precedence per record: zero-sized records,
    /// records outside the raster, pixels covered twice; then the first
    /// uncovered pixel in row-major order.
    ///
    /// Memory use is bounded by the records' total area, not by the
    /// declared dimensions. When the records cannot fill the raster the
    /// first uncovered pixel is reported without scanning for overlaps.
    pub fn validate(&self) -> Result<(), CodecError> {
        let mut record_area = 0usize;
        for (index, area) in self.areas.iter().enumerate() {
            let rect = area.rect();
            if rect.width == 0 || rect.height == 0 {
                return Err(CodecError::InvalidArea { index });
            }
            if rect.right() > self.width || rect.bottom() > self.height {
                return Err(CodecError::AreaOutOfBounds {
                    index,
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                });
            }
            record_area = record_area.saturating_add(rect.area());
        }

        match self.width.checked_mul(self.height) {
            Some(raster_area) if record_area >= raster_area => self.check_tiling(raster_area),
            _ => Err(self.first_gap(record_area)),
        }
    }

    /// Full occupancy scan; `raster_area` is no larger than the records'
    /// total area.
    fn check_tiling(&self, raster_area: usize) -> Result<(), CodecError> {
        let mut covered = vec![false; raster_area];
        for area in &self.areas {
            let rect = area.rect();
            for y in rect.y..rect.bottom() {
                for x in rect.x..rect.right() {
                    let cell = &mut covered[y * self.width + x];
                    if *cell {
                        return Err(CodecError::OverlappingArea { x, y });
                    }
                    *cell = true;
                }
            }
        }

        match covered.iter().position(|&c| !c) {
            Some(index) => Err(self.gap_at(index)),
            None => Ok(()),
        }
    }

    /// First uncovered pixel when the records cover fewer than
    /// `width * height` pixels.
    ///
    /// At most `record_area` pixels are covered, so the first gap lies within
    /// the first `record_area + 1` pixels in row-major order and only that
    /// prefix is tracked.
    fn first_gap(&self, record_area: usize) -> CodecError {
        let prefix = record_area.saturating_add(1);
        let mut covered = vec![false; prefix];
        for area in &self.areas {
            let rect = area.rect();
            for y in rect.y..rect.bottom() {
                let start = match y
                    .checked_mul(self.width)
                    .and_then(|row| row.checked_add(rect.x))
                {
                    Some(start) if start < prefix => start,
                    _ => break,
                };
                let end = (start + rect.width).min(prefix);
                covered[start..end].fill(true);
            }
        }

        let index = covered.iter().position(|&c| !c).unwrap_or(record_area);
        self.gap_at(index)
    }

    fn gap_at(&self, index: usize) -> CodecError {
        CodecError::CoverageGap {
            x: index % self.width,
            y: index / self.width,
        }
    }

    pub fn into_areas(self) -> Vec<AreaRecord> {
        self.areas
    }
}

/// Four channel partitions (R, G, B, A) of identical shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    channels: [ChannelPartition; 4],
}

impl EncodedImage {
    /// Bundle four partitions, rejecting channels whose shape differs from
    /// the red channel's.
    pub fn from_channels(channels: [ChannelPartition; 4]) -> Result<Self, CodecError> {
        let expected = channels[0].shape();
        if expected.0 == 0 || expected.1 == 0 {
            return Err(CodecError::InvalidDimensions {
                width: expected.0,
                height: expected.1,
            });
        }
        for kind in ChannelKind::ALL {
            let actual = channels[kind.index()].shape();
            if actual != expected {
                return Err(CodecError::DimensionMismatch {
                    channel: kind,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self { channels })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.channels[0].width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.channels[0].height()
    }

    #[inline]
    pub fn channel(&self, kind: ChannelKind) -> &ChannelPartition {
        &self.channels[kind.index()]
    }

    #[inline]
    pub fn channels(&self) -> &[ChannelPartition; 4] {
        &self.channels
    }

    /// Total number of records over all four channels.
    pub fn area_count(&self) -> usize {
        self.channels.iter().map(ChannelPartition::len).sum()
    }

    pub fn into_channels(self) -> [ChannelPartition; 4] {
        self.channels
    }
}
