//! Rectangle geometry and the persisted per-rectangle record.

use crate::interpolate::{interpolate, Block, Corners};
use crate::raster::Plane;

/// Largest width or height a single area may have.
pub const MAX_AREA_SIDE: usize = u8::MAX as usize;

/// Axis-aligned pixel rectangle `[x, x + width) x [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[inline]
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// One past the last column.
    #[inline]
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// One past the last row.
    #[inline]
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.x <= x && x < self.right() && self.y <= y && y < self.bottom()
    }

    /// Corner pixel positions in [`Corners`] order.
    pub fn corner_positions(&self) -> [(usize, usize); 4] {
        let last_x = self.right() - 1;
        let last_y = self.bottom() - 1;
        [
            (self.x, self.y),
            (last_x, self.y),
            (self.x, last_y),
            (last_x, last_y),
        ]
    }

    /// Sample the four corners of this rectangle from `plane`.
    pub fn corners_in(&self, plane: &Plane) -> Corners {
        self.corner_positions().map(|(x, y)| plane.get(x, y))
    }
}

/// One encoded rectangle of one channel: position, size and the true
/// samples at its four corners.
///
/// Width and height are bounded by the one-byte fields of the container
/// format, so a single record never spans more than 255 pixels per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaRecord {
    pub x: u32,
    pub y: u32,
    pub width: u8,
    pub height: u8,
    pub corners: Corners,
}

impl AreaRecord {
    /// Capture `rect` from `plane`, recording its true corner samples.
    ///
    /// # Panics
    ///
    /// Panics if a side of `rect` exceeds [`MAX_AREA_SIDE`].
    pub fn from_plane(plane: &Plane, rect: Rect) -> Self {
        assert!(
            rect.width <= MAX_AREA_SIDE && rect.height <= MAX_AREA_SIDE,
            "area {}x{} exceeds the {} pixel side limit",
            rect.width,
            rect.height,
            MAX_AREA_SIDE
        );
        Self {
            x: rect.x as u32,
            y: rect.y as u32,
            width: rect.width as u8,
            height: rect.height as u8,
            corners: rect.corners_in(plane),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x as usize,
            self.y as usize,
            self.width as usize,
            self.height as usize,
        )
    }

    /// Whether the pixel `(x, y)` lies inside this record's rectangle.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.rect().contains(x, y)
    }

    /// Reconstruct this record's rectangle.
    #[inline]
    pub fn interpolate(&self) -> Block {
        interpolate(self.width, self.height, self.corners)
    }
}
