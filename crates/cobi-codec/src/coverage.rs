//! Per-channel occupancy grid with a cached frontier cursor.
//!
//! The frontier is the row-major smallest pixel not yet covered by a
//! committed rectangle. Rectangles are committed at the frontier and grow
//! right and down from it, so every pixel before the frontier stays covered
//! for the rest of the encode and the scan for the next frontier can resume
//! where the previous one stopped.

use crate::area::Rect;

/// Occupancy grid owned by exactly one channel encoder.
#[derive(Debug, Clone)]
pub struct CoverageTracker {
    width: usize,
    height: usize,
    covered: Vec<bool>,
    frontier: Option<(usize, usize)>,
    remaining: usize,
}

impl CoverageTracker {
    /// A fully uncovered `width x height` grid with the frontier at `(0, 0)`.
    pub fn new(width: usize, height: usize) -> Self {
        let total = width * height;
        Self {
            width,
            height,
            covered: vec![false; total],
            frontier: (total > 0).then_some((0, 0)),
            remaining: total,
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

    /// Current frontier, or `None` once every pixel is covered.
    #[inline]
    pub fn frontier(&self) -> Option<(usize, usize)> {
        self.frontier
    }

    /// Number of pixels not yet covered.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[inline]
    pub fn is_covered(&self, x: usize, y: usize) -> bool {
        self.covered[y * self.width + x]
    }

    /// Length of the uncovered run starting at `(x, y)` along its row,
    /// capped at `cap`.
    pub fn run_width(&self, x: usize, y: usize, cap: usize) -> usize {
        let row = &self.covered[y * self.width + x..(y + 1) * self.width];
        row.iter().take(cap).take_while(|&&covered| !covered).count()
    }

    /// Mark every pixel of `rect` as covered and advance the frontier.
    ///
    /// # Panics
    ///
    /// Panics if `rect` reaches outside the grid. Committing a pixel twice is
    /// a logic error caught by a debug assertion.
    pub fn commit(&mut self, rect: Rect) {
        assert!(
            rect.right() <= self.width && rect.bottom() <= self.height,
            "rectangle {:?} outside {}x{} grid",
            rect,
            self.width,
            self.height
        );
        for y in rect.y..rect.bottom() {
            let row = &mut self.covered[y * self.width + rect.x..y * self.width + rect.right()];
            debug_assert!(
                row.iter().all(|&covered| !covered),
                "row {} of {:?} is already covered",
                y,
                rect
            );
            row.fill(true);
        }
        self.remaining -= rect.area();
        self.advance_frontier();
    }

    fn advance_frontier(&mut self) {
        let Some((fx, fy)) = self.frontier else {
            return;
        };
        let start = fy * self.width + fx;
        self.frontier = self.covered[start..]
            .iter()
            .position(|&covered| !covered)
            .map(|offset| {
                let index = start + offset;
                (index % self.width, index / self.width)
            });
    }
}
