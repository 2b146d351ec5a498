//! Separable linear interpolation of a rectangle from its four corners.
//!
//! This is the only reconstruction kernel in the crate. The encoder scores
//! candidate rectangles with it and the decoder rebuilds channels with it,
//! so both sides see bit-identical samples.
//!
//! # Rounding
//!
//! Each interpolated sample is computed as `start + i * step` in `f32` and
//! truncated to `u8` on its own. Steps are never accumulated in the integer
//! domain, which keeps the rounding independent of the traversal order.

/// Corner order used throughout the crate: top-left, top-right,
/// bottom-left, bottom-right.
pub type Corners = [u8; 4];

/// A reconstructed rectangle, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl Block {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at column `x`, row `y` relative to the block origin.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.samples[y * self.width + x]
    }

    /// One row as a slice.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.samples[y * self.width..(y + 1) * self.width]
    }

    /// Samples of column `x`, top to bottom.
    pub fn column(&self, x: usize) -> Vec<u8> {
        (0..self.height).map(|y| self.get(x, y)).collect()
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }
}

/// Interpolate a `width x height` rectangle from its corner samples.
///
/// The top and bottom rows are interpolated first between their left and
/// right corners, then every column between its (already filled) top and
/// bottom sample. A width of 1 skips the horizontal pass, a height of 1 the
/// vertical pass, and a 1x1 block is the top-left corner verbatim.
///
/// # Panics
///
/// Panics if `width` or `height` is zero.
///
/// # Example
///
/// ```
/// use cobi_codec::interpolate;
///
/// let block = interpolate(3, 1, [0, 8, 0, 8]);
/// assert_eq!(block.row(0), &[0, 4, 8]);
/// ```
pub fn interpolate(width: u8, height: u8, corners: Corners) -> Block {
    assert!(
        width > 0 && height > 0,
        "cannot interpolate a {}x{} block",
        width,
        height
    );
    let w = width as usize;
    let h = height as usize;

    if w == 1 && h == 1 {
        return Block {
            width: 1,
            height: 1,
            samples: vec![corners[0]],
        };
    }

    let mut samples = vec![0u8; w * h];
    let last_row = (h - 1) * w;
    samples[0] = corners[0];
    samples[w - 1] = corners[1];
    samples[last_row] = corners[2];
    samples[last_row + w - 1] = corners[3];

    interpolate_span(&mut samples[..w], 1);
    interpolate_span(&mut samples[last_row..], 1);

    for x in 0..w {
        interpolate_span(&mut samples[x..], w);
    }

    Block {
        width: w,
        height: h,
        samples,
    }
}

/// Fill the interior of a strided span between its first and last element.
///
/// The span starts at `values[0]` and its last element sits at the final
/// index reachable with `stride` inside `values`.
fn interpolate_span(values: &mut [u8], stride: usize) {
    let len = (values.len() - 1) / stride + 1;
    if len <= 2 {
        return;
    }
    let start = values[0] as f32;
    let end = values[(len - 1) * stride] as f32;
    let step = (end - start) / (len - 1) as f32;
    for i in 1..len - 1 {
        values[i * stride] = (start + i as f32 * step) as u8;
    }
}
