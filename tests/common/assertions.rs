//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

use cobi_codec::{ChannelKind, EncodedImage, Image};

/// Assert every channel's records tile the raster exactly once
pub fn assert_full_coverage(encoded: &EncodedImage) {
    for kind in ChannelKind::ALL {
        let partition = encoded.channel(kind);
        assert_eq!(
            partition.validate(),
            Ok(()),
            "Channel {} does not tile {}x{}",
            kind,
            partition.width(),
            partition.height()
        );
    }
}

/// Assert the decoded image keeps every record's corner samples
pub fn assert_corners_preserved(original: &Image, encoded: &EncodedImage, decoded: &Image) {
    for kind in ChannelKind::ALL {
        for area in encoded.channel(kind).areas() {
            for (x, y) in area.rect().corner_positions() {
                assert_eq!(
                    decoded.plane(kind).get(x, y),
                    original.plane(kind).get(x, y),
                    "Channel {} corner ({}, {}) changed",
                    kind,
                    x,
                    y
                );
            }
        }
    }
}

/// Mean absolute sample error between two images of equal size
pub fn mean_abs_error(a: &Image, b: &Image) -> f64 {
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    let a = a.to_rgba();
    let b = b.to_rgba();
    let total: u64 = a.iter().zip(&b).map(|(&x, &y)| x.abs_diff(y) as u64).sum();
    total as f64 / a.len() as f64
}
