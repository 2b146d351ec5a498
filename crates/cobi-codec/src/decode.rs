//! Reconstruction of planes from rectangle records.

use crate::error::CodecError;
use crate::partition::{ChannelPartition, EncodedImage};
use crate::raster::{ChannelKind, Image, Plane};

/// Rebuild one plane by interpolating every record into place.
///
/// The partition is validated first, so a successful decode has written
/// every output pixel exactly once.
pub fn decode_channel(partition: &ChannelPartition) -> Result<Plane, CodecError> {
    if partition.width() == 0 || partition.height() == 0 {
        return Err(CodecError::InvalidDimensions {
            width: partition.width(),
            height: partition.height(),
        });
    }
    partition.validate()?;

    let mut plane = Plane::filled(partition.width(), partition.height(), 0);
    for area in partition.areas() {
        let rect = area.rect();
        let block = area.interpolate();
        for dy in 0..rect.height {
            let y = rect.y + dy;
            let start = y * plane.width() + rect.x;
            plane.samples_mut()[start..start + rect.width].copy_from_slice(block.row(dy));
        }
    }
    Ok(plane)
}

/// Rebuild a four-channel image.
///
/// Errors from a channel are wrapped with the channel they came from.
pub fn decode(encoded: &EncodedImage) -> Result<Image, CodecError> {
    let decode_one = |kind: ChannelKind| {
        decode_channel(encoded.channel(kind)).map_err(|e| e.in_channel(kind))
    };

    let [red, green, blue, alpha] = ChannelKind::ALL;

    #[cfg(feature = "parallel")]
    let ((r, g), (b, a)) = rayon::join(
        || rayon::join(|| decode_one(red), || decode_one(green)),
        || rayon::join(|| decode_one(blue), || decode_one(alpha)),
    );
    #[cfg(not(feature = "parallel"))]
    let ((r, g), (b, a)) = (
        (decode_one(red), decode_one(green)),
        (decode_one(blue), decode_one(alpha)),
    );

    Image::from_planes([r?, g?, b?, a?])
}
