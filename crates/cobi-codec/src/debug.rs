//! Visualisation of where the encoder placed its rectangles.

use crate::partition::EncodedImage;
use crate::raster::{ChannelKind, Image, Plane};

/// Render the corner positions of every record as an opaque image.
///
/// Each color plane starts black and gets a full-intensity sample at the
/// four corners of each record of that channel, so rectangle boundaries of
/// the red, green and blue partitions show up in their own color. Alpha
/// records are not drawn; the alpha plane is fully opaque.
pub fn corner_map(encoded: &EncodedImage) -> Image {
    let (width, height) = (encoded.width(), encoded.height());
    let color_plane = |kind: ChannelKind| {
        let mut plane = Plane::filled(width, height, 0);
        for area in encoded.channel(kind).areas() {
            for (x, y) in area.rect().corner_positions() {
                plane.set(x, y, u8::MAX);
            }
        }
        plane
    };

    Image::from_validated_planes([
        color_plane(ChannelKind::Red),
        color_plane(ChannelKind::Green),
        color_plane(ChannelKind::Blue),
        Plane::filled(width, height, u8::MAX),
    ])
}
