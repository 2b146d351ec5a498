//! Test images and file helpers.

use std::path::{Path, PathBuf};

use cobi::rendering::encode_png;
use cobi_codec::Image;

/// Smooth diagonal gradient with a flat blue plane and opaque alpha
pub fn gradient(width: usize, height: usize) -> Image {
    let rgba: Vec<u8> = (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| {
                [
                    ((x * 255) / width.max(1)) as u8,
                    ((y * 255) / height.max(1)) as u8,
                    128,
                    255,
                ]
            })
        })
        .collect();
    Image::from_rgba(width, height, &rgba).unwrap()
}

/// Deterministic high-frequency texture that defeats large rectangles
pub fn noise(width: usize, height: usize) -> Image {
    let mut state: u32 = 0x9e37_79b9;
    let rgba: Vec<u8> = (0..width * height * 4)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    Image::from_rgba(width, height, &rgba).unwrap()
}

/// Uniform image of a single RGBA color
pub fn flat(width: usize, height: usize, rgba: [u8; 4]) -> Image {
    let data: Vec<u8> = (0..width * height).flat_map(|_| rgba).collect();
    Image::from_rgba(width, height, &data).unwrap()
}

/// Write `image` as a PNG into `dir` and return its path
pub fn write_png(dir: &Path, name: &str, image: &Image) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_png(image, false).unwrap()).unwrap();
    path
}

/// Encode raw PNG data with explicit color type and depth
pub fn raw_png(
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    data: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    buf
}
