use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

use cobi_codec::{CodecError, Image};

use super::{ImageSink, ImageSource};
use crate::error::CobiError;

enum Input {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// PNG file or buffer decoded to RGBA8
pub struct PngSource {
    input: Input,
}

impl PngSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            input: Input::Path(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            input: Input::Bytes(bytes.into()),
        }
    }
}

impl ImageSource for PngSource {
    fn read(&self) -> Result<Image, CobiError> {
        match &self.input {
            Input::Path(path) => decode_png(BufReader::new(File::open(path)?)),
            Input::Bytes(bytes) => decode_png(Cursor::new(bytes.as_slice())),
        }
    }
}

/// Decode any 8-bit (or narrower) PNG into an RGBA image.
///
/// Palettes and sub-byte depths are expanded; gray, gray+alpha and RGB are
/// widened to RGBA with opaque alpha where the source has none.
fn decode_png(input: impl Read) -> Result<Image, CobiError> {
    let mut decoder = png::Decoder::new(input);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| CobiError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| CobiError::PngDecode(e.to_string()))?;
    if info.bit_depth != png::BitDepth::Eight {
        return Err(CodecError::UnsupportedSampleDepth {
            bits: info.bit_depth as u8,
        }
        .into());
    }

    let data = &buf[..info.buffer_size()];
    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => data
            .iter()
            .flat_map(|&g| [g, g, g, u8::MAX])
            .collect(),
        other => return Err(CobiError::UnsupportedColorType(format!("{:?}", other))),
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );
    Ok(Image::from_rgba(
        info.width as usize,
        info.height as usize,
        &rgba,
    )?)
}

/// RGBA8 PNG writer
pub struct PngSink {
    path: PathBuf,
    optimize: bool,
}

impl PngSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            optimize: false,
        }
    }

    /// Re-compress the output with oxipng.
    pub fn optimize(mut self, enabled: bool) -> Self {
        self.optimize = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for PngSink {
    fn write(&self, image: &Image) -> Result<(), CobiError> {
        let bytes = encode_png(image, self.optimize)?;
        std::fs::write(&self.path, &bytes)?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Wrote PNG");
        Ok(())
    }
}

/// Encode an image as an 8-bit RGBA PNG.
pub fn encode_png(image: &Image, optimize: bool) -> Result<Vec<u8>, CobiError> {
    let rgba = image.to_rgba();
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width() as u32, image.height() as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if optimize {
            // Fast settings; oxipng re-compresses below
            encoder.set_compression(png::Compression::Fast);
            encoder.set_filter(png::FilterType::NoFilter);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| CobiError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&rgba)
            .map_err(|e| CobiError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();
    if !optimize {
        return Ok(png_bytes);
    }

    Ok(oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes))
}
