use std::path::{Path, PathBuf};
use std::time::Instant;

use cobi_codec::{corner_map, decode, encode, ChannelKind, EncodedImage, Image, QualityOptions};
use serde::Serialize;

use crate::error::CobiError;
use crate::models::AppConfig;
use crate::rendering::{ImageSink, ImageSource, PngSink, PngSource};
use crate::services::container::{read_container, write_container};

/// Summary of one encoded image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressReport {
    pub width: usize,
    pub height: usize,
    /// Record count per channel (R, G, B, A)
    pub areas: [usize; 4],
    /// Size of the raw RGBA8 raster
    pub raw_bytes: usize,
    /// Size of the `.cobi` container
    pub encoded_bytes: usize,
}

impl CompressReport {
    pub fn new(encoded: &EncodedImage, encoded_bytes: usize) -> Self {
        Self {
            width: encoded.width(),
            height: encoded.height(),
            areas: ChannelKind::ALL.map(|kind| encoded.channel(kind).len()),
            raw_bytes: encoded
                .width()
                .saturating_mul(encoded.height())
                .saturating_mul(4),
            encoded_bytes,
        }
    }

    /// Container size relative to raw RGBA
    pub fn ratio(&self) -> f64 {
        self.encoded_bytes as f64 / self.raw_bytes as f64
    }

    pub fn total_areas(&self) -> usize {
        self.areas.iter().sum()
    }
}

/// Paths written by a debug compress run
#[derive(Debug, Clone, PartialEq)]
pub struct DebugOutputs {
    pub decoded: PathBuf,
    pub corner_map: PathBuf,
}

impl DebugOutputs {
    /// `<stem>_decoded.png` and `<stem>_decoded_debug.png` next to `output`.
    pub fn beside(output: &Path) -> Self {
        let stem = output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            decoded: output.with_file_name(format!("{stem}_decoded.png")),
            corner_map: output.with_file_name(format!("{stem}_decoded_debug.png")),
        }
    }
}

/// Pipeline that orchestrates source → encode → container and back
pub struct CodecPipeline {
    options: QualityOptions,
    optimize_png: bool,
}

impl CodecPipeline {
    pub fn new(options: QualityOptions) -> Self {
        Self {
            options,
            optimize_png: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.quality_options()).optimize_png(config.output.optimize_png)
    }

    /// Re-compress written PNGs with oxipng.
    pub fn optimize_png(mut self, enabled: bool) -> Self {
        self.optimize_png = enabled;
        self
    }

    pub fn options(&self) -> &QualityOptions {
        &self.options
    }

    /// Read and encode an image
    pub fn encode_source(&self, source: &impl ImageSource) -> Result<EncodedImage, CobiError> {
        let image = source.read()?;
        let start = Instant::now();
        let encoded = encode(&image, &self.options)?;

        for kind in ChannelKind::ALL {
            tracing::debug!(
                channel = %kind,
                areas = encoded.channel(kind).len(),
                "Encoded channel"
            );
        }
        tracing::info!(
            width = image.width(),
            height = image.height(),
            areas = encoded.area_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Encoded image"
        );
        Ok(encoded)
    }

    /// Encode a PNG file into a `.cobi` container
    pub fn compress_file(&self, input: &Path, output: &Path) -> Result<CompressReport, CobiError> {
        let encoded = self.encode_source(&PngSource::from_path(input))?;
        self.write_encoded(&encoded, output)
    }

    /// Serialize `encoded` to `output`
    pub fn write_encoded(
        &self,
        encoded: &EncodedImage,
        output: &Path,
    ) -> Result<CompressReport, CobiError> {
        let bytes = write_container(encoded);
        std::fs::write(output, &bytes)?;

        let report = CompressReport::new(encoded, bytes.len());
        tracing::info!(
            path = %output.display(),
            bytes = report.encoded_bytes,
            ratio = report.ratio(),
            "Wrote container"
        );
        Ok(report)
    }

    /// Write the decoded image and the corner map next to `output`
    pub fn write_debug_images(
        &self,
        encoded: &EncodedImage,
        output: &Path,
    ) -> Result<DebugOutputs, CobiError> {
        let outputs = DebugOutputs::beside(output);
        let decoded = decode(encoded)?;
        self.sink(&outputs.decoded).write(&decoded)?;
        self.sink(&outputs.corner_map).write(&corner_map(encoded))?;

        tracing::info!(
            decoded = %outputs.decoded.display(),
            corner_map = %outputs.corner_map.display(),
            "Wrote debug images"
        );
        Ok(outputs)
    }

    /// Parse a `.cobi` file
    pub fn read_encoded(&self, input: &Path) -> Result<EncodedImage, CobiError> {
        let bytes = std::fs::read(input)?;
        let encoded = read_container(&bytes)?;
        tracing::debug!(
            path = %input.display(),
            width = encoded.width(),
            height = encoded.height(),
            areas = encoded.area_count(),
            "Read container"
        );
        Ok(encoded)
    }

    /// Decode a `.cobi` file into a PNG
    pub fn decompress_file(&self, input: &Path, output: &Path) -> Result<Image, CobiError> {
        let encoded = self.read_encoded(input)?;
        let image = decode(&encoded)?;
        self.sink(output).write(&image)?;

        tracing::info!(
            path = %output.display(),
            width = image.width(),
            height = image.height(),
            "Decoded image"
        );
        Ok(image)
    }

    /// Summarize a `.cobi` file without decoding it
    pub fn inspect_file(&self, input: &Path) -> Result<CompressReport, CobiError> {
        let size = std::fs::metadata(input)?.len() as usize;
        let encoded = self.read_encoded(input)?;
        Ok(CompressReport::new(&encoded, size))
    }

    fn sink(&self, path: &Path) -> PngSink {
        PngSink::new(path).optimize(self.optimize_png)
    }
}
