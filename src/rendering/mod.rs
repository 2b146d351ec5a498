pub mod png_io;

pub use png_io::{encode_png, PngSink, PngSource};

use crate::error::CobiError;
use cobi_codec::Image;

/// Something that yields a decoded RGBA raster
pub trait ImageSource {
    fn read(&self) -> Result<Image, CobiError>;
}

/// Something that accepts a decoded RGBA raster
pub trait ImageSink {
    fn write(&self, image: &Image) -> Result<(), CobiError>;
}
