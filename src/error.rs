use cobi_codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CobiError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported color type: {0}")]
    UnsupportedColorType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural errors of the `.cobi` byte layout.
///
/// Semantic validity of the records (coverage, bounds) is left to the
/// decoder and reported as [`CodecError`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    #[error("Not a cobi file (bad magic)")]
    BadMagic,

    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u8),

    #[error("Truncated container at byte {offset}")]
    Truncated { offset: usize },

    #[error("{0} trailing bytes after last record")]
    TrailingBytes(usize),
}
