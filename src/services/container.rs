//! `.cobi` container serialization.
//!
//! Little-endian layout:
//!
//! ```text
//! magic    "COBI"            4 bytes
//! version  u8 = 1            1 byte
//! width    u32               4 bytes
//! height   u32               4 bytes
//! 4 x channel (R, G, B, A):
//!   count  u32               4 bytes
//!   count x record:
//!     x u32, y u32, w u8, h u8, corner0..corner3 u8   (14 bytes)
//! ```
//!
//! Only the byte structure is checked here. Whether the records actually
//! tile the raster is the decoder's concern.

use cobi_codec::{AreaRecord, ChannelPartition, EncodedImage};

use crate::error::{CobiError, ContainerError};

pub const MAGIC: &[u8; 4] = b"COBI";
pub const VERSION: u8 = 1;

/// Magic, version, width, height
pub const HEADER_LEN: usize = 4 + 1 + 4 + 4;
/// Bytes per serialized record
pub const RECORD_LEN: usize = 4 + 4 + 1 + 1 + 4;

/// Exact serialized size of `encoded`.
pub fn encoded_len(encoded: &EncodedImage) -> usize {
    HEADER_LEN + 4 * 4 + encoded.area_count() * RECORD_LEN
}

/// Serialize an encoded image.
pub fn write_container(encoded: &EncodedImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(encoded));
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&(encoded.width() as u32).to_le_bytes());
    out.extend_from_slice(&(encoded.height() as u32).to_le_bytes());

    for partition in encoded.channels() {
        out.extend_from_slice(&(partition.len() as u32).to_le_bytes());
        for area in partition.areas() {
            out.extend_from_slice(&area.x.to_le_bytes());
            out.extend_from_slice(&area.y.to_le_bytes());
            out.push(area.width);
            out.push(area.height);
            out.extend_from_slice(&area.corners);
        }
    }
    out
}

/// Parse a serialized encoded image.
pub fn read_container(data: &[u8]) -> Result<EncodedImage, CobiError> {
    let mut reader = ByteReader::new(data);

    if reader.take(MAGIC.len())? != MAGIC {
        return Err(ContainerError::BadMagic.into());
    }
    let version = reader.read_u8()?;
    if version != VERSION {
        return Err(ContainerError::UnsupportedVersion(version).into());
    }
    let width = reader.read_u32()? as usize;
    let height = reader.read_u32()? as usize;

    let channels = [
        read_channel(&mut reader, width, height)?,
        read_channel(&mut reader, width, height)?,
        read_channel(&mut reader, width, height)?,
        read_channel(&mut reader, width, height)?,
    ];
    if reader.remaining() > 0 {
        return Err(ContainerError::TrailingBytes(reader.remaining()).into());
    }

    Ok(EncodedImage::from_channels(channels)?)
}

fn read_channel(
    reader: &mut ByteReader<'_>,
    width: usize,
    height: usize,
) -> Result<ChannelPartition, ContainerError> {
    let count = reader.read_u32()? as usize;
    // Checked up front so a corrupt count cannot trigger a huge allocation.
    if reader.remaining() / RECORD_LEN < count {
        return Err(ContainerError::Truncated {
            offset: reader.data.len(),
        });
    }
    let mut areas = Vec::with_capacity(count);
    for _ in 0..count {
        areas.push(reader.read_record()?);
    }
    Ok(ChannelPartition::new(width, height, areas))
}

/// Cursor over a byte slice that reports the offset of a short read.
struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ContainerError> {
        if self.remaining() < n {
            return Err(ContainerError::Truncated {
                offset: self.data.len(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8, ContainerError> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, ContainerError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_record(&mut self) -> Result<AreaRecord, ContainerError> {
        let x = self.read_u32()?;
        let y = self.read_u32()?;
        let bytes = self.take(6)?;
        Ok(AreaRecord {
            x,
            y,
            width: bytes[0],
            height: bytes[1],
            corners: [bytes[2], bytes[3], bytes[4], bytes[5]],
        })
    }
}
