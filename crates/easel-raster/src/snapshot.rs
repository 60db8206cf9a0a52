//! Snapshots
//!
//! Owned copies of a surface's premultiplied pixels. The byte form is a small
//! header followed by the raw rows, so a round trip is bit-exact.

const MAGIC: &[u8; 4] = b"ESNP";
const HEADER_LEN: usize = 12;

/// Byte length of `width * height` RGBA pixels, `None` on overflow
pub(crate) fn pixel_len(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)?.checked_mul(4)
}

/// Encoded copy of a surface's full pixel content
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Snapshot {
    pub(crate) fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self { width, height, data }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA rows
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Approximate heap footprint in bytes
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Serialize to a transportable blob
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.data.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.data);
        out
    }

    /// Parse a blob produced by [`Snapshot::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::RasterError> {
        if bytes.len() < HEADER_LEN || &bytes[0..4] != MAGIC {
            return Err(crate::RasterError::BadSnapshotHeader);
        }
        let width = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let height = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);

        let data = &bytes[HEADER_LEN..];
        let expected = pixel_len(width, height).ok_or(crate::RasterError::BadSnapshotHeader)?;
        if data.len() != expected {
            return Err(crate::RasterError::InvalidSnapshot {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self::new(width, height, data.to_vec()))
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}
