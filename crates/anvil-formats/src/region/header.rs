//! Region header tables: chunk locations and timestamps.
//!
//! The header occupies the first two sectors of a region file. Bytes
//! [0, 4096) are 1024 location entries of 4 bytes each (3-byte big-endian
//! sector offset, high byte first, then a 1-byte sector count); bytes
//! [4096, 8192) are 1024 big-endian u32 timestamps. Both tables are
//! row-major over the chunk grid with z as the outer index.

use super::error::{RegionError, RegionResult};
use super::{CHUNKS_PER_REGION, HEADER_SIZE, REGION_DIM, SECTOR_SIZE, local_to_index};

/// Size of one location entry in bytes.
pub const LOCATION_ENTRY_SIZE: usize = 4;

/// One entry of the location table.
///
/// A `sector_count` of 0 marks the cell absent. For populated cells the
/// offset addresses 4096-byte sectors from the start of the file; sectors
/// 0 and 1 hold the header tables themselves, so valid chunk offsets start
/// at 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationEntry {
    /// Starting sector of the chunk's record, decoded from 3 big-endian bytes.
    pub sector_offset: u32,
    /// Number of whole sectors reserved for the record.
    pub sector_count: u8,
}

impl LocationEntry {
    /// Decode an entry from its 4 on-disk bytes.
    pub fn parse(bytes: [u8; LOCATION_ENTRY_SIZE]) -> Self {
        Self {
            sector_offset: decode_sector_offset([bytes[0], bytes[1], bytes[2]]),
            sector_count: bytes[3],
        }
    }

    /// Whether this entry marks an absent chunk.
    pub fn is_empty(&self) -> bool {
        self.sector_count == 0
    }

    /// Byte offset of the chunk record this entry points at.
    pub fn byte_offset(&self) -> u64 {
        u64::from(self.sector_offset) * SECTOR_SIZE as u64
    }

    /// Bytes covered by the reserved sector run.
    pub fn reserved_bytes(&self) -> u64 {
        u64::from(self.sector_count) * SECTOR_SIZE as u64
    }
}

/// Decode a 3-byte big-endian sector offset, high byte first.
pub fn decode_sector_offset(bytes: [u8; 3]) -> u32 {
    u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]])
}

/// Parsed header tables of a region file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionHeader {
    locations: Vec<LocationEntry>,
    timestamps: Vec<u32>,
}

impl RegionHeader {
    /// Parse both header tables from the start of a region buffer.
    ///
    /// Absent cells (sector count 0) are normalized to an all-zero
    /// location so callers see one canonical "absent" value regardless of
    /// what the unused offset bytes contain. Timestamps keep their raw
    /// decoded value for every cell; they are informational and never
    /// validated.
    pub fn parse(data: &[u8]) -> RegionResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(RegionError::DataTooShort {
                actual: data.len(),
                minimum: HEADER_SIZE,
            });
        }

        let mut locations = Vec::with_capacity(CHUNKS_PER_REGION);
        for i in 0..CHUNKS_PER_REGION {
            let pos = i * LOCATION_ENTRY_SIZE;
            let mut raw = [0u8; LOCATION_ENTRY_SIZE];
            raw.copy_from_slice(&data[pos..pos + LOCATION_ENTRY_SIZE]);
            let entry = LocationEntry::parse(raw);
            locations.push(if entry.is_empty() {
                LocationEntry::default()
            } else {
                entry
            });
        }

        let mut timestamps = Vec::with_capacity(CHUNKS_PER_REGION);
        for i in 0..CHUNKS_PER_REGION {
            let pos = SECTOR_SIZE + i * 4;
            timestamps.push(u32::from_be_bytes([
                data[pos],
                data[pos + 1],
                data[pos + 2],
                data[pos + 3],
            ]));
        }

        Ok(Self {
            locations,
            timestamps,
        })
    }

    /// Location entry for a cell, or `None` when out of range.
    pub fn location(&self, x: usize, z: usize) -> Option<LocationEntry> {
        (x < REGION_DIM && z < REGION_DIM).then(|| self.locations[local_to_index(x, z)])
    }

    /// Last-modified timestamp for a cell, or `None` when out of range.
    pub fn timestamp(&self, x: usize, z: usize) -> Option<u32> {
        (x < REGION_DIM && z < REGION_DIM).then(|| self.timestamps[local_to_index(x, z)])
    }

    /// All 1024 location entries in row-major (z, x) order.
    pub fn locations(&self) -> &[LocationEntry] {
        &self.locations
    }

    /// All 1024 timestamps in row-major (z, x) order.
    pub fn timestamps(&self) -> &[u32] {
        &self.timestamps
    }
}
