//! Minecraft Anvil region file format (`.mca`).
//!
//! A region file packs a 32×32 grid of chunks into fixed 4096-byte
//! sectors:
//!
//! ```text
//! Region file:
//! ├── Location table (bytes 0..4096)
//! │   └── 1024 × { sector_offset: u24 BE, sector_count: u8 }, row-major (z, x)
//! ├── Timestamp table (bytes 4096..8192)
//! │   └── 1024 × u32 BE seconds since epoch, same ordering
//! └── Sector data (bytes 8192..EOF, 4096-byte granularity)
//!     └── per chunk, at sector_offset × 4096:
//!         ├── length: u32 BE  (counts the tag byte plus the payload)
//!         ├── tag: u8         (compression scheme, not interpreted here)
//!         └── payload: length − 1 bytes
//! ```
//!
//! Sectors 0 and 1 hold the two header tables, so a populated location
//! entry must point at sector 2 or later. A sector count of 0 marks a cell
//! absent. Sector granularity is coarser than exact byte lengths, so a
//! record under-filling its reserved run is normal slack; the three length
//! sources (sector run, declared record length, file size) must still
//! agree with each other.
//!
//! Loading is all-or-nothing: the first malformed cell rejects the whole
//! file, since a location table that lied once cannot be trusted for the
//! cells that happened to pass.

mod chunk;
/// Region error types
pub mod error;
mod header;

pub use chunk::{CHUNK_HEADER_SIZE, ChunkHeader, ChunkView};
pub use error::{RegionError, RegionResult};
pub use header::{LOCATION_ENTRY_SIZE, LocationEntry, RegionHeader, decode_sector_offset};

/// Size of one sector in bytes.
pub const SECTOR_SIZE: usize = 4096;

/// Total header size: location table plus timestamp table.
pub const HEADER_SIZE: usize = SECTOR_SIZE * 2;

/// Chunks per region edge.
pub const REGION_DIM: usize = 32;

/// Chunks per region (32 × 32 grid).
pub const CHUNKS_PER_REGION: usize = REGION_DIM * REGION_DIM;

/// Convert a world chunk coordinate to its region coordinate.
#[inline]
pub fn chunk_to_region(chunk_coord: i32) -> i32 {
    chunk_coord.div_euclid(REGION_DIM as i32)
}

/// Convert a world chunk coordinate to its 0-31 coordinate within the region.
#[inline]
pub fn chunk_to_local(chunk_coord: i32) -> usize {
    chunk_coord.rem_euclid(REGION_DIM as i32) as usize
}

/// Linear grid index for local coordinates, row-major with z outer.
#[inline]
pub fn local_to_index(x: usize, z: usize) -> usize {
    z * REGION_DIM + x
}

/// Local coordinates for a linear grid index.
#[inline]
pub fn index_to_local(index: usize) -> (usize, usize) {
    (index % REGION_DIM, index / REGION_DIM)
}

/// Resolved payload range of one populated cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChunkSlot {
    payload_offset: usize,
    payload_len: u32,
    compression: u8,
}

/// A fully parsed and validated region file.
///
/// Owns the raw file buffer; every chunk view handed out borrows from it.
/// The structure is immutable after [`RegionFile::parse`] returns, so
/// shared references can be used freely from multiple threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFile {
    data: Vec<u8>,
    header: RegionHeader,
    chunks: Vec<Option<ChunkSlot>>,
}

impl RegionFile {
    /// Parse a region file from its complete contents.
    ///
    /// Takes ownership of the buffer; payload views returned later borrow
    /// from it. Every populated location entry is validated against the
    /// buffer's actual length before any view is recorded, and the first
    /// inconsistency fails the whole parse — no partial result is ever
    /// returned.
    pub fn parse(data: Vec<u8>) -> RegionResult<Self> {
        let header = RegionHeader::parse(&data)?;
        let file_size = data.len() as u64;

        let mut chunks = vec![None; CHUNKS_PER_REGION];
        for z in 0..REGION_DIM {
            for x in 0..REGION_DIM {
                let entry = header.locations()[local_to_index(x, z)];
                if entry.is_empty() {
                    continue;
                }
                chunks[local_to_index(x, z)] = Some(resolve_chunk(&data, x, z, entry, file_size)?);
            }
        }

        Ok(Self {
            data,
            header,
            chunks,
        })
    }

    /// View of the chunk at a cell, or `None` when the cell is absent or
    /// the coordinates are out of range.
    pub fn chunk(&self, x: usize, z: usize) -> Option<ChunkView<'_>> {
        if x >= REGION_DIM || z >= REGION_DIM {
            return None;
        }
        let slot = self.chunks[local_to_index(x, z)]?;
        Some(ChunkView {
            x,
            z,
            payload: &self.data[slot.payload_offset..slot.payload_offset + slot.payload_len as usize],
            compression: slot.compression,
            timestamp: self.header.timestamps()[local_to_index(x, z)],
            location: self.header.locations()[local_to_index(x, z)],
        })
    }

    /// Whether a cell holds a chunk.
    pub fn is_present(&self, x: usize, z: usize) -> bool {
        x < REGION_DIM && z < REGION_DIM && self.chunks[local_to_index(x, z)].is_some()
    }

    /// Location entry for a cell, or `None` when out of range.
    ///
    /// Absent cells report an all-zero entry.
    pub fn location(&self, x: usize, z: usize) -> Option<LocationEntry> {
        self.header.location(x, z)
    }

    /// Last-modified timestamp for a cell, or `None` when out of range.
    pub fn timestamp(&self, x: usize, z: usize) -> Option<u32> {
        self.header.timestamp(x, z)
    }

    /// Iterate over all present chunks in row-major (z, x) order.
    pub fn chunks(&self) -> impl Iterator<Item = ChunkView<'_>> {
        (0..CHUNKS_PER_REGION).filter_map(|index| {
            let (x, z) = index_to_local(index);
            self.chunk(x, z)
        })
    }

    /// Number of present chunks.
    pub fn present_count(&self) -> usize {
        self.chunks.iter().filter(|slot| slot.is_some()).count()
    }

    /// The parsed header tables.
    pub fn header(&self) -> &RegionHeader {
        &self.header
    }

    /// The raw file contents.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size of the file this structure was parsed from.
    pub fn file_size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Validate one populated cell and resolve its payload range.
///
/// The checks run in a fixed order so that the reported error is stable
/// when several are violated at once: header collision, then sector run
/// vs. file size, then declared payload vs. file size, then declared
/// payload vs. reserved sectors. All byte arithmetic is u64 so a maximal
/// 24-bit offset times the sector size cannot overflow.
fn resolve_chunk(
    data: &[u8],
    x: usize,
    z: usize,
    entry: LocationEntry,
    file_size: u64,
) -> RegionResult<ChunkSlot> {
    if entry.sector_offset < 2 {
        return Err(RegionError::LocationInHeader {
            x,
            z,
            sector_offset: entry.sector_offset,
        });
    }

    let start = entry.byte_offset();
    let end_byte = start + entry.reserved_bytes();
    if end_byte > file_size {
        return Err(RegionError::SectorRunOverflow {
            x,
            z,
            sector_count: entry.sector_count,
            end_byte,
            file_size,
        });
    }

    // With at least one reserved sector, the run check above proves the
    // whole first sector is inside the buffer, record header included.
    let record_start = start as usize;
    let mut record = [0u8; CHUNK_HEADER_SIZE];
    record.copy_from_slice(&data[record_start..record_start + CHUNK_HEADER_SIZE]);
    let record_header = ChunkHeader::from_bytes(record);
    let payload_len = record_header.payload_length();

    let payload_start = start + CHUNK_HEADER_SIZE as u64;
    if payload_start + u64::from(payload_len) > file_size {
        return Err(RegionError::PayloadOverflow {
            x,
            z,
            payload_length: payload_len,
            bytes_remaining: file_size - payload_start,
        });
    }

    let needed = u64::from(payload_len) + CHUNK_HEADER_SIZE as u64;
    if needed > entry.reserved_bytes() {
        return Err(RegionError::PayloadExceedsReservation {
            x,
            z,
            needed,
            reserved: entry.reserved_bytes(),
        });
    }

    Ok(ChunkSlot {
        payload_offset: payload_start as usize,
        payload_len,
        compression: record_header.compression,
    })
}
