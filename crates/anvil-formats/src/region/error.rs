//! Region format error types

use thiserror::Error;

/// Result type for region format operations
pub type RegionResult<T> = Result<T, RegionError>;

/// Region-format-specific error type
///
/// Every content variant names the offending grid cell and the numbers
/// that disagreed, so the message is diagnostic on its own.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Buffer too short to hold the location and timestamp tables
    #[error("data too short: got {actual} bytes, region header needs {minimum}")]
    DataTooShort {
        /// Actual buffer length
        actual: usize,
        /// Minimum required length
        minimum: usize,
    },

    /// Populated location entry points into the header sectors
    #[error("chunk ({x},{z}) was listed with invalid location {sector_offset}")]
    LocationInHeader {
        /// Cell x coordinate (0-31)
        x: usize,
        /// Cell z coordinate (0-31)
        z: usize,
        /// Decoded sector offset (0 and 1 are the header's own sectors)
        sector_offset: u32,
    },

    /// Declared sector run extends past end of file
    #[error(
        "chunk ({x},{z}) was listed to inhabit {sector_count} 4 KiB sectors ending at byte {end_byte}; file is only {file_size} bytes long"
    )]
    SectorRunOverflow {
        /// Cell x coordinate (0-31)
        x: usize,
        /// Cell z coordinate (0-31)
        z: usize,
        /// Sector count from the location entry
        sector_count: u8,
        /// Byte where the declared run would end
        end_byte: u64,
        /// Actual file size in bytes
        file_size: u64,
    },

    /// Chunk's own declared payload length overruns the file
    #[error(
        "chunk ({x},{z}) was listed to be {payload_length} bytes when only {bytes_remaining} bytes remain of the file"
    )]
    PayloadOverflow {
        /// Cell x coordinate (0-31)
        x: usize,
        /// Cell z coordinate (0-31)
        z: usize,
        /// Payload length from the chunk's record header
        payload_length: u32,
        /// Bytes left in the file after the record header
        bytes_remaining: u64,
    },

    /// Payload does not fit the sectors reserved in the location table
    #[error(
        "chunk ({x},{z}) was listed to be {needed} bytes, which exceeds the {reserved} bytes designated in the header"
    )]
    PayloadExceedsReservation {
        /// Cell x coordinate (0-31)
        x: usize,
        /// Cell z coordinate (0-31)
        z: usize,
        /// Record header plus payload, in bytes
        needed: u64,
        /// Bytes covered by the reserved sector run
        reserved: u64,
    },
}
