//! Local world-save access for Minecraft Anvil region files.
//!
//! World saves keep their terrain under `<world>/region/` as one file per
//! 32×32-chunk region, named `r.<x>.<z>.mca`. This crate resolves those
//! paths and performs the blocking whole-file reads that feed the
//! [`anvil_formats`] parser:
//!
//! - [`read_region`] — one-shot read of a region by coordinates and
//!   directory.
//! - [`WorldStorage`] — a handle to a world's region directory for
//!   repeated reads and region listing.
//! - [`RegionPos`] — the file naming convention.
//!
//! Reads are all-or-nothing: the caller either gets a fully validated
//! [`RegionFile`] or a single [`StorageError`] naming the file and the
//! exact mismatch. Nothing is retried internally.

#![warn(missing_docs)]

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use anvil_formats::region::RegionError;

mod naming;
mod storage;

pub use anvil_formats::region::RegionFile;
pub use naming::RegionPos;
pub use storage::{WorldStorage, read_region};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while reading region files from a world save.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The region directory path was empty.
    #[error("region directory path is empty")]
    EmptyPath,

    /// The world's region directory is missing or unresolvable.
    #[error("cannot resolve region directory under '{}': {source}", world.display())]
    RegionDir {
        /// World root the resolution started from.
        world: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Listing the region directory failed.
    #[error("cannot list region directory '{}': {source}", dir.display())]
    ListDir {
        /// Directory being listed.
        dir: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Opening a region file failed.
    #[error("open of '{}' failed: {source}", file.display())]
    Open {
        /// File that failed to open.
        file: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Querying a region file's size failed.
    #[error("stat of '{}' failed: {source}", file.display())]
    Metadata {
        /// File that failed to stat.
        file: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The file ended before the size its metadata reported.
    #[error("read of '{}' hit end of file with {missing} bytes still expected", file.display())]
    TruncatedRead {
        /// File that came up short.
        file: PathBuf,
        /// Bytes still expected when EOF was hit.
        missing: u64,
    },

    /// Reading failed partway through the file.
    #[error("read of '{}' failed with {missing} bytes still expected: {source}", file.display())]
    ReadFailed {
        /// File the read failed on.
        file: PathBuf,
        /// Bytes still expected when the error occurred.
        missing: u64,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The file's contents failed region-format validation.
    #[error("'{}': {source}", file.display())]
    Region {
        /// File the malformed content came from.
        file: PathBuf,
        /// The format-level failure.
        source: RegionError,
    },
}
