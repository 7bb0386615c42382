//! Blocking region-file reads from a local world save.
//!
//! Reads are whole-file: the size is taken from the file's metadata, the
//! contents are copied into an owned buffer in one pass, and the handle is
//! closed before parsing begins. The parser never touches the filesystem.

use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use anvil_formats::region::RegionFile;
use tracing::debug;

use crate::{RegionPos, Result, StorageError};

/// Read the region file for `(region_x, region_z)` under `dir`.
///
/// The file name follows the `r.<x>.<z>.mca` convention, joined to `dir`
/// with exactly one separator. `dir` must be non-empty; an empty path is
/// its own error rather than a silent default to the current directory.
pub fn read_region(region_x: i32, region_z: i32, dir: &Path) -> Result<RegionFile> {
    if dir.as_os_str().is_empty() {
        return Err(StorageError::EmptyPath);
    }

    let file = RegionPos::new(region_x, region_z).path_in(dir);
    let data = read_file(&file)?;
    debug!("read {} ({} bytes)", file.display(), data.len());

    RegionFile::parse(data).map_err(|source| StorageError::Region { file, source })
}

/// Read a whole file into an owned buffer sized from its metadata.
///
/// The handle is dropped on return, before the caller parses anything. A
/// short read reports the byte deficit and whether EOF or an I/O error cut
/// the read off.
fn read_file(file: &Path) -> Result<Vec<u8>> {
    let mut handle = File::open(file).map_err(|source| StorageError::Open {
        file: file.to_path_buf(),
        source,
    })?;

    let size = handle
        .metadata()
        .map_err(|source| StorageError::Metadata {
            file: file.to_path_buf(),
            source,
        })?
        .len();

    let mut data = vec![0u8; size as usize];
    let mut filled = 0;
    while filled < data.len() {
        match handle.read(&mut data[filled..]) {
            Ok(0) => {
                return Err(StorageError::TruncatedRead {
                    file: file.to_path_buf(),
                    missing: (data.len() - filled) as u64,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    file: file.to_path_buf(),
                    missing: (data.len() - filled) as u64,
                    source,
                });
            }
        }
    }

    Ok(data)
}

/// Handle to one world save's region directory.
///
/// Resolves `<world>/region` once, the way the game lays out
/// `saves/<name>/region/`, and serves region reads against it.
#[derive(Debug, Clone)]
pub struct WorldStorage {
    region_dir: PathBuf,
}

impl WorldStorage {
    /// Open the region directory under a world root.
    ///
    /// A relative world root is resolved against the current working
    /// directory into an absolute path. Fails if the root is empty or no
    /// `region` directory exists under it.
    pub fn open(world_root: &Path) -> Result<Self> {
        if world_root.as_os_str().is_empty() {
            return Err(StorageError::EmptyPath);
        }

        let region_dir = fs::canonicalize(world_root.join("region")).map_err(|source| {
            StorageError::RegionDir {
                world: world_root.to_path_buf(),
                source,
            }
        })?;
        if !region_dir.is_dir() {
            return Err(StorageError::RegionDir {
                world: world_root.to_path_buf(),
                source: ErrorKind::NotADirectory.into(),
            });
        }

        debug!("world storage at {}", region_dir.display());
        Ok(Self { region_dir })
    }

    /// The resolved region directory.
    pub fn region_dir(&self) -> &Path {
        &self.region_dir
    }

    /// Path of one region's file in this world.
    pub fn region_path(&self, pos: RegionPos) -> PathBuf {
        pos.path_in(&self.region_dir)
    }

    /// Read one region file from this world.
    pub fn read_region(&self, region_x: i32, region_z: i32) -> Result<RegionFile> {
        read_region(region_x, region_z, &self.region_dir)
    }

    /// List the regions present in this world, in directory order.
    ///
    /// Files that do not follow the `r.<x>.<z>.mca` convention are
    /// skipped.
    pub fn list_regions(&self) -> Result<Vec<RegionPos>> {
        let entries = fs::read_dir(&self.region_dir).map_err(|source| StorageError::ListDir {
            dir: self.region_dir.clone(),
            source,
        })?;

        let mut regions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StorageError::ListDir {
                dir: self.region_dir.clone(),
                source,
            })?;
            if let Some(pos) = entry
                .file_name()
                .to_str()
                .and_then(RegionPos::from_file_name)
            {
                regions.push(pos);
            }
        }
        Ok(regions)
    }
}
