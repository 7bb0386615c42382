//! Integration tests for region reads against a real directory tree.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::fs;
use std::path::Path;

use anvil_formats::region::{
    CHUNK_HEADER_SIZE, LOCATION_ENTRY_SIZE, RegionError, SECTOR_SIZE, local_to_index,
};
use anvil_world::{RegionPos, StorageError, WorldStorage, read_region};
use pretty_assertions::assert_eq;

/// Build a minimal valid region file: one chunk at (5, 10) in sector 2
/// with a 100-byte payload, tag 1.
fn sample_region_bytes() -> Vec<u8> {
    let mut data = vec![0u8; 3 * SECTOR_SIZE];

    let pos = local_to_index(5, 10) * LOCATION_ENTRY_SIZE;
    data[pos + 2] = 2; // sector offset 2
    data[pos + 3] = 1; // one sector

    let ts_pos = SECTOR_SIZE + local_to_index(5, 10) * 4;
    data[ts_pos..ts_pos + 4].copy_from_slice(&1_700_000_000u32.to_be_bytes());

    let record = 2 * SECTOR_SIZE;
    data[record..record + 4].copy_from_slice(&101u32.to_be_bytes());
    data[record + 4] = 1;
    for (i, byte) in data[record + CHUNK_HEADER_SIZE..record + CHUNK_HEADER_SIZE + 100]
        .iter_mut()
        .enumerate()
    {
        *byte = i as u8;
    }

    data
}

#[test]
fn read_region_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("r.0.0.mca"), sample_region_bytes()).unwrap();

    let region = read_region(0, 0, dir.path()).unwrap();
    assert_eq!(region.present_count(), 1);

    let chunk = region.chunk(5, 10).unwrap();
    assert_eq!(chunk.payload.len(), 100);
    assert_eq!(chunk.payload[99], 99);
    assert_eq!(chunk.compression, 1);
    assert_eq!(chunk.timestamp, 1_700_000_000);
}

#[test]
fn read_region_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("r.0.0.mca"), sample_region_bytes()).unwrap();

    let first = read_region(0, 0, dir.path()).unwrap();
    let second = read_region(0, 0, dir.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn read_region_negative_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("r.-1.-3.mca"), sample_region_bytes()).unwrap();

    let region = read_region(-1, -3, dir.path()).unwrap();
    assert_eq!(region.present_count(), 1);
}

#[test]
fn missing_file_reports_name() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_region(3, -7, dir.path()).unwrap_err();
    match &err {
        StorageError::Open { file, .. } => {
            assert_eq!(file.file_name().unwrap(), "r.3.-7.mca");
        }
        other => panic!("expected Open error, got {other:?}"),
    }
    assert!(err.to_string().contains("r.3.-7.mca"));
}

#[test]
fn empty_path_rejected() {
    let err = read_region(0, 0, Path::new("")).unwrap_err();
    assert!(matches!(err, StorageError::EmptyPath));
}

#[test]
fn truncated_file_reports_name_and_cause() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("r.0.0.mca"), vec![0u8; 100]).unwrap();

    let err = read_region(0, 0, dir.path()).unwrap_err();
    match &err {
        StorageError::Region { file, source } => {
            assert_eq!(file.file_name().unwrap(), "r.0.0.mca");
            assert!(matches!(
                source,
                RegionError::DataTooShort {
                    actual: 100,
                    minimum: 8192,
                }
            ));
        }
        other => panic!("expected Region error, got {other:?}"),
    }
    // The rendered message is annotated with the file name.
    assert!(err.to_string().contains("r.0.0.mca"));
}

#[test]
fn malformed_cell_reports_name_and_cell() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = sample_region_bytes();
    // Point cell (0, 0) into the header.
    data[3] = 1;
    fs::write(dir.path().join("r.0.0.mca"), data).unwrap();

    let err = read_region(0, 0, dir.path()).unwrap_err();
    match &err {
        StorageError::Region { source, .. } => {
            assert!(matches!(
                source,
                RegionError::LocationInHeader { x: 0, z: 0, .. }
            ));
        }
        other => panic!("expected Region error, got {other:?}"),
    }
}

#[test]
fn world_storage_resolves_region_dir() {
    let world = tempfile::tempdir().unwrap();
    let region_dir = world.path().join("region");
    fs::create_dir(&region_dir).unwrap();
    fs::write(region_dir.join("r.0.0.mca"), sample_region_bytes()).unwrap();
    fs::write(region_dir.join("r.-2.5.mca"), sample_region_bytes()).unwrap();
    fs::write(region_dir.join("level.dat"), b"not a region").unwrap();

    let storage = WorldStorage::open(world.path()).unwrap();
    assert!(storage.region_dir().is_absolute());

    let region = storage.read_region(0, 0).unwrap();
    assert_eq!(region.present_count(), 1);

    let mut regions = storage.list_regions().unwrap();
    regions.sort_by_key(|pos| (pos.x, pos.z));
    assert_eq!(regions, vec![RegionPos::new(-2, 5), RegionPos::new(0, 0)]);

    assert_eq!(
        storage.region_path(RegionPos::new(0, 0)).file_name().unwrap(),
        "r.0.0.mca"
    );
}

#[test]
fn world_storage_requires_region_dir() {
    let world = tempfile::tempdir().unwrap();
    let err = WorldStorage::open(world.path()).unwrap_err();
    assert!(matches!(err, StorageError::RegionDir { .. }));

    let err = WorldStorage::open(Path::new("")).unwrap_err();
    assert!(matches!(err, StorageError::EmptyPath));
}
