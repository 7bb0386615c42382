#![allow(clippy::expect_used, clippy::panic)]

//! Dump the chunk table of one region file.
//!
//! Usage:
//!   cargo run --example dump_region -p anvil-world -- <region-dir> [x] [z]

use std::path::PathBuf;

use anvil_world::{RegionPos, read_region};

fn main() {
    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(
        args.next()
            .expect("usage: dump_region <region-dir> [x] [z]"),
    );
    let x: i32 = args
        .next()
        .map_or(0, |v| v.parse().expect("region x must be an integer"));
    let z: i32 = args
        .next()
        .map_or(0, |v| v.parse().expect("region z must be an integer"));

    let region = read_region(x, z, &dir).expect("failed to read region");
    println!(
        "{}: {} bytes, {} chunks present\n",
        RegionPos::new(x, z).file_name(),
        region.file_size(),
        region.present_count(),
    );

    println!(
        "{:>3} {:>3} {:>8} {:>7} {:>10} {:>4} {:>10}",
        "x", "z", "sector", "count", "payload", "tag", "timestamp"
    );
    for chunk in region.chunks() {
        println!(
            "{:>3} {:>3} {:>8} {:>7} {:>10} {:>4} {:>10}",
            chunk.x,
            chunk.z,
            chunk.location.sector_offset,
            chunk.location.sector_count,
            chunk.payload.len(),
            chunk.compression,
            chunk.timestamp,
        );
    }
}
