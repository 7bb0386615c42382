//! File format parsers for Minecraft Anvil world storage.
//!
//! This crate provides parsing for the binary container formats used by
//! Anvil world saves. Every parser works over an in-memory buffer and
//! validates all offsets and lengths against the buffer's actual size
//! before exposing any view into it — a malformed file is rejected as a
//! whole rather than partially decoded.
//!
//! # Supported Formats
//!
//! - **Region** (`.mca`): sector-packed container of a 32×32 chunk grid,
//!   see the [`region`] module for the byte-level layout.
//!
//! # Design Principles
//!
//! - **Explicit decoding**: fixed-width big-endian fields are decoded at
//!   computed byte offsets; nothing is overlaid onto the raw buffer.
//! - **No-copy payloads**: chunk payloads are borrowed slices into the
//!   buffer owned by the parsed structure, never copies.
//! - **All-or-nothing**: a parse either yields a fully validated structure
//!   or an error naming the offending cell and byte counts.

#![warn(missing_docs)]
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From

pub mod region;
