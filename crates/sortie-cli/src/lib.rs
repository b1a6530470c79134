//! Sortie CLI - plans drone launch groups from mission GeoJSON.
//!
//! This crate wraps the planning core with file I/O:
//! - loader: mission and restricted-zone GeoJSON import with dissolve
//! - writer: CSV flight plan output

pub mod loader;
pub mod writer;
