#![cfg_attr(not(feature = "std"), no_std)]

//! Rebuilds GPS fix reports from a serial text stream.
//!
//! The device prints one labelled field per line (`Time: ...`, `Location: ...`,
//! `Satellites: ...`). [`Tracker`] takes raw chunks as they come off the port,
//! reassembles lines, and hands out finished [`Record`]s and per-location
//! [`MapUpdate`]s.

extern crate alloc;

// must come first so the logging macros are visible to the other modules
mod fmt;

pub mod config;
pub mod coord;
pub mod lines;
mod num;
pub mod record;
pub mod tracker;

pub use config::{CoordinateMode, EmitPolicy, FieldOffsets, TrackerConfig};
pub use lines::LineAssembler;
pub use record::{MapUpdate, Record};
pub use tracker::{Event, ParseError, RecordBuilder, Sink, Tracker, Trigger};

/// Signed decimal degrees; south and west are negative.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}
