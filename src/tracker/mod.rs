pub mod fields;
pub mod parser;

pub use fields::Prefix;
pub use parser::{CycleState, RecordBuilder};

use crate::{
    config::TrackerConfig,
    coord::CoordError,
    lines::{LineAssembler, Lines},
    record::{MapUpdate, Record},
};

/// Why a record was handed out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// A fix line reported fix `0`. The record may still be missing fields.
    NoFix,
    /// The satellite count arrived, which closes a cycle.
    Satellites,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Record { record: Record, trigger: Trigger },
    Position(MapUpdate),
}

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    #[error("location line has no ',' between latitude and longitude")]
    MissingSeparator,
    #[error("bad latitude")]
    Latitude(#[source] CoordError),
    #[error("bad longitude")]
    Longitude(#[source] CoordError),
}

/// Receives what the tracker produces: table rows, map updates, rejected lines.
pub trait Sink {
    fn on_record(&mut self, record: Record, trigger: Trigger);

    fn on_position(&mut self, update: MapUpdate);

    fn on_error(&mut self, err: ParseError) {
        warn!("dropping line: {}", err);
    }
}

/// A parsing session over one byte stream.
///
/// Feed it chunks in arrival order, however they happen to be split. Dropping
/// the tracker (or calling [`Tracker::reset`]) is all the teardown there is.
#[derive(Default, Clone)]
pub struct Tracker {
    lines: LineAssembler,
    builder: RecordBuilder,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            lines: LineAssembler::new(),
            builder: RecordBuilder::with_config(config),
        }
    }

    /// Events produced by `chunk`. Pass only the bytes actually read.
    pub fn feed<'a>(&'a mut self, chunk: &'a [u8]) -> Events<'a> {
        Events {
            lines: self.lines.feed(chunk),
            builder: &mut self.builder,
        }
    }

    pub fn dispatch<S: Sink + ?Sized>(&mut self, chunk: &[u8], sink: &mut S) {
        for event in self.feed(chunk) {
            match event {
                Ok(Event::Record { record, trigger }) => sink.on_record(record, trigger),
                Ok(Event::Position(update)) => sink.on_position(update),
                Err(err) => sink.on_error(err),
            }
        }
    }

    pub fn builder(&self) -> &RecordBuilder {
        &self.builder
    }

    /// Bytes buffered toward a line that hasn't ended yet.
    pub fn pending(&self) -> usize {
        self.lines.pending()
    }

    pub fn reset(&mut self) {
        self.lines.clear();
        self.builder.reset();
    }
}

pub struct Events<'a> {
    lines: Lines<'a>,
    builder: &'a mut RecordBuilder,
}

impl Iterator for Events<'_> {
    type Item = Result<Event, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if let Some(event) = self.builder.process_line(&line) {
                return Some(event);
            }
        }
        None
    }
}
