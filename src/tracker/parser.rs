use super::{
    fields::{fix_fields, tail, Prefix},
    Event, ParseError, Trigger,
};
use crate::{
    config::{CoordinateMode, EmitPolicy, TrackerConfig},
    coord::{parse_ddm, parse_ddm_lenient},
    num::{lenient_float, lenient_int},
    record::{MapUpdate, Record},
    Position,
};

// Where the in-progress record is within its observation cycle
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleState {
    /// Nothing recognised yet.
    #[default]
    Empty,
    /// Fields arriving, not handed out yet.
    Accumulating,
    /// Handed out at least once; fields may still be updated until the next time line.
    Ready,
}
use CycleState::*;

/// Builds records out of device lines, one line at a time.
///
/// Holds the single in-progress [`Record`]. Emitted records are snapshots, so
/// later lines never change a record a consumer already holds.
#[derive(Debug, Default, Clone)]
pub struct RecordBuilder {
    config: TrackerConfig,
    state: CycleState,
    record: Record,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// The record as assembled so far.
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn reset(&mut self) {
        self.record = Record::default();
        self.state = Empty;
    }

    /// Applies one line. Unknown prefixes are ignored.
    ///
    /// Returns the event the line produced, if any: a record on a completion
    /// trigger, a map update on a location line, or an error for a location
    /// line rejected under [`CoordinateMode::Strict`].
    pub fn process_line(&mut self, line: &str) -> Option<Result<Event, ParseError>> {
        let prefix = Prefix::of(line)?;
        trace!("{} line: {}", prefix, line);
        let offsets = self.config.offsets;

        match prefix {
            Prefix::Time => {
                if self.state == Accumulating {
                    debug!("new cycle, dropping record that was never emitted");
                }
                self.record = Record {
                    time: tail(line, offsets.time).into(),
                    ..Record::default()
                };
                self.state = Accumulating;
                None
            }
            Prefix::Date => {
                self.record.date = tail(line, offsets.date).into();
                self.touch();
                None
            }
            Prefix::Fix => {
                let (fix, quality) = fix_fields(line, &offsets);
                self.record.fix = lenient_int(fix);
                self.record.quality = lenient_int(quality);
                self.touch();
                // Compared as text: only a literal "0" means no fix.
                if fix == "0" {
                    self.complete(Trigger::NoFix)
                } else {
                    None
                }
            }
            Prefix::Location => Some(self.locate(tail(line, offsets.location))),
            Prefix::Speed => {
                self.record.speed_knots = lenient_float(tail(line, offsets.speed));
                self.touch();
                None
            }
            Prefix::Heading => {
                self.record.heading = lenient_float(tail(line, offsets.heading));
                self.touch();
                None
            }
            Prefix::Altitude => {
                self.record.altitude = lenient_float(tail(line, offsets.altitude));
                self.touch();
                None
            }
            Prefix::Satellites => {
                self.record.satellites = lenient_int(tail(line, offsets.satellites));
                self.touch();
                self.complete(Trigger::Satellites)
            }
        }
    }

    fn touch(&mut self) {
        if self.state == Empty {
            self.state = Accumulating;
        }
    }

    fn complete(&mut self, trigger: Trigger) -> Option<Result<Event, ParseError>> {
        if self.state == Ready && self.config.emit == EmitPolicy::OncePerCycle {
            debug!("{} trigger suppressed, cycle already emitted", trigger);
            return None;
        }
        self.state = Ready;
        debug!("emitting record on {} trigger", trigger);
        Some(Ok(Event::Record {
            record: self.record.clone(),
            trigger,
        }))
    }

    fn locate(&mut self, coords: &str) -> Result<Event, ParseError> {
        let position = match self.config.coordinates {
            CoordinateMode::Lenient => {
                let (lat, lon) = coords.split_once(',').unwrap_or((coords, ""));
                Position {
                    lat: parse_ddm_lenient(lat),
                    lon: parse_ddm_lenient(lon),
                }
            }
            CoordinateMode::Strict => {
                let (lat, lon) = coords.split_once(',').ok_or(ParseError::MissingSeparator)?;
                Position {
                    lat: parse_ddm(lat).map_err(ParseError::Latitude)?,
                    lon: parse_ddm(lon).map_err(ParseError::Longitude)?,
                }
            }
        };
        self.record.position = position;
        self.touch();

        Ok(Event::Position(MapUpdate {
            time: self.record.time.clone(),
            position,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::CoordError;
    use alloc::vec::Vec;

    fn run(builder: &mut RecordBuilder, lines: &[&str]) -> Vec<Result<Event, ParseError>> {
        lines
            .iter()
            .filter_map(|line| builder.process_line(line))
            .collect()
    }

    fn records(events: &[Result<Event, ParseError>]) -> Vec<(&Record, Trigger)> {
        events
            .iter()
            .filter_map(|e| match e {
                Ok(Event::Record { record, trigger }) => Some((record, *trigger)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn satellites_always_emit() {
        let mut b = RecordBuilder::new();
        let events = run(&mut b, &["Sa 12345678901234567"]);
        let recs = records(&events);
        assert_eq!(recs.len(), 1);
        // Offset 12 lands on the tenth digit.
        assert_eq!(recs[0].0.satellites, 1_234_567);
        assert_eq!(recs[0].1, Trigger::Satellites);
        assert_eq!(b.state(), Ready);
    }

    #[test]
    fn no_fix_emits_partial_record() {
        let mut b = RecordBuilder::new();
        let events = run(&mut b, &["Time: 01:02:03.000", "Fix: 0 quality: 0"]);
        let recs = records(&events);
        assert_eq!(recs.len(), 1);
        let (rec, trigger) = recs[0];
        assert_eq!(trigger, Trigger::NoFix);
        assert_eq!(rec.time, "01:02:03.000");
        assert_eq!(rec.position, Position::default());
        assert_eq!((rec.altitude, rec.satellites), (0.0, 0));
    }

    #[test]
    fn fix_trigger_is_literal_zero() {
        let mut b = RecordBuilder::new();
        assert!(run(&mut b, &["Fix: 1 quality: 1"]).is_empty());
        assert!(run(&mut b, &["Fix: 00 quality: 0"]).is_empty());
        assert!(run(&mut b, &["Fix:  0 quality: 0"]).is_empty());
        assert_eq!(b.record().fix, 0);
        assert_eq!(records(&run(&mut b, &["Fix: 0 quality: 0"])).len(), 1);
    }

    #[test]
    fn every_trigger_emits_twice_per_cycle() {
        let mut b = RecordBuilder::new();
        let events = run(
            &mut b,
            &["Time: 1", "Fix: 0 quality: 0", "Altitude: 5.5", "Satellites: 3"],
        );
        let recs = records(&events);
        assert_eq!(recs.len(), 2);
        assert_eq!((recs[0].1, recs[0].0.altitude), (Trigger::NoFix, 0.0));
        assert_eq!((recs[1].1, recs[1].0.altitude), (Trigger::Satellites, 5.5));
    }

    #[test]
    fn once_per_cycle_suppresses_second_trigger() {
        let cfg = TrackerConfig::default().with_emit(EmitPolicy::OncePerCycle);
        let mut b = RecordBuilder::with_config(cfg);
        let lines = ["Time: 1", "Fix: 0 quality: 0", "Satellites: 3"];
        let recs = run(&mut b, &lines);
        assert_eq!(records(&recs).len(), 1);
        assert_eq!(records(&recs)[0].1, Trigger::NoFix);

        // A new time line opens a new cycle.
        let recs = run(&mut b, &lines);
        assert_eq!(records(&recs).len(), 1);
    }

    #[test]
    fn second_time_line_discards_first_record() {
        let mut b = RecordBuilder::new();
        let events = run(
            &mut b,
            &[
                "Time: 10:00:00.000",
                "Date: 1/1/2026",
                "Altitude: 99.0",
                "Time: 10:00:01.000",
                "Speed (knots): 1.25",
                "Satellites: 6",
            ],
        );
        let recs = records(&events);
        assert_eq!(recs.len(), 1);
        let rec = recs[0].0;
        assert_eq!(rec.time, "10:00:01.000");
        assert_eq!(rec.date, "");
        assert_eq!(rec.altitude, 0.0);
        assert_eq!(rec.speed_knots, 1.25);
        assert_eq!(rec.satellites, 6);
    }

    #[test]
    fn unknown_prefix_changes_nothing() {
        let mut b = RecordBuilder::new();
        run(&mut b, &["Time: 1", "Angle: 45.0"]);
        let before = b.record().clone();
        assert!(b.process_line("Zz 1234").is_none());
        assert!(b.process_line("").is_none());
        assert_eq!(b.record(), &before);
        assert_eq!(b.state(), Accumulating);
    }

    #[test]
    fn location_updates_map_every_time() {
        let mut b = RecordBuilder::new();
        let events = run(
            &mut b,
            &[
                "Time: 12:00:00.000",
                "Location: 3740.0000N, 12224.0000W",
                "Location: 3740.0000S, 12224.0000E",
            ],
        );
        assert_eq!(events.len(), 2);
        match &events[1] {
            Ok(Event::Position(update)) => {
                assert_eq!(update.time, "12:00:00.000");
                assert!(update.position.lat < 0.0 && update.position.lon > 0.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(b.record().position.lat, -(37.0 + 40.0 / 60.0));
    }

    #[test]
    fn emitted_record_is_a_snapshot() {
        let mut b = RecordBuilder::new();
        let events = run(&mut b, &["Time: 1", "Satellites: 4", "Altitude: 7.0"]);
        assert_eq!(records(&events)[0].0.altitude, 0.0);
        assert_eq!(b.record().altitude, 7.0);
    }

    #[test]
    fn strict_rejects_bad_location() {
        let cfg = TrackerConfig::default().with_coordinates(CoordinateMode::Strict);
        let mut b = RecordBuilder::with_config(cfg);
        run(&mut b, &["Time: 1", "Location: 3740.0000N, 12224.0000W"]);
        let good = b.record().position;

        assert_eq!(
            b.process_line("Location: 3740.0000N"),
            Some(Err(ParseError::MissingSeparator))
        );
        assert_eq!(
            b.process_line("Location: 40.0N, 12224.0000W"),
            Some(Err(ParseError::Latitude(CoordError::TooFewDigits(2))))
        );
        assert_eq!(
            b.process_line("Location: 3740.0000N, 12224.0000"),
            Some(Err(ParseError::Longitude(CoordError::BadDirection('0'))))
        );
        assert_eq!(b.record().position, good);
    }

    #[test]
    fn lenient_location_never_fails() {
        let mut b = RecordBuilder::new();
        let events = run(&mut b, &["Location: nonsense", "Lo"]);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| matches!(e, Ok(Event::Position(_)))));
    }

    #[test]
    fn numeric_fields_default_on_garbage() {
        let mut b = RecordBuilder::new();
        run(
            &mut b,
            &[
                "Speed (knots): fast",
                "Angle: ",
                "Altitude: 12.5m",
                "Fix: x quality: y",
            ],
        );
        let r = b.record();
        assert_eq!((r.speed_knots, r.heading, r.altitude), (0.0, 0.0, 12.5));
        assert_eq!((r.fix, r.quality), (0, 0));
    }

    #[test]
    fn custom_offsets() {
        let mut offsets = crate::config::FieldOffsets::default();
        offsets.satellites = 3;
        let cfg = TrackerConfig::default().with_offsets(offsets);
        let mut b = RecordBuilder::with_config(cfg);
        let events = run(&mut b, &["Sa=9"]);
        assert_eq!(records(&events)[0].0.satellites, 9);
    }
}
