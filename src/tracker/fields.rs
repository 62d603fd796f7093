use crate::config::FieldOffsets;

const QUALITY_MARKER: &str = " q";

/// Two-character tag at the start of every device line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prefix {
    Time,
    Date,
    Fix,
    Location,
    Speed,
    Heading,
    Altitude,
    Satellites,
}
use Prefix::*;

impl Prefix {
    pub fn of(line: &str) -> Option<Self> {
        // A non-ASCII char never encodes to an ASCII lead byte, so bytes are enough.
        match line.as_bytes().get(..2)? {
            b"Ti" => Some(Time),
            b"Da" => Some(Date),
            b"Fi" => Some(Fix),
            b"Lo" => Some(Location),
            b"Sp" => Some(Speed),
            b"An" => Some(Heading),
            b"Al" => Some(Altitude),
            b"Sa" => Some(Satellites),
            _ => None,
        }
    }
}

/// Rest of `line` from character `offset` on, empty if the line is shorter.
pub(crate) fn tail(line: &str, offset: usize) -> &str {
    match line.char_indices().nth(offset) {
        Some((i, _)) => &line[i..],
        None => "",
    }
}

/// Splits `Fix: F quality: Q` into its fix and quality text.
///
/// Without the marker the whole tail is the fix and the quality is empty.
pub(crate) fn fix_fields<'a>(line: &'a str, offsets: &FieldOffsets) -> (&'a str, &'a str) {
    let fix = tail(line, offsets.fix);
    let start = line.len() - fix.len();
    match line.find(QUALITY_MARKER) {
        Some(marker) if marker >= start => (
            &line[start..marker],
            tail(&line[marker..], offsets.quality),
        ),
        Some(marker) => ("", tail(&line[marker..], offsets.quality)),
        None => (fix, ""),
    }
}
