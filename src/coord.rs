//! Degrees + decimal minutes (`DDDMM.MMMMC`) to signed decimal degrees.
//!
//! Everything before the last two whole digits is degrees, the rest up to the
//! direction letter is minutes: `03740.0000N` is 37° 40' N, or 37.6666...

use crate::num::{lenient_float, lenient_int};

// Two whole-minute digits plus at least one degree digit.
const MIN_WHOLE_DIGITS: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}
use Hemisphere::*;

impl Hemisphere {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(North),
            'S' => Some(South),
            'E' => Some(East),
            'W' => Some(West),
            _ => None,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            North | East => 1.0,
            South | West => -1.0,
        }
    }
}

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoordError {
    #[error("coordinate is empty")]
    Empty,
    #[error("expected a direction letter (N, S, E, W), found {0:?}")]
    BadDirection(char),
    #[error("coordinate has no decimal point")]
    MissingDecimalPoint,
    #[error("need at least 3 digits before the decimal point, found {0}")]
    TooFewDigits(usize),
    #[error("degrees are not a whole number")]
    InvalidDegrees,
    #[error("minutes are not a number")]
    InvalidMinutes,
}

/// Converts a trimmed-or-not `DDDMM.MMMMC` string, rejecting anything malformed.
pub fn parse_ddm(ddm: &str) -> Result<f64, CoordError> {
    let ddm = ddm.trim();
    let dir = ddm.chars().last().ok_or(CoordError::Empty)?;
    let hemisphere = Hemisphere::from_char(dir).ok_or(CoordError::BadDirection(dir))?;
    let body = &ddm[..ddm.len() - dir.len_utf8()];

    let point = body.find('.').ok_or(CoordError::MissingDecimalPoint)?;
    let whole = &body[..point];
    if !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoordError::InvalidDegrees);
    }
    if whole.len() < MIN_WHOLE_DIGITS {
        return Err(CoordError::TooFewDigits(whole.len()));
    }

    let split = point - 2;
    let degrees: u32 = body[..split]
        .parse()
        .map_err(|_| CoordError::InvalidDegrees)?;
    let minutes: f64 = body[split..]
        .parse()
        .map_err(|_| CoordError::InvalidMinutes)?;

    Ok(hemisphere.sign() * (degrees as f64 + minutes / 60.0))
}

/// Same conversion, but never fails.
///
/// Well-formed input gives exactly what [`parse_ddm`] gives. Otherwise: a trailing
/// letter is always taken as the direction (only `S`/`W` negate), a missing point
/// is assumed after the last digit, and any piece that doesn't parse counts as zero.
pub fn parse_ddm_lenient(ddm: &str) -> f64 {
    let ddm = ddm.trim();
    let (body, sign) = match ddm.chars().last() {
        Some(c) if c.is_alphabetic() => (
            &ddm[..ddm.len() - c.len_utf8()],
            Hemisphere::from_char(c).map_or(1.0, Hemisphere::sign),
        ),
        _ => (ddm, 1.0),
    };

    let point = body.find('.').unwrap_or(body.len());
    let (degrees, minutes) = match point.checked_sub(2) {
        Some(split) if body.is_char_boundary(split) => (&body[..split], &body[split..]),
        _ => ("", body),
    };

    let degrees: u32 = lenient_int(degrees);
    sign * (degrees as f64 + lenient_float(minutes) / 60.0)
}
