// Character offsets of each field's value within its line, as the device prints
// them ("Time: 12:34:56.000", "Speed (knots): 0.12", ...).
pub const TIME_OFFSET: usize = 6;
pub const DATE_OFFSET: usize = 6;
pub const FIX_OFFSET: usize = 5;
/// Counted from the start of the `" q"` marker in a fix line.
pub const QUALITY_OFFSET: usize = 10;
pub const LOCATION_OFFSET: usize = 10;
pub const SPEED_OFFSET: usize = 15;
pub const HEADING_OFFSET: usize = 7;
pub const ALTITUDE_OFFSET: usize = 10;
pub const SATELLITES_OFFSET: usize = 12;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldOffsets {
    pub time: usize,
    pub date: usize,
    pub fix: usize,
    pub quality: usize,
    pub location: usize,
    pub speed: usize,
    pub heading: usize,
    pub altitude: usize,
    pub satellites: usize,
}

impl Default for FieldOffsets {
    fn default() -> Self {
        Self {
            time: TIME_OFFSET,
            date: DATE_OFFSET,
            fix: FIX_OFFSET,
            quality: QUALITY_OFFSET,
            location: LOCATION_OFFSET,
            speed: SPEED_OFFSET,
            heading: HEADING_OFFSET,
            altitude: ALTITUDE_OFFSET,
            satellites: SATELLITES_OFFSET,
        }
    }
}

/// What to do with a location line whose coordinates don't parse.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoordinateMode {
    /// Convert whatever is there; bad pieces count as zero.
    #[default]
    Lenient,
    /// Reject the line; the record and map are left untouched.
    Strict,
}

/// How often a cycle's record is handed out.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmitPolicy {
    /// Every trigger emits, so a cycle with no fix can produce two rows.
    #[default]
    EveryTrigger,
    /// The first trigger emits; later ones wait for the next time line.
    OncePerCycle,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackerConfig {
    pub offsets: FieldOffsets,
    pub coordinates: CoordinateMode,
    pub emit: EmitPolicy,
}

impl TrackerConfig {
    pub fn with_offsets(self, offsets: FieldOffsets) -> Self {
        Self { offsets, ..self }
    }

    pub fn with_coordinates(self, coordinates: CoordinateMode) -> Self {
        Self { coordinates, ..self }
    }

    pub fn with_emit(self, emit: EmitPolicy) -> Self {
        Self { emit, ..self }
    }
}
