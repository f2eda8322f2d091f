use std::fmt;
use time::OffsetDateTime;

/// Presence hint carried by the radar alongside the movement magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceCode {
    Present,
    Absent,
}

impl PresenceCode {
    /// Map a respiration-profile sensor state code to a presence hint
    ///
    /// 0 = breathing, 1 = movement, 2 = movement tracking, 3 = no movement.
    /// Initializing, error and unknown states carry no presence information.
    pub fn from_sensor_state(code: u8) -> Option<Self> {
        match code {
            0..=2 => Some(PresenceCode::Present),
            3 => Some(PresenceCode::Absent),
            _ => None,
        }
    }
}

/// One per-second reading from the radar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub magnitude: f64,
    pub presence: Option<PresenceCode>,
}

impl Sample {
    pub fn new(magnitude: f64) -> Self {
        Sample {
            magnitude,
            presence: None,
        }
    }

    pub fn with_presence(magnitude: f64, presence: PresenceCode) -> Self {
        Sample {
            magnitude,
            presence: Some(presence),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Occupied,
    Unoccupied,
}

impl Occupancy {
    pub fn code(self) -> i32 {
        match self {
            Occupancy::Occupied => 1,
            Occupancy::Unoccupied => 0,
        }
    }
}

/// Minute-level sleep classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepState {
    Awake,
    Asleep,
    Unoccupied,
}

impl SleepState {
    pub fn code(self) -> i32 {
        match self {
            SleepState::Awake => 1,
            SleepState::Asleep => 0,
            SleepState::Unoccupied => -1,
        }
    }
}

impl fmt::Display for SleepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepState::Awake => write!(f, "Awake ({})", self.code()),
            SleepState::Asleep => write!(f, "Asleep ({})", self.code()),
            SleepState::Unoccupied => write!(f, "Unoccupied ({})", self.code()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Occupancy,
    Sleep,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Occupancy => "occupancy",
            ReportKind::Sleep => "sleep",
        }
    }
}

/// An edge-triggered state change handed to the reporter sink
#[derive(Debug, Clone)]
pub struct ReportEvent {
    pub kind: ReportKind,
    pub value: i32,
    pub time: OffsetDateTime,
}

impl ReportEvent {
    pub fn occupancy(state: Occupancy) -> Self {
        ReportEvent {
            kind: ReportKind::Occupancy,
            value: state.code(),
            time: OffsetDateTime::now_utc(),
        }
    }

    pub fn sleep(state: SleepState) -> Self {
        ReportEvent {
            kind: ReportKind::Sleep,
            value: state.code(),
            time: OffsetDateTime::now_utc(),
        }
    }
}

/// Result of one completed minute cycle, used for logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinuteRecord {
    pub minute: u64,
    pub activity: f64,
    pub raw: SleepState,
    pub rescored: SleepState,
}
