use std::fmt;

/// Machine axes the predictor keeps position for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }

    /// Pairing partner in the XY plane. Z has none.
    pub fn opposite(self) -> Option<Axis> {
        match self {
            Axis::X => Some(Axis::Y),
            Axis::Y => Some(Axis::X),
            Axis::Z => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Per-axis bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisState {
    pub last: f64,     // most recently committed position
    pub pending: bool, // seen, waiting for the XY partner
    pub diff: f64,     // |new - last| at commit time
}

/// State for X, Y and Z, indexed by `Axis`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisSet([AxisState; 3]);

impl AxisSet {
    pub fn get(&self, axis: Axis) -> &AxisState {
        &self.0[axis.index()]
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut AxisState {
        &mut self.0[axis.index()]
    }
}

/// Modal state carried from line to line while predicting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MachineState {
    /// Sticky feed rate in units/minute, 0 until an F code is seen
    pub current_feed: f64,
    /// Armed by G0/G1, disarmed when an XY pair completes
    pub move_expected: bool,
    /// Set by G28 for the run of axis codes right after it
    pub ignore_axis_codes: bool,
    /// A G0/G1 appeared earlier on the line being processed
    pub motion_on_line: bool,
}

/// What a single op-code means to the predictor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Feed(f64),
    Move,
    Home,
    /// G92, only accepted in the `G92 E0` form
    SetPosition,
    /// Mode, temperature, fan, extrusion and tool codes with no duration
    Passive,
    Axis(Axis, f64),
    Unknown,
}

/// An op-code with no duration model, kept as a non-fatal diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode {
    pub line: usize,
    pub code: String,
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown code {} on line {}", self.code, self.line)
    }
}
