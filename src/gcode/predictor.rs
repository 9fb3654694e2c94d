//! Streaming duration prediction.
//!
//! Lines are consumed strictly in order. X and Y codes are paired across
//! lines in either order, Z moves are timed on their own, and the sticky
//! feed rate carries over until the next `F` code. Timing errors abort the
//! run; codes without a duration model are logged and skipped.

use crate::config::machine_profile::PredictorProfile;

use super::axis::{AxisTracker, PlanarStep};
use super::error::{PredictError, PredictResult, SequenceFault};
use super::estimation::{EstimationResult, planar_seconds, vertical_seconds};
use super::feed;
use super::parser::{OpCode, OpCodes, extract_codes, is_comment};
use super::types::{Axis, Command, MachineState, UnknownCode};

/// Duration of one line plus the running total up to and including it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEstimate {
    pub line: usize,
    pub seconds: f64,
    pub elapsed: f64,
}

#[derive(Debug, Clone)]
pub struct Predictor {
    profile: PredictorProfile,
    machine: MachineState,
    axes: AxisTracker,
    line_number: usize,
    elapsed: f64,
    timed_moves: usize,
    unknown: Vec<UnknownCode>,
}

impl Default for Predictor {
    fn default() -> Self {
        Self::with_profile(PredictorProfile::default())
    }
}

impl Predictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: PredictorProfile) -> Self {
        Self {
            profile,
            machine: MachineState::default(),
            axes: AxisTracker::new(),
            line_number: 0,
            elapsed: 0.0,
            timed_moves: 0,
            unknown: Vec::new(),
        }
    }

    pub fn profile(&self) -> &PredictorProfile {
        &self.profile
    }

    pub fn machine(&self) -> &MachineState {
        &self.machine
    }

    pub fn axes(&self) -> &AxisTracker {
        &self.axes
    }

    /// Lines consumed so far, comments included
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Seconds accumulated over every line consumed so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn timed_moves(&self) -> usize {
        self.timed_moves
    }

    pub fn unknown_codes(&self) -> &[UnknownCode] {
        &self.unknown
    }

    /// Back to the origin with no feed set, keeping the profile.
    pub fn reset(&mut self) {
        self.machine = MachineState::default();
        self.axes.reset();
        self.line_number = 0;
        self.elapsed = 0.0;
        self.timed_moves = 0;
        self.unknown.clear();
    }

    /// Predict the whole job. Returns seconds, or the first fatal error.
    pub fn predict_file_duration<I>(&mut self, lines: I) -> PredictResult<f64>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut file_seconds = 0.0;
        for line in lines {
            file_seconds += self.predict_line_duration(line.as_ref())?;
        }
        Ok(file_seconds)
    }

    /// Predict the whole job and report what was counted along the way.
    pub fn estimate<I>(&mut self, lines: I) -> PredictResult<EstimationResult>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let start_lines = self.line_number;
        let start_moves = self.timed_moves;
        let start_unknown = self.unknown.len();
        let estimated_seconds = self.predict_file_duration(lines)?;

        Ok(EstimationResult {
            estimated_seconds,
            line_count: self.line_number - start_lines,
            timed_moves: self.timed_moves - start_moves,
            unknown_codes: self.unknown.len() - start_unknown,
        })
    }

    /// Per-line estimates with a running total, for progress reporting.
    /// Yields the first error and then stops.
    pub fn predict_lines<I>(&mut self, lines: I) -> LineEstimates<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        LineEstimates {
            predictor: self,
            lines: lines.into_iter(),
            failed: false,
        }
    }

    /// Predict a single line, carrying state over from earlier lines.
    pub fn predict_line_duration(&mut self, line: &str) -> PredictResult<f64> {
        self.line_number += 1;
        if is_comment(line) {
            return Ok(0.0);
        }

        self.machine.motion_on_line = false;
        let mut line_seconds = 0.0;
        let mut codes = extract_codes(line);
        while let Some(code) = codes.next() {
            line_seconds += self.code_to_duration(code, codes.clone(), line)?;
        }

        self.elapsed += line_seconds;
        Ok(line_seconds)
    }

    /// `rest` holds the codes after `code` on the same line.
    fn code_to_duration(&mut self, code: OpCode<'_>, rest: OpCodes<'_>, line: &str) -> PredictResult<f64> {
        match code.command() {
            Command::Feed(f) => self.machine.current_feed = f,
            Command::Move => {
                self.machine.move_expected = true;
                self.machine.motion_on_line = true;
                self.machine.ignore_axis_codes = false;
            }
            Command::Home => self.machine.ignore_axis_codes = true,
            Command::SetPosition if is_extruder_reset(&rest) => {}
            Command::Passive => {}
            Command::Axis(_, _) if self.machine.ignore_axis_codes => {
                log::debug!("Line {}: {} follows homing, not timed", self.line_number, code.text());
            }
            Command::Axis(axis, value) => {
                return match axis.opposite() {
                    Some(opposite) => self.planar_move(axis, opposite, value, &code, line),
                    None => self.vertical_move(value, &code, line),
                };
            }
            Command::SetPosition | Command::Unknown => {
                // An unmodelled code breaks the G-then-axis sequence
                self.machine.move_expected = false;
                self.machine.motion_on_line = false;
                let unknown = UnknownCode { line: self.line_number, code: code.text() };
                log::warn!("{unknown}");
                self.unknown.push(unknown);
            }
        }
        Ok(0.0)
    }

    fn planar_move(&mut self, axis: Axis, opposite: Axis, value: f64, code: &OpCode<'_>, line: &str) -> PredictResult<f64> {
        if !self.machine.move_expected {
            return Err(self.sequence_error(code, SequenceFault::AxisBeforeMotion(axis)));
        }

        match self.axes.planar(axis, value) {
            PlanarStep::Awaiting => Ok(0.0),
            PlanarStep::Repeated => Err(self.sequence_error(code, SequenceFault::RepeatedAxis { axis, opposite })),
            PlanarStep::Paired { dx, dy } => {
                self.machine.move_expected = false;
                let feed = feed::effective_feed(self.machine.current_feed, self.line_number, line, &code.text())?;
                let seconds = planar_seconds(dx, dy, feed);
                self.timed_moves += 1;
                log::debug!("Line {}: XY move dx={dx} dy={dy} at F{feed} takes {seconds:.3}s", self.line_number);
                Ok(seconds)
            }
        }
    }

    fn vertical_move(&mut self, value: f64, code: &OpCode<'_>, line: &str) -> PredictResult<f64> {
        if !self.machine.move_expected && !self.machine.motion_on_line {
            return Err(self.sequence_error(code, SequenceFault::AxisBeforeMotion(Axis::Z)));
        }

        let dz = self.axes.vertical(value);
        let feed = feed::effective_feed(self.machine.current_feed, self.line_number, line, &code.text())?;
        let seconds = vertical_seconds(dz, feed, &self.profile);
        self.timed_moves += 1;
        log::debug!("Line {}: Z move dz={dz} at F{feed} takes {seconds:.3}s", self.line_number);
        Ok(seconds)
    }

    fn sequence_error(&self, code: &OpCode<'_>, fault: SequenceFault) -> PredictError {
        PredictError::Sequence {
            line: self.line_number,
            code: code.text(),
            fault,
        }
    }
}

/// `G92` is only understood as `G92 E0`, an extruder zero reset.
fn is_extruder_reset(rest: &OpCodes<'_>) -> bool {
    let mut rest = rest.clone();
    match (rest.next(), rest.next()) {
        (Some(code), None) => code.is('E', 0),
        _ => false,
    }
}

/// Predict a whole job with a fresh predictor and the default profile.
pub fn predict_file_duration<I>(lines: I) -> PredictResult<f64>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Predictor::new().predict_file_duration(lines)
}

/// Iterator returned by [`Predictor::predict_lines`]
pub struct LineEstimates<'p, I> {
    predictor: &'p mut Predictor,
    lines: I,
    failed: bool,
}

impl<I> Iterator for LineEstimates<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = PredictResult<LineEstimate>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let line = self.lines.next()?;
        match self.predictor.predict_line_duration(line.as_ref()) {
            Ok(seconds) => Some(Ok(LineEstimate {
                line: self.predictor.line_number(),
                seconds,
                elapsed: self.predictor.elapsed(),
            })),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
