use thiserror::Error;

use super::types::Axis;

/// Why an axis code does not fit the motion sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceFault {
    #[error("{0}-code before G-code")]
    AxisBeforeMotion(Axis),

    #[error("two {axis}-codes with no intervening {opposite}")]
    RepeatedAxis { axis: Axis, opposite: Axis },
}

/// Fatal prediction errors. Any of these aborts the whole run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// Axis code out of order with the motion commands around it.
    #[error("INVALID GCODE on line {line} at {code}: {fault}")]
    Sequence {
        line: usize,
        code: String,
        fault: SequenceFault,
    },

    /// A move completed with no sticky feed and no F code on its line.
    #[error("INVALID SPEED on line {line} at {code}: move without speed having been set")]
    UnresolvedFeed { line: usize, code: String },
}

impl PredictError {
    /// 1-based line the error was raised on
    pub fn line(&self) -> usize {
        match self {
            PredictError::Sequence { line, .. } | PredictError::UnresolvedFeed { line, .. } => *line,
        }
    }

    pub fn is_sequence_error(&self) -> bool {
        matches!(self, PredictError::Sequence { .. })
    }
}

pub type PredictResult<T> = Result<T, PredictError>;
