//! Predicts how long a G-code job takes to print, without a printer.

pub mod config;
pub mod gcode;

pub use config::machine_profile::{PredictorProfile, ZSpeedTier};
pub use gcode::error::{PredictError, PredictResult, SequenceFault};
pub use gcode::estimation::{EstimationResult, remaining_seconds};
pub use gcode::file::GCodeFile;
pub use gcode::types::Axis;
pub use gcode::predictor::{LineEstimate, Predictor, predict_file_duration};
