use std::fs;
use std::io;
use std::path::Path;

use crate::config::machine_profile::PredictorProfile;

use super::error::PredictResult;
use super::estimation::EstimationResult;
use super::predictor::Predictor;

/// A loaded GCode job, kept as raw lines
#[derive(Debug, Clone)]
pub struct GCodeFile {
    pub filename: String,
    pub lines: Vec<String>,
}

impl GCodeFile {
    /// Load a GCode file from disk
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let file = Self::from_content(&filename, &content);
        log::info!("Loaded in {} lines.", file.line_count());
        Ok(file)
    }

    /// Create GCodeFile from raw string content
    pub fn from_content(filename: &str, content: &str) -> Self {
        Self {
            filename: filename.to_string(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Run a full prediction over the job with a fresh predictor
    pub fn estimate(&self, profile: &PredictorProfile) -> PredictResult<EstimationResult> {
        Predictor::with_profile(profile.clone()).estimate(&self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_content_splits_lines() {
        let file = GCodeFile::from_content("job.gcode", ";header\nG1 X60 Y0 F600\r\nG1 X60 Y60\n");
        assert_eq!(file.line_count(), 3);
        assert_eq!(file.lines[1], "G1 X60 Y0 F600");

        let r = file.estimate(&PredictorProfile::default()).unwrap();
        assert!((r.estimated_seconds - 12.0).abs() < 1e-9);
        assert_eq!(r.line_count, 3);
    }

    #[test]
    fn load_reads_from_disk() {
        let path = std::env::temp_dir().join(format!("print_predictor_{}.gcode", std::process::id()));
        fs::write(&path, "G1 Z10 F100\n").unwrap();
        let file = GCodeFile::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert!(file.filename.starts_with("print_predictor_"));
        let r = file.estimate(&PredictorProfile::default()).unwrap();
        assert!((r.estimated_seconds - 6.0).abs() < 1e-9);
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(GCodeFile::load("/nonexistent/dir/job.gcode").is_err());
    }
}
