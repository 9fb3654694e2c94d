use serde::{Deserialize, Serialize};

/// Vertical speed used once the nominal feed reaches `min_feed`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZSpeedTier {
    pub min_feed: f64,
    pub speed: f64,
}

/// Printer profile saved to disk (vertical speed caps)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorProfile {
    pub name: String,
    /// The Z axis cannot follow the horizontal feed; its effective speed is
    /// capped per tier. Feeds below every tier are used unchanged.
    pub z_speed_tiers: Vec<ZSpeedTier>,
}

impl Default for PredictorProfile {
    fn default() -> Self {
        Self {
            name: "Ultimaker".into(),
            z_speed_tiers: vec![
                ZSpeedTier { min_feed: 2000.0, speed: 585.0 },
                ZSpeedTier { min_feed: 450.0, speed: 450.0 },
            ],
        }
    }
}

impl PredictorProfile {
    fn json_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or(std::path::Path::new("."))
            .join("predictor_profile.json")
    }

    pub fn load() -> Self {
        let path = Self::json_path();
        match std::fs::read_to_string(&path) {
            Ok(data) => Self::from_json(&data).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => {
                log::debug!("No profile at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}
