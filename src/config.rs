use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Public copy of the launch records used when nothing else is configured.
pub const DEFAULT_DATA_SOURCE: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBM-DS0321EN-SkillsNetwork/datasets/spacex_launch_dash.csv";

/// Dashboard configuration, read from an optional TOML file.
///
/// ```toml
/// data_source = "data/spacex_launch_dash.csv"
///
/// [slider]
/// min = 0.0
/// max = 10000.0
/// step = 1000.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Local path or `http(s)://` URL of the launch dataset.
    pub data_source: String,
    pub title: String,
    pub slider: SliderConfig,
    pub window: WindowConfig,
}

/// Displayed scale of the payload range selector. Independent of the
/// selected range, which starts at the dataset's observed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider: SliderConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 850.0,
        }
    }
}

/// Upper bound on the number of slider steps a config may define.
pub const MAX_SLIDER_STEPS: usize = 1000;

impl SliderConfig {
    /// Number of whole steps between `min` and `max`, `None` when the scale
    /// is degenerate or finer than [`MAX_SLIDER_STEPS`].
    pub fn steps(&self) -> Option<usize> {
        let steps = ((self.max - self.min) / self.step + 1e-9).floor();
        if steps.is_finite() && steps >= 0.0 && steps <= MAX_SLIDER_STEPS as f64 {
            Some(steps as usize)
        } else {
            None
        }
    }

    /// Tick mark positions from `min` towards `max`, one per step. Empty for
    /// a scale that fails [`SliderConfig::steps`].
    pub fn marks(&self) -> Vec<f64> {
        match self.steps() {
            Some(steps) => (0..=steps)
                .map(|k| self.min + k as f64 * self.step)
                .collect(),
            None => Vec::new(),
        }
    }
}

impl DashboardConfig {
    /// Load from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Self::from_toml(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.slider;
        if !(s.min.is_finite() && s.max.is_finite() && s.min < s.max) {
            bail!("slider.min ({}) must be below slider.max ({})", s.min, s.max);
        }
        if !(s.step.is_finite() && s.step > 0.0) {
            bail!("slider.step must be positive, got {}", s.step);
        }
        if s.steps().is_none() {
            bail!(
                "slider.step {} splits {} – {} into more than {MAX_SLIDER_STEPS} steps",
                s.step,
                s.min,
                s.max
            );
        }
        if self.data_source.trim().is_empty() {
            bail!("data_source must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_scale() {
        let config = DashboardConfig::default();
        assert_eq!(config.slider.min, 0.0);
        assert_eq!(config.slider.max, 10_000.0);
        assert_eq!(config.slider.step, 1_000.0);
        assert_eq!(config.data_source, DEFAULT_DATA_SOURCE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = DashboardConfig::from_toml(
            "data_source = \"launches.csv\"\n[slider]\nstep = 500.0\n",
        )
        .unwrap();
        assert_eq!(config.data_source, "launches.csv");
        assert_eq!(config.slider.step, 500.0);
        assert_eq!(config.slider.max, 10_000.0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn marks_cover_scale_inclusive() {
        let marks = SliderConfig::default().marks();
        assert_eq!(marks.len(), 11);
        assert_eq!(marks.first(), Some(&0.0));
        assert_eq!(marks.last(), Some(&10_000.0));
    }

    #[test]
    fn invalid_slider_is_rejected() {
        let mut config = DashboardConfig::default();
        config.slider.min = 5.0;
        config.slider.max = 5.0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.slider.step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn too_fine_step_is_rejected() {
        let mut config = DashboardConfig::default();
        config.slider.step = 0.001;
        assert!(config.validate().is_err());
        assert!(config.slider.marks().is_empty());

        let mut config = DashboardConfig::default();
        config.slider.min = 1e6;
        config.slider.max = 1e6 + 1.0;
        config.slider.step = 1e-12;
        assert!(config.validate().is_err());
        assert!(config.slider.marks().is_empty());
    }

    #[test]
    fn marks_step_from_min_without_drift() {
        let slider = SliderConfig {
            min: 0.0,
            max: 1.0,
            step: 0.1,
        };
        let marks = slider.marks();
        assert_eq!(marks.len(), 11);
        assert_eq!(marks[3], 3.0 * 0.1);
        assert_eq!(marks[10], 10.0 * 0.1);

        let uneven = SliderConfig {
            min: 0.0,
            max: 10_000.0,
            step: 3_000.0,
        };
        assert_eq!(uneven.marks(), [0.0, 3_000.0, 6_000.0, 9_000.0]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = DashboardConfig::load(Some(Path::new("/nonexistent/dashboard.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
