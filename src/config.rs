use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG: &str = "calllog.yaml";

/// Half-open range of inner (internal) extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct InnerRange {
    pub start: i64,
    pub end: i64,
}

impl Default for InnerRange {
    fn default() -> Self {
        Self { start: 100, end: 400 }
    }
}

impl InnerRange {
    pub fn as_range(&self) -> Range<i64> {
        self.start..self.end
    }

    /// The extension `value` names, if it parses as an integer inside the range
    pub fn extension(&self, value: &str) -> Option<i64> {
        let n = value.trim().parse::<i64>().ok()?;
        self.as_range().contains(&n).then_some(n)
    }

    /// A value is inner when it parses as an integer inside the range
    pub fn contains(&self, value: &str) -> bool {
        self.extension(value).is_some()
    }
}

/// Report settings from calllog.yaml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Calls this short or shorter (seconds) are dropped at load time
    pub min_duration: i64,
    pub inner_range: InnerRange,
    /// Numbers reported with a before/after evening split
    pub special_numbers: Vec<u32>,
    /// First hour counted as "after"
    pub evening_hour: u32,
    /// Literal `number` value that marks an incoming call
    pub incoming_token: String,
    pub output_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_duration: 10,
            inner_range: InnerRange::default(),
            special_numbers: vec![110, 111],
            evening_hour: 17,
            incoming_token: "incoming".to_string(),
            output_file: PathBuf::from("results.xlsx"),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .context(format!("Failed to read settings: {:?}", path.as_ref()))?;
        let settings: Settings =
            serde_yaml::from_str(&content).context("Failed to parse settings YAML")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Find settings in the working directory, then the user config dir.
    /// Falls back to defaults when neither exists.
    pub fn discover() -> Result<Self> {
        for candidate in config_candidates() {
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "loading settings");
                return Self::load(&candidate);
            }
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.inner_range.start >= self.inner_range.end {
            bail!(
                "inner_range is empty: start {} must be below end {}",
                self.inner_range.start,
                self.inner_range.end
            );
        }
        if self.evening_hour > 23 {
            bail!("evening_hour must be within 0..=23, got {}", self.evening_hour);
        }
        Ok(())
    }
}

fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("calllog-report").join("config.yaml"));
    }
    candidates
}
