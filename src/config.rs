//! Render configuration: loaded from ~/.vaadya/config.yaml or an explicit path.
//!
//! Every field is optional in YAML; missing fields take the defaults below.
//!
//! ```yaml
//! shruti: 62
//! program: 40
//! gamakas:
//!   ":^": [[0.0, 0.0], [0.5, 1.0], [1.0, 0.0]]
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::gamaka::{CurveError, GamakaCurve, GamakaRegistry};
use crate::midi::smf::DEFAULT_TICKS_PER_BEAT;

/// Settings for turning segments into MIDI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// MIDI note of the reference pitch (`sa`).
    pub shruti: u8,
    /// General MIDI program; 40 is violin.
    pub program: u8,
    /// MIDI channel, 0-15.
    pub channel: u8,
    /// Note-on velocity.
    pub velocity: u8,
    /// Ticks rendered per svara unit.
    pub ticks_per_unit: u32,
    /// Exponent of the time easing `t' = t^n`; larger values delay the slide.
    pub ease_exponent: i32,
    /// Ticks per quarter note in the file header.
    pub ticks_per_beat: u16,
    /// Extra gamaka curves as `[position, weight]` checkpoints.
    pub gamakas: BTreeMap<String, Vec<[f64; 2]>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shruti: 64,
            program: 40,
            channel: 0,
            velocity: 64,
            ticks_per_unit: 200,
            ease_exponent: 5,
            ticks_per_beat: DEFAULT_TICKS_PER_BEAT,
            gamakas: BTreeMap::new(),
        }
    }
}

/// A configuration that cannot be loaded or used.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
    Curve { name: String, source: CurveError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {e}"),
            ConfigError::Yaml(e) => write!(f, "invalid config YAML: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
            ConfigError::Curve { name, source } => write!(f, "invalid gamaka {name:?}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::Curve { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Get the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".vaadya").join("config.yaml"))
}

impl RenderConfig {
    /// Parse and validate YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content).map_err(ConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_yaml(&content)
    }

    /// Load ~/.vaadya/config.yaml, or the defaults if it doesn't exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Check ranges the renderer and file writer rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if self.shruti > 127 {
            return invalid(format!("shruti must be a MIDI note (0-127), got {}", self.shruti));
        }
        if self.program > 127 {
            return invalid(format!("program must be 0-127, got {}", self.program));
        }
        if self.channel > 15 {
            return invalid(format!("channel must be 0-15, got {}", self.channel));
        }
        if !(1..=127).contains(&self.velocity) {
            return invalid(format!("velocity must be 1-127, got {}", self.velocity));
        }
        if self.ticks_per_unit == 0 {
            return invalid("ticks_per_unit must be positive".to_string());
        }
        if self.ease_exponent < 1 {
            return invalid(format!(
                "ease_exponent must be at least 1, got {}",
                self.ease_exponent
            ));
        }
        // The top bit selects SMPTE timing in the file header.
        if self.ticks_per_beat == 0 || self.ticks_per_beat > 0x7FFF {
            return invalid(format!(
                "ticks_per_beat must be 1-32767, got {}",
                self.ticks_per_beat
            ));
        }
        if let Some(name) = self.gamakas.keys().find(|n| !n.starts_with(':')) {
            return invalid(format!("gamaka names start with ':', got {name:?}"));
        }
        Ok(())
    }

    /// The builtin gamakas plus the configured ones.
    pub fn registry(&self) -> Result<GamakaRegistry, ConfigError> {
        let mut registry = GamakaRegistry::builtin();
        for (name, points) in &self.gamakas {
            let points: Vec<(f64, f64)> = points.iter().map(|&[p, w]| (p, w)).collect();
            let curve = GamakaCurve::new(name.clone(), &points).map_err(|source| {
                ConfigError::Curve {
                    name: name.clone(),
                    source,
                }
            })?;
            registry.register(curve);
        }
        Ok(registry)
    }
}
