use cobi_codec::QualityOptions;
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming a configuration file when `--config` is absent.
pub const CONFIG_ENV: &str = "COBI_CONFIG";

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Rectangle acceptance settings
    #[serde(default)]
    pub quality: QualityConfig,

    /// PNG output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Quality knobs, mirrored into [`QualityOptions`]
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct QualityConfig {
    /// Scores below this value are accepted
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Exponent of the long/short side ratio penalty
    #[serde(default = "default_aspect_exponent")]
    pub aspect_exponent: f64,

    /// Area at which the size penalty doubles a score
    #[serde(default = "default_size_scale")]
    pub size_scale: f64,
}

fn default_threshold() -> f64 {
    QualityOptions::default().threshold
}

fn default_aspect_exponent() -> f64 {
    QualityOptions::default().aspect_exponent
}

fn default_size_scale() -> f64 {
    QualityOptions::default().size_scale
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            aspect_exponent: default_aspect_exponent(),
            size_scale: default_size_scale(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct OutputConfig {
    /// Re-compress written PNGs with oxipng
    #[serde(default)]
    pub optimize_png: bool,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// Unreadable or invalid files are logged and replaced by defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        threshold = config.quality.threshold,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        %e,
                        path = %path.display(),
                        "Failed to parse config, using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolve the configuration from an explicit path, then `COBI_CONFIG`,
    /// then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Self::default(),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit; treat it as "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Quality options for the codec
    pub fn quality_options(&self) -> QualityOptions {
        QualityOptions::new()
            .threshold(self.quality.threshold)
            .aspect_exponent(self.quality.aspect_exponent)
            .size_scale(self.quality.size_scale)
    }
}
