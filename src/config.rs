use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::NetworkConfig;

/// Environment variable consulted when no config path is given on the command line.
pub const CONFIG_ENV: &str = "ANN_CALCULATOR_CONFIG";

/// Canvas geometry used by the layout pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Horizontal distance between consecutive layers.
    pub layer_spacing: f64,
    /// Vertical distance between neurons of one layer.
    pub neuron_spacing: f64,
    /// X coordinate of the input layer.
    pub x_start: f64,
    /// Y coordinate of the first neuron in every layer.
    pub y_start: f64,
    /// Added to the tallest layer's extent to get the canvas height.
    pub height_margin: f64,
    /// Added to the span between first and last layer to get the canvas width.
    pub width_margin: f64,
    /// Neuron circle radius.
    pub neuron_radius: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            layer_spacing: 180.0,
            neuron_spacing: 100.0,
            x_start: 50.0,
            y_start: 50.0,
            height_margin: 100.0,
            width_margin: 200.0,
            neuron_radius: 30.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Network shown at startup.
    pub network: NetworkConfig,
    pub layout: LayoutSettings,
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut config: AppConfig = serde_json::from_str(text)?;
        config.network = config.network.sanitized();
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads from the first command-line argument, then [`CONFIG_ENV`], else defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV));
        match path {
            Some(path) => {
                let config = Self::load(Path::new(&path))?;
                log::info!("loaded config from {}", Path::new(&path).display());
                Ok(config)
            }
            None => {
                log::info!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Neuron count typed by the user.
///
/// Reads the leading integer and ignores whatever follows it, so `"3.7"`
/// gives 3 and `"12abc"` gives 12. No digits, a minus sign, or a value
/// below 1 gives 1.
pub fn parse_count(text: &str) -> usize {
    let text = text.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    match rest[..end].parse::<usize>() {
        Ok(n) if !negative && n >= 1 => n,
        _ => 1,
    }
}

/// Input or weight value typed by the user; anything unparsable becomes 0.
pub fn parse_value(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
