use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "PlotConfig::default_width")]
    pub width: u32,
    #[serde(default = "PlotConfig::default_height")]
    pub height: u32,
    #[serde(default = "PlotConfig::default_spike_width")]
    pub spike_width: u32,
    #[serde(default = "PlotConfig::default_spike_height")]
    pub spike_height: u32,
    #[serde(default = "PlotConfig::default_font_family")]
    pub font_family: String,
    #[serde(default = "PlotConfig::default_caption_size")]
    pub caption_size: u32,
}

impl PlotConfig {
    fn default_width() -> u32 {
        1200
    }
    fn default_height() -> u32 {
        700
    }
    fn default_spike_width() -> u32 {
        1000
    }
    fn default_spike_height() -> u32 {
        800
    }
    fn default_font_family() -> String {
        "sans-serif".to_string()
    }
    fn default_caption_size() -> u32 {
        20
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            spike_width: Self::default_spike_width(),
            spike_height: Self::default_spike_height(),
            font_family: Self::default_font_family(),
            caption_size: Self::default_caption_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphvizConfig {
    /// Path or name of the `dot` executable.
    #[serde(default = "GraphvizConfig::default_dot_path")]
    pub dot_path: String,
}

impl GraphvizConfig {
    fn default_dot_path() -> String {
        "dot".to_string()
    }
}

impl Default for GraphvizConfig {
    fn default() -> Self {
        Self {
            dot_path: Self::default_dot_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    /// Command used to open rendered files. Platform opener when unset.
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VizConfig {
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default)]
    pub graphviz: GraphvizConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

impl VizConfig {
    /// Read `path`, or create it with every value commented out.
    ///
    /// An unreadable or malformed file is reported and replaced by defaults
    /// for this run; the file itself is left untouched.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            write_commented_defaults(path);
            return Self::default();
        }
        fs::read_to_string(path)
            .map_err(|err| err.to_string())
            .and_then(|text| toml::from_str::<Self>(&text).map_err(|err| err.to_string()))
            .unwrap_or_else(|err| {
                warn!("ignoring config {}: {err}", path.display());
                Self::default()
            })
    }
}

fn write_commented_defaults(path: &Path) {
    let written = toml::to_string_pretty(&VizConfig::default())
        .map_err(|err| err.to_string())
        .and_then(|text| {
            fs::write(path, comment_out_values(&text)).map_err(|err| err.to_string())
        });
    if let Err(err) = written {
        warn!("could not write default config {}: {err}", path.display());
    }
}

fn comment_out_values(text: &str) -> String {
    let mut commented = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
            commented.push_str(line);
        } else {
            commented.push_str("# ");
            commented.push_str(line);
        }
        commented.push('\n');
    }
    commented
}
