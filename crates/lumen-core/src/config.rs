//! Project configuration.
//!
//! Settings live in `.lumen/lumen.json`. Every section and field carries a
//! default, so a missing, partial, or unparseable file still yields a
//! usable config rather than an error.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level lumen configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumenConfig {
    pub version: String,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub contrast: ContrastConfig,
}

/// Approved brand palette and styling class conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    #[serde(default = "default_approved_colors")]
    pub approved: Vec<String>,
    #[serde(default = "default_neutral_class")]
    pub neutral_class: String,
    /// Marker for approved button classes, matched as a substring of each
    /// class name (`x-btn-primary` qualifies).
    #[serde(default = "default_button_class_prefix")]
    pub button_class_prefix: String,
}

/// Batch analysis tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_max_urls")]
    pub max_urls: usize,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// WCAG AA contrast thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastConfig {
    #[serde(default = "default_normal_ratio")]
    pub normal_ratio: f64,
    #[serde(default = "default_large_ratio")]
    pub large_ratio: f64,
}

fn default_approved_colors() -> Vec<String> {
    vec![
        "#36B727".to_string(),
        "#044014".to_string(),
        "#4AD539".to_string(),
        "#F9F7F5".to_string(),
    ]
}
fn default_neutral_class() -> String {
    "bg-neutral".to_string()
}
fn default_button_class_prefix() -> String {
    "btn-".to_string()
}
fn default_max_urls() -> usize {
    10
}
fn default_workers() -> usize {
    8
}
fn default_normal_ratio() -> f64 {
    4.5
}
fn default_large_ratio() -> f64 {
    3.0
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            approved: default_approved_colors(),
            neutral_class: default_neutral_class(),
            button_class_prefix: default_button_class_prefix(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_urls: default_max_urls(),
            workers: default_workers(),
        }
    }
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            normal_ratio: default_normal_ratio(),
            large_ratio: default_large_ratio(),
        }
    }
}

impl Default for LumenConfig {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            palette: PaletteConfig::default(),
            batch: BatchConfig::default(),
            contrast: ContrastConfig::default(),
        }
    }
}

impl LumenConfig {
    /// Load configuration from `lumen.json` inside the given lumen directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(lumen_dir: &Path) -> Self {
        let config_path = lumen_dir.join("lumen.json");
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!(
                    "lumen: warning: failed to parse {}: {}, using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Worker pool size held to the supported 5..=10 range.
    pub fn worker_pool_size(&self) -> usize {
        self.batch.workers.clamp(5, 10)
    }
}
