//! Transform configuration
//!
//! Configuration loaded from a patchdown.toml file.

use std::env;
use std::path::{Path, PathBuf};

use patchdown_annotate::Markers;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "patchdown.toml";

/// One fence-rewriting rule: which language tag marks a code block as diff
/// content and what the annotated listing is rendered as.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FenceRule {
    /// Language tag that triggers the rewrite (e.g., "diff-go").
    pub diff_tag: String,

    /// Language tag the annotated listing is rendered as (e.g., "go").
    pub target_tag: String,

    /// Line-comment token used to build the marker lines.
    #[serde(default = "default_comment_token")]
    pub comment_token: String,
}

fn default_comment_token() -> String {
    "//".to_string()
}

impl FenceRule {
    /// Marker set derived from this rule's comment token.
    pub fn markers(&self) -> Markers {
        Markers::for_comment_token(&self.comment_token)
    }
}

/// Transform configuration loaded from patchdown.toml.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransformConfig {
    /// Fence rules; a block's language tag is matched against each in order.
    #[serde(default = "default_rules")]
    pub rules: Vec<FenceRule>,
}

fn default_rules() -> Vec<FenceRule> {
    vec![FenceRule {
        diff_tag: "diff-go".to_string(),
        target_tag: "go".to_string(),
        comment_token: default_comment_token(),
    }]
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// Errors from loading an explicit config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but is not valid TOML for this config.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

impl TransformConfig {
    /// Find the rule matching a fence language tag.
    pub fn rule_for(&self, lang: &str) -> Option<&FenceRule> {
        self.rules.iter().find(|r| r.diff_tag == lang)
    }

    /// Load config from CWD first, then home directory, or use defaults.
    pub fn load() -> Self {
        if let Some((path, content)) = load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("ignoring unparseable {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("using default config");
        Self::default()
    }

    /// Load config from an explicit TOML file path.
    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Find patchdown.toml in the current directory, then in the home directory.
fn load_config_file() -> Option<(PathBuf, String)> {
    let cwd_path = PathBuf::from(CONFIG_FILE);
    if let Ok(content) = std::fs::read_to_string(&cwd_path) {
        return Some((cwd_path, content));
    }

    let home_path = env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))?;
    let content = std::fs::read_to_string(&home_path).ok()?;
    Some((home_path, content))
}
