use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CLI wiring: where the persisted baseline lives and which tree file backs
/// the board source. Read from `watcher.toml` when present.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    #[serde(default = "default_tree_file")]
    pub tree_file: PathBuf,
}

fn default_state_file() -> PathBuf {
    PathBuf::from("state.json")
}

fn default_tree_file() -> PathBuf {
    PathBuf::from("boards.json")
}

impl Default for Config {
    fn default() -> Self {
        Self { state_file: default_state_file(), tree_file: default_tree_file() }
    }
}

impl Config {
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&s).with_context(|| format!("parse config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::load_or_default(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(cfg.state_file, PathBuf::from("state.json"));
        assert_eq!(cfg.tree_file, PathBuf::from("boards.json"));
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let cfg: Config = toml::from_str(r#"state_file = "snapshots/state.json""#).unwrap();
        assert_eq!(cfg.state_file, PathBuf::from("snapshots/state.json"));
        assert_eq!(cfg.tree_file, PathBuf::from("boards.json"));
    }
}
