//! Run configuration: model parameters plus an optional nudge, from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use triad_core::{ModelParams, Nudge, NudgeMode};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub model: ModelParams,
    pub nudge: Option<Nudge>,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: RunConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .model
            .validate()
            .with_context(|| format!("invalid model parameters in {}", path.display()))?;
        if let Some(nudge) = &config.nudge {
            nudge
                .validate()
                .with_context(|| format!("invalid nudge in {}", path.display()))?;
        }
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// The `--config` flag wins; otherwise `TRIAD_CONFIG`; otherwise defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit.map(Path::to_path_buf).or_else(|| {
            std::env::var("TRIAD_CONFIG")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });
        match path {
            Some(p) => Self::load(&p),
            None => Ok(Self::default()),
        }
    }

    /// Nudge for the requested mode. A configured nudge of the same mode keeps
    /// its parameters; a different mode falls back to that mode's defaults.
    pub fn nudge_for(&self, mode: Option<NudgeMode>) -> Nudge {
        match (mode, self.nudge) {
            (None, Some(n)) => n,
            (None, None) => Nudge::default(),
            (Some(m), Some(n)) if n.mode() == m => n,
            (Some(m), _) => Nudge::for_mode(m),
        }
    }
}
