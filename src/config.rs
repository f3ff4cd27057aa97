use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FoldConfig {
    /// Enables/disables the whole retrofit.
    #[serde(default = "FoldConfig::default_enabled")]
    pub enabled: bool,
    /// Whether sections start expanded. A user overrides this with the
    /// `Inspector_Collapse_Default` variable in their `User` namespace.
    #[serde(default = "FoldConfig::default_expanded")]
    pub default_expanded: bool,
    /// Whether escaped sections are cleaned up after the sweep delay.
    #[serde(default = "FoldConfig::default_run_cleanup")]
    pub run_cleanup: bool,
}

impl FoldConfig {
    const fn default_enabled() -> bool {
        true
    }

    const fn default_expanded() -> bool {
        true
    }

    const fn default_run_cleanup() -> bool {
        true
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("Config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            default_expanded: Self::default_expanded(),
            run_cleanup: Self::default_run_cleanup(),
        }
    }
}

/// Live view of the three switches. Every consumer reads these at the point
/// of use rather than caching them, so a flip takes effect on the next panel
/// build or sweep turn.
#[derive(Debug)]
pub struct FoldSettings {
    enabled: AtomicBool,
    default_expanded: AtomicBool,
    run_cleanup: AtomicBool,
}

impl FoldSettings {
    pub fn new(cfg: FoldConfig) -> Self {
        Self {
            enabled: AtomicBool::new(cfg.enabled),
            default_expanded: AtomicBool::new(cfg.default_expanded),
            run_cleanup: AtomicBool::new(cfg.run_cleanup),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, on: bool) {
        self.enabled.store(on, Ordering::Relaxed);
    }

    pub fn default_expanded(&self) -> bool {
        self.default_expanded.load(Ordering::Relaxed)
    }

    pub fn set_default_expanded(&self, on: bool) {
        self.default_expanded.store(on, Ordering::Relaxed);
    }

    pub fn run_cleanup(&self) -> bool {
        self.run_cleanup.load(Ordering::Relaxed)
    }

    pub fn set_run_cleanup(&self, on: bool) {
        self.run_cleanup.store(on, Ordering::Relaxed);
    }
}

impl Default for FoldSettings {
    fn default() -> Self {
        Self::new(FoldConfig::default())
    }
}
