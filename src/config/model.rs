// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::types::FileMode;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [redirect]
/// mode = "644"
///
/// [worker]
/// acquire_delay_ms = 10
/// hold_delay_ms = 50
/// count = 2
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub redirect: RedirectSection,

    #[serde(default)]
    pub worker: WorkerSection,
}

/// `[redirect]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectSection {
    /// Octal permission bits for newly created redirect targets.
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    "644".to_string()
}

impl Default for RedirectSection {
    fn default() -> Self {
        Self {
            mode: default_mode(),
        }
    }
}

/// `[worker]` section.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WorkerSection {
    #[serde(default = "default_acquire_delay_ms")]
    pub acquire_delay_ms: u64,

    #[serde(default = "default_hold_delay_ms")]
    pub hold_delay_ms: u64,

    /// Number of workers `procsync lock` starts on the shared lock.
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_acquire_delay_ms() -> u64 {
    10
}

fn default_hold_delay_ms() -> u64 {
    50
}

fn default_count() -> usize {
    2
}

impl Default for WorkerSection {
    fn default() -> Self {
        Self {
            acquire_delay_ms: default_acquire_delay_ms(),
            hold_delay_ms: default_hold_delay_ms(),
            count: default_count(),
        }
    }
}

impl WorkerSection {
    pub fn acquire_delay(&self) -> Duration {
        Duration::from_millis(self.acquire_delay_ms)
    }

    pub fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_delay_ms)
    }
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub redirect_mode: FileMode,
    pub worker: WorkerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(redirect_mode: FileMode, worker: WorkerSection) -> Self {
        Self {
            redirect_mode,
            worker,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(FileMode::default(), WorkerSection::default())
    }
}
