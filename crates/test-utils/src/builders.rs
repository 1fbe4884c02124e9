use std::path::Path;

use procsync::config::{ConfigFile, RawConfigFile, RedirectSection, WorkerSection};
use procsync::exec::CommandSpec;

/// `/bin/sh -c <script>` as a spec.
pub fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("/bin/sh").arg("-c").arg(script)
}

/// A spec that exits with `code`.
pub fn exit_with(code: u8) -> CommandSpec {
    sh(&format!("exit {code}"))
}

/// A spec naming a program that does not exist under `dir`.
pub fn missing_program(dir: &Path) -> CommandSpec {
    CommandSpec::new(dir.join("no-such-program").to_string_lossy().into_owned())
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                redirect: RedirectSection::default(),
                worker: WorkerSection::default(),
            },
        }
    }

    pub fn redirect_mode(mut self, mode: &str) -> Self {
        self.config.redirect.mode = mode.to_string();
        self
    }

    pub fn worker_delays(mut self, acquire_ms: u64, hold_ms: u64) -> Self {
        self.config.worker.acquire_delay_ms = acquire_ms;
        self.config.worker.hold_delay_ms = hold_ms;
        self
    }

    pub fn worker_count(mut self, count: usize) -> Self {
        self.config.worker.count = count;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
