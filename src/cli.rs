// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::FileMode;

/// Command-line arguments for `procsync`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "procsync",
    version,
    about = "Run child processes with pass/fail reporting, and exercise a timed lock worker.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// If omitted, `Procsync.toml` in the current directory is used when it
    /// exists; otherwise built-in defaults apply.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PROCSYNC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run an executable (absolute path, no shell) and wait for it.
    Exec {
        /// Send the child's stdout to this file (created/truncated).
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Octal permission bits for a newly created output file.
        #[arg(long, value_name = "OCTAL", requires = "output")]
        mode: Option<FileMode>,

        /// Absolute program path followed by its arguments.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        argv: Vec<String>,
    },

    /// Run a command line through `/bin/sh -c`.
    Shell {
        /// The command line.
        line: String,
    },

    /// Write a string into a file.
    Write {
        /// Destination file.
        file: PathBuf,

        /// Text to write.
        text: String,
    },

    /// Start workers that contend for one shared lock and report each flag.
    Lock {
        /// Number of workers.
        #[arg(long, value_name = "N")]
        workers: Option<usize>,

        /// Delay before each worker tries to take the lock.
        #[arg(long, value_name = "MS")]
        acquire_ms: Option<u64>,

        /// How long each worker holds the lock.
        #[arg(long, value_name = "MS")]
        hold_ms: Option<u64>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_keeps_child_flags() {
        let args = CliArgs::try_parse_from([
            "procsync", "exec", "-o", "out.txt", "--", "/bin/ls", "-l", "/tmp",
        ])
        .unwrap();

        match args.command {
            Command::Exec { output, mode, argv } => {
                assert_eq!(output, Some(PathBuf::from("out.txt")));
                assert!(mode.is_none());
                assert_eq!(argv, ["/bin/ls", "-l", "/tmp"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn mode_is_parsed_as_octal() {
        let args = CliArgs::try_parse_from([
            "procsync", "exec", "--output", "o", "--mode", "600", "/bin/true",
        ])
        .unwrap();

        match args.command {
            Command::Exec { mode, .. } => assert_eq!(mode.unwrap().bits(), 0o600),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn exec_requires_a_program() {
        assert!(CliArgs::try_parse_from(["procsync", "exec"]).is_err());
    }

    #[test]
    fn write_takes_file_then_text() {
        let args = CliArgs::try_parse_from(["procsync", "write", "/tmp/f", "hi there"]).unwrap();
        match args.command {
            Command::Write { file, text } => {
                assert_eq!(file, PathBuf::from("/tmp/f"));
                assert_eq!(text, "hi there");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
