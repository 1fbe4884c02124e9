// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod sync;
pub mod types;
pub mod writer;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::load_or_default;
use crate::exec::{execute, execute_redirected, execute_shell, CommandSpec, RedirectTarget};
use crate::fs::RealFileSystem;
use crate::sync::{launch, BlockingLock, RawLock};

/// High-level entry point used by `main.rs`.
///
/// Loads the config, dispatches the subcommand and returns whether it
/// succeeded. Only setup problems (bad config, unable to start a worker)
/// come back as `Err`; a failing child or lock shows up as `Ok(false)`.
pub async fn run(args: CliArgs) -> Result<bool> {
    let cfg = load_or_default(args.config.as_deref()).context("loading configuration")?;
    debug!(?cfg, "configuration loaded");

    match args.command {
        Command::Exec { output, mode, argv } => {
            let spec = CommandSpec::from_argv(argv);
            let outcome = match output {
                Some(path) => {
                    let target =
                        RedirectTarget::new(path).with_mode(mode.unwrap_or(cfg.redirect_mode));
                    execute_redirected(&target, &spec).await
                }
                None => execute(&spec).await,
            };
            Ok(outcome.is_success())
        }
        Command::Shell { line } => Ok(execute_shell(Some(&line)).await.is_success()),
        Command::Write { file, text } => {
            match writer::write_string(&RealFileSystem, &file, &text) {
                Ok(_) => Ok(true),
                Err(err) => {
                    warn!(error = %err, "write failed");
                    Ok(false)
                }
            }
        }
        Command::Lock {
            workers,
            acquire_ms,
            hold_ms,
        } => {
            let count = workers.unwrap_or(cfg.worker.count);
            let acquire = acquire_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| cfg.worker.acquire_delay());
            let hold = hold_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| cfg.worker.hold_delay());
            run_lock_workers(count, acquire, hold).await
        }
    }
}

/// Launch `count` workers on one fresh lock, join them all and print each
/// worker's completion flag.
async fn run_lock_workers(count: usize, acquire: Duration, hold: Duration) -> Result<bool> {
    if count == 0 {
        anyhow::bail!("--workers must be >= 1");
    }

    info!(
        workers = count,
        acquire_ms = acquire.as_millis() as u64,
        hold_ms = hold.as_millis() as u64,
        "starting lock workers"
    );

    // The lock outlives every worker: we keep our own reference until all
    // handles are joined.
    let lock = Arc::new(BlockingLock::new());

    let mut handles = Vec::with_capacity(count);
    for _ in 0..count {
        let shared: Arc<dyn RawLock> = lock.clone();
        handles.push(launch(shared, acquire, hold).context("launching lock worker")?);
    }

    let mut all_clean = true;
    for handle in handles {
        let name = handle.name().unwrap_or("worker").to_string();
        let completed = tokio::task::spawn_blocking(move || handle.join())
            .await
            .context("joining lock worker")??;

        println!("{name}: {}", if completed { "completed" } else { "failed" });
        all_clean &= completed;
    }

    Ok(all_clean)
}
