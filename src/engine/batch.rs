//! Directory-based batch runner
//!
//! Discover every generator script under a root and execute each one in
//! isolation. One script's crash, hang, or launch failure never stops the
//! batch: every attempted script yields exactly one report, aggregated in
//! discovery order. Sequential by default; a bounded worker pool when
//! `workers > 1`.
//!
//! ```no_run
//! use chart_regen::prelude::*;
//!
//! # async fn demo() -> Result<(), RunnerError> {
//! let summary = BatchRunner::new("course-materials")
//!     .timeout(std::time::Duration::from_secs(30))
//!     .run()
//!     .await?;
//! println!("{}/{} succeeded", summary.succeeded(), summary.total());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{error, info};

use super::error::RunnerError;
use super::executor::ScriptExecutor;
use super::outcome::{BatchSummary, ScriptReport};
use crate::script::{GeneratorScript, RunnerConfig, ScriptScanner};

/// Called as each script completes: report, completed so far, total.
pub type ProgressFn = dyn Fn(&ScriptReport, usize, usize) + Send + Sync;

/// Run a full batch over a root with default configuration.
pub async fn run_script_directory(root: impl AsRef<Path>) -> Result<BatchSummary, RunnerError> {
    BatchRunner::new(root).run().await
}

pub struct BatchRunner {
    root: PathBuf,
    config: RunnerConfig,
    filter: Option<Box<dyn Fn(&str) -> bool + Send + Sync>>,
    progress: Option<Arc<ProgressFn>>,
    cancelled: Arc<AtomicBool>,
}

impl BatchRunner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_config(root, RunnerConfig::default())
    }

    pub fn with_config(root: impl AsRef<Path>, config: RunnerConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
            filter: None,
            progress: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers.max(1);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs();
        self
    }

    /// Keep only scripts whose path passes the predicate.
    pub fn filter<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(f));
        self
    }

    /// Observe each report as it lands, with running completed/total
    /// counts. In pooled mode this fires in completion order even though
    /// the summary stays in discovery order.
    pub fn on_report<F>(mut self, f: F) -> Self
    where
        F: Fn(&ScriptReport, usize, usize) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(f));
        self
    }

    /// Shared flag that stops new launches once set. In-flight scripts
    /// finish or time out; unlaunched scripts are recorded as skipped.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub async fn run(self) -> Result<BatchSummary, RunnerError> {
        let mut scripts = ScriptScanner::from_config(&self.config).scan(&self.root)?;

        if let Some(filter) = &self.filter {
            scripts.retain(|s| filter(&s.display_name()));
        }

        // Resolve the interpreter once; a missing one fails the batch
        // before any launch.
        if !scripts.is_empty() {
            which::which(&self.config.interpreter)
                .map_err(|_| RunnerError::InterpreterNotFound(self.config.interpreter.clone()))?;
        }

        let started_at = Utc::now();
        let batch_id = uuid::Uuid::new_v4().to_string();
        let total = scripts.len();
        info!(total, root = %self.root.display(), "Starting batch");

        let executor = ScriptExecutor::new(
            &self.config.interpreter,
            Duration::from_secs(self.config.timeout_secs),
        );

        let (reports, skipped) = if self.config.workers <= 1 {
            self.run_sequential(&executor, scripts, total).await
        } else {
            self.run_pooled(&executor, scripts, total).await
        };

        let summary = BatchSummary {
            batch_id,
            root: self.root,
            started_at,
            finished_at: Utc::now(),
            reports,
            skipped,
        };

        info!(
            total = summary.total(),
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "Batch finished"
        );

        Ok(summary)
    }

    async fn run_sequential(
        &self,
        executor: &ScriptExecutor,
        scripts: Vec<GeneratorScript>,
        total: usize,
    ) -> (Vec<ScriptReport>, Vec<PathBuf>) {
        let mut reports = Vec::with_capacity(total);
        let mut skipped = Vec::new();

        for script in scripts {
            if self.cancelled.load(Ordering::SeqCst) {
                skipped.push(script.path);
                continue;
            }

            let report = executor.run(&script).await;
            if let Some(progress) = &self.progress {
                progress(&report, reports.len() + 1, total);
            }
            reports.push(report);
        }

        (reports, skipped)
    }

    async fn run_pooled(
        &self,
        executor: &ScriptExecutor,
        scripts: Vec<GeneratorScript>,
        total: usize,
    ) -> (Vec<ScriptReport>, Vec<PathBuf>) {
        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let completed = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = scripts
            .into_iter()
            .enumerate()
            .map(|(index, script)| {
                let sem = semaphore.clone();
                let executor = executor.clone();
                let cancelled = self.cancelled.clone();
                let progress = self.progress.clone();
                let completed = completed.clone();

                tokio::spawn(async move {
                    let _permit = sem.acquire_owned().await.expect("semaphore closed");

                    if cancelled.load(Ordering::SeqCst) {
                        return (index, Err(script.path));
                    }

                    let report = executor.run(&script).await;
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(progress) = &progress {
                        progress(&report, done, total);
                    }
                    (index, Ok(report))
                })
            })
            .collect();

        // Slot by discovery index so the summary does not depend on
        // completion order. join_all preserves spawn order, so the
        // skipped list stays in discovery order too.
        let mut slots: Vec<Option<ScriptReport>> = (0..total).map(|_| None).collect();
        let mut skipped = Vec::new();

        for joined in join_all(tasks).await {
            match joined {
                Ok((index, Ok(report))) => slots[index] = Some(report),
                Ok((_, Err(path))) => skipped.push(path),
                Err(e) => error!(error = %e, "Worker task failed"),
            }
        }

        (slots.into_iter().flatten().collect(), skipped)
    }
}
