//! Run command handler
//!
//! Feeds container snapshots into the application until the input ends or
//! the process is interrupted, then drains the dispatcher.

use std::future::Future;
use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::models::Container;
use crate::state::AppState;

/// Outcome of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines read, blank ones included
    pub lines: usize,
    /// Snapshots saved and announced
    pub observed: usize,
    pub interrupted: bool,
}

pub struct RunCommandHandler {
    config: Settings,
}

impl RunCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Processes snapshots from `input`, or stdin when `None`, stopping early on Ctrl-C
    pub async fn execute(&self, input: Option<&Path>) -> AppResult<RunSummary> {
        let shutdown = async {
            // An unusable signal handler just means Ctrl-C cannot stop the run early
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        match input {
            Some(path) => {
                let file = tokio::fs::File::open(path).await.map_err(|e| {
                    AppError::Validation {
                        field: "input".to_string(),
                        reason: format!("Cannot open '{}': {}", path.display(), e),
                    }
                })?;
                self.process(BufReader::new(file), shutdown).await
            }
            None => self.process(BufReader::new(tokio::io::stdin()), shutdown).await,
        }
    }

    /// Wires the application, ingests `reader` and drains all pending deliveries.
    ///
    /// The dispatcher is drained even when ingestion fails.
    pub async fn process<R, S>(&self, reader: R, shutdown: S) -> AppResult<RunSummary>
    where
        R: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        let state = AppState::from_settings(&self.config)?;
        let dispatcher = state.start();

        info!("Processing container snapshots");
        let result = ingest(&state, reader, shutdown).await;
        dispatcher.shutdown().await;

        if let Ok(ref summary) = result {
            info!(
                lines = summary.lines,
                observed = summary.observed,
                interrupted = summary.interrupted,
                "Run finished"
            );
        }
        result
    }
}

/// Saves and announces every snapshot read from `reader`
pub async fn ingest<R, S>(state: &AppState, reader: R, shutdown: S) -> AppResult<RunSummary>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut lines = reader.lines();
    let mut summary = RunSummary::default();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.map_err(|e| AppError::Internal { source: e.into() })?,
            _ = &mut shutdown => {
                info!("Interrupted, stopping input");
                summary.interrupted = true;
                break;
            }
        };
        let Some(line) = line else {
            break;
        };
        summary.lines += 1;

        if line.trim().is_empty() {
            continue;
        }

        let container: Container =
            serde_json::from_str(&line).map_err(|e| AppError::InvalidInput {
                line: summary.lines,
                source: e.into(),
            })?;
        debug!(container_id = %container.id, state = %container.state, "Snapshot read");

        state.observe(container);
        summary.observed += 1;

        // Let subscribers keep up with the bus
        tokio::task::yield_now().await;
    }

    Ok(summary)
}
