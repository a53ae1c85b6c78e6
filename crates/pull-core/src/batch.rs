use crate::error::BatchError;
use crate::git_sync::{GitRunner, sync_repo};
use crate::model::{BatchItem, ProgressEvent, RepositoryPath, SyncResult, percent_complete};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

pub type EventSink = Sender<ProgressEvent>;

/// Runs fetch + pull over an ordered list of repositories, one at a time.
///
/// Each item reports to the sink in a fixed order: header log, status,
/// output log, progress. A failing item never stops the batch.
pub struct BatchRunner {
    items: Vec<BatchItem>,
    runner: Arc<dyn GitRunner>,
}

pub struct BatchHandle {
    pub events: Receiver<ProgressEvent>,
    join: JoinHandle<Vec<BatchItem>>,
}

impl BatchHandle {
    /// Blocks until the background run ends and returns the finished items.
    pub fn wait(self) -> anyhow::Result<Vec<BatchItem>> {
        self.join
            .join()
            .map_err(|_| anyhow::anyhow!("batch thread panicked"))
    }
}

impl BatchRunner {
    pub fn new(
        paths: Vec<RepositoryPath>,
        dest_indices: Vec<usize>,
        runner: Arc<dyn GitRunner>,
    ) -> Result<Self, BatchError> {
        if paths.len() != dest_indices.len() {
            return Err(BatchError::LengthMismatch {
                paths: paths.len(),
                indices: dest_indices.len(),
            });
        }
        let items = paths
            .into_iter()
            .zip(dest_indices)
            .enumerate()
            .map(|(index, (path, dest_index))| BatchItem {
                path,
                index,
                dest_index,
                result: None,
            })
            .collect();
        Ok(Self { items, runner })
    }

    pub fn for_all(paths: Vec<RepositoryPath>, runner: Arc<dyn GitRunner>) -> Self {
        let items = paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| BatchItem {
                path,
                index,
                dest_index: index,
                result: None,
            })
            .collect();
        Self { items, runner }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn start(self) -> BatchHandle {
        let (tx, rx) = mpsc::channel::<ProgressEvent>();
        let join = thread::spawn(move || self.run(&tx));
        BatchHandle { events: rx, join }
    }

    /// Processes every item on the calling thread. An empty batch emits no
    /// events.
    pub fn run(mut self, sink: &EventSink) -> Vec<BatchItem> {
        let total = self.items.len();
        info!(total, "starting batch");
        let mut emitter = Emitter { sink, open: true };

        for item in &mut self.items {
            emitter.send(ProgressEvent::LogAppended(header_line(&item.path)));
            let result = sync_repo(self.runner.as_ref(), item.path.as_path());

            if let Some(reason) = result.refresh_warning.as_deref() {
                emitter.send(ProgressEvent::LogAppended(format!(
                    "WARNING: fetch failed: {reason}\n"
                )));
            }
            emitter.send(ProgressEvent::StatusChanged {
                index: item.dest_index,
                status: result.status(),
            });
            for text in output_lines(&result) {
                emitter.send(ProgressEvent::LogAppended(text));
            }
            emitter.send(ProgressEvent::ProgressChanged(percent_complete(
                item.index + 1,
                total,
            )));

            info!(path = %item.path, status = %result.status(), "item finished");
            item.result = Some(result);
        }

        info!(total, "batch finished");
        self.items
    }
}

struct Emitter<'a> {
    sink: &'a EventSink,
    open: bool,
}

impl Emitter<'_> {
    fn send(&mut self, event: ProgressEvent) {
        if !self.open {
            return;
        }
        if self.sink.send(event).is_err() {
            warn!("event receiver dropped; continuing without events");
            self.open = false;
        }
    }
}

pub fn header_line(path: &RepositoryPath) -> String {
    format!("\n========== {path} ==========\n")
}

fn output_lines(result: &SyncResult) -> Vec<String> {
    if let Some(failure) = &result.failure {
        return vec![format!("LOCAL FAILURE: {failure}\n")];
    }
    let mut lines = Vec::new();
    if !result.stdout.is_empty() {
        lines.push(result.stdout.clone());
    }
    if !result.stderr.is_empty() {
        lines.push(format!("ERROR:\n{}", result.stderr));
    }
    lines
}
