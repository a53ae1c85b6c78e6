use crate::error::LocalInvocationFailure;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryPath(String);

impl RepositoryPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for RepositoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepositoryPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RepositoryPath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ItemStatus {
    Ok,
    Error,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Ok => "OK",
            ItemStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one fetch + pull attempt against a single repository.
///
/// `failure` is only set when git could not be run at all; a pull that ran
/// and exited non-zero leaves it empty and reports through `stderr`.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncResult {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
    pub failure: Option<LocalInvocationFailure>,
    pub refresh_warning: Option<String>,
}

impl SyncResult {
    pub fn completed(succeeded: bool, stdout: String, stderr: String) -> Self {
        Self {
            succeeded,
            stdout,
            stderr,
            failure: None,
            refresh_warning: None,
        }
    }

    pub fn local_failure(failure: LocalInvocationFailure) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: String::new(),
            failure: Some(failure),
            refresh_warning: None,
        }
    }

    pub fn with_refresh_warning(mut self, warning: Option<String>) -> Self {
        self.refresh_warning = warning;
        self
    }

    pub fn status(&self) -> ItemStatus {
        if self.succeeded {
            ItemStatus::Ok
        } else {
            ItemStatus::Error
        }
    }
}

#[derive(Clone, Debug)]
pub struct BatchItem {
    pub path: RepositoryPath,
    pub index: usize,
    pub dest_index: usize,
    pub result: Option<SyncResult>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgressEvent {
    LogAppended(String),
    StatusChanged { index: usize, status: ItemStatus },
    ProgressChanged(u8),
}

pub fn percent_complete(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let done = done.min(total);
    ((done * 200 + total) / (total * 2)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent_complete(1, 2), 50);
        assert_eq!(percent_complete(1, 3), 33);
        assert_eq!(percent_complete(2, 3), 67);
        assert_eq!(percent_complete(3, 3), 100);
        assert_eq!(percent_complete(1, 8), 13);
    }

    #[test]
    fn percent_for_empty_batch_is_complete() {
        assert_eq!(percent_complete(0, 0), 100);
    }

    #[test]
    fn local_failure_never_succeeds() {
        let result = SyncResult::local_failure(LocalInvocationFailure::ToolNotFound("git".into()));
        assert!(!result.succeeded);
        assert_eq!(result.status(), ItemStatus::Error);
    }

    #[test]
    fn repository_path_serializes_as_plain_string() {
        let path = RepositoryPath::new("/repos/a");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"/repos/a\"");
    }
}
