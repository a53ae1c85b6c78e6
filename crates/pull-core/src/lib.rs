pub mod batch;
pub mod error;
pub mod git_sync;
pub mod model;
pub mod repo_status;
pub mod store;

pub use batch::{BatchHandle, BatchRunner};
pub use git_sync::{CommandGitRunner, GitRunner};
pub use model::{ItemStatus, ProgressEvent, RepositoryPath, SyncResult};
pub use store::RepoListStore;
